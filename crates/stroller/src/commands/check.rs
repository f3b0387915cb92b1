//! `stroller check` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use stroller_config::{SiteConfig, discover, load_file, load_file_all};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover from the current directory).
    config: Option<PathBuf>,

    /// Report every violation instead of stopping at the first.
    #[arg(short, long)]
    all: bool,

    /// Print the validated configuration as JSON to stdout.
    #[arg(long)]
    print: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration is found, it cannot be read, or
    /// it fails validation.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cwd = std::env::current_dir()?;
        let path = resolve_config_path(self.config, &cwd)?;
        tracing::info!(path = %path.display(), all = self.all, "Checking site configuration");

        let config = if self.all {
            load_file_all(&path)?
        } else {
            load_file(&path)?
        };

        output.success(&format!("{} is valid", path.display()));
        let mut lines = summary(&config).into_iter();
        if let Some(headline) = lines.next() {
            output.highlight(&headline);
        }
        for line in lines {
            output.detail(&line);
        }

        if self.print {
            output.data(&serde_json::to_string_pretty(&config)?)?;
        } else {
            output.info("Run with --print to show the normalized configuration.");
        }

        Ok(())
    }
}

/// Use the explicit path, or discover one starting at `cwd`.
fn resolve_config_path(explicit: Option<PathBuf>, cwd: &Path) -> Result<PathBuf, CliError> {
    match explicit {
        Some(path) => Ok(path),
        None => discover(cwd).ok_or_else(|| CliError::NotDiscovered(cwd.to_path_buf())),
    }
}

/// Human-readable overview of a validated configuration.
fn summary(config: &SiteConfig) -> Vec<String> {
    let theme = &config.theme;
    let external = theme.nav().iter().filter(|item| item.is_external()).count();
    let groups: usize = theme.sidebar().iter().map(|(_, groups)| groups.len()).sum();
    let items: usize = theme
        .sidebar()
        .iter()
        .flat_map(|(_, groups)| groups)
        .map(|group| group.items.len())
        .sum();

    let mut lines = vec![
        format!("{} ({})", config.title, config.description),
        format!(
            "Navigation: {} ({external} external)",
            plural(theme.nav().len(), "link")
        ),
        format!(
            "Sidebar: {}, {}, {}",
            plural(theme.sidebar().len(), "prefix"),
            plural(groups, "group"),
            plural(items, "item")
        ),
    ];
    for (prefix, groups) in theme.sidebar().iter() {
        for group in groups {
            let folded = if group.is_collapsed() {
                ", collapsed"
            } else if group.is_collapsible() {
                ", collapsible"
            } else {
                ""
            };
            lines.push(format!(
                "  {prefix} {} ({}{folded})",
                group.text,
                plural(group.items.len(), "item")
            ));
        }
    }
    lines
}

fn plural(count: usize, noun: &str) -> String {
    match (count, noun.ends_with('x')) {
        (1, _) => format!("1 {noun}"),
        (_, true) => format!("{count} {noun}es"),
        (_, false) => format!("{count} {noun}s"),
    }
}
