//! CLI error types.

use stroller_config::LoadError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("No site configuration found in {} or its parents", .0.display())]
    NotDiscovered(std::path::PathBuf),
}
