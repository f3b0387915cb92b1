//! Loading site configuration from files.
//!
//! The validator itself works on in-memory values; this module is the thin
//! layer that reads a JSON, YAML or TOML file into a [`serde_json::Value`]
//! and hands it over. Files are found by walking up from a start directory,
//! nearest first.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ValidationErrors;
use crate::schema::SiteConfig;
use crate::validate::{validate, validate_all};

/// File names searched by [`discover`], in priority order.
const CONFIG_CANDIDATES: &[&str] = &[
    ".vitepress/config.json",
    ".vitepress/config.yaml",
    ".vitepress/config.yml",
    ".vitepress/config.toml",
    "docs/.vitepress/config.json",
    "docs/.vitepress/config.yaml",
    "docs/.vitepress/config.yml",
    "docs/.vitepress/config.toml",
    "stroller.json",
    "stroller.yaml",
    "stroller.yml",
    "stroller.toml",
];

/// Serialization format of a configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Extension is not one of json, yaml, yml, toml.
    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// The file parsed but does not satisfy the schema.
    #[error("Invalid site configuration in {}:\n{errors}", .path.display())]
    Invalid {
        /// File that failed validation.
        path: PathBuf,
        /// Violations found.
        errors: ValidationErrors,
    },
}

/// Parse configuration text into an untyped value.
///
/// # Errors
///
/// Returns the parser error for the given format.
pub fn parse_str(content: &str, format: ConfigFormat) -> Result<Value, LoadError> {
    let value: Value = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };
    Ok(value)
}

/// Read and parse a configuration file without validating it.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, has an unknown
/// extension or fails to parse.
pub fn read_file(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), ?format, "Read site configuration");
    parse_str(&content, format)
}

/// Load and validate a configuration file, stopping at the first violation.
///
/// # Errors
///
/// Returns [`LoadError::Invalid`] with a single violation, or any error of
/// [`read_file`].
pub fn load_file(path: &Path) -> Result<SiteConfig, LoadError> {
    let value = read_file(path)?;
    validate(&value).map_err(|error| LoadError::Invalid {
        path: path.to_path_buf(),
        errors: error.into(),
    })
}

/// Load and validate a configuration file, collecting every violation.
///
/// # Errors
///
/// Returns [`LoadError::Invalid`] with all violations, or any error of
/// [`read_file`].
pub fn load_file_all(path: &Path) -> Result<SiteConfig, LoadError> {
    let value = read_file(path)?;
    validate_all(&value).map_err(|errors| LoadError::Invalid {
        path: path.to_path_buf(),
        errors,
    })
}

/// Search for a configuration file in `start` and its parents.
#[must_use]
pub fn discover(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_CANDIDATES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ValidationError;

    const STROLLER_JSON: &str = r#"{
  "title": "stroller",
  "description": "blog",
  "themeConfig": {
    "siteTitle": "stroller",
    "logo": "/avatar.jpg",
    "nav": [
      { "text": "Blog", "link": "/articles/intro" },
      { "text": "github", "link": "https://github.com/Stroller12" }
    ],
    "sidebar": {
      "/articles/": [
        {
          "text": "Docs",
          "items": [
            { "text": "Intro", "link": "/articles/intro" },
            { "text": "Interview", "link": "/articles/interview" }
          ]
        }
      ]
    }
  }
}"#;

    const STROLLER_YAML: &str = r#"
title: stroller
description: blog
themeConfig:
  siteTitle: stroller
  logo: /avatar.jpg
  nav:
    - text: Blog
      link: /articles/intro
    - text: github
      link: https://github.com/Stroller12
  sidebar:
    /articles/:
      - text: Docs
        items:
          - text: Intro
            link: /articles/intro
          - text: Interview
            link: /articles/interview
"#;

    const STROLLER_TOML: &str = r#"
title = "stroller"
description = "blog"

[themeConfig]
siteTitle = "stroller"
logo = "/avatar.jpg"
nav = [
  { text = "Blog", link = "/articles/intro" },
  { text = "github", link = "https://github.com/Stroller12" },
]

[[themeConfig.sidebar."/articles/"]]
text = "Docs"
items = [
  { text = "Intro", link = "/articles/intro" },
  { text = "Interview", link = "/articles/interview" },
]
"#;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.YML")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("stroller.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("config.js")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), None);
    }

    #[test]
    fn test_formats_parse_to_same_config() {
        let json = validate(&parse_str(STROLLER_JSON, ConfigFormat::Json).unwrap()).unwrap();
        let yaml = validate(&parse_str(STROLLER_YAML, ConfigFormat::Yaml).unwrap()).unwrap();
        let toml = validate(&parse_str(STROLLER_TOML, ConfigFormat::Toml).unwrap()).unwrap();

        assert_eq!(json, yaml);
        assert_eq!(json, toml);
        assert_eq!(json.theme.nav().len(), 2);
        assert!(json.theme.nav()[1].is_external());
    }

    #[test]
    fn test_parse_error() {
        let err = parse_str("title: [unclosed", ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(err, LoadError::Yaml(_)));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stroller.yaml");
        fs::write(&path, STROLLER_YAML).unwrap();

        let config = load_file(&path).unwrap();
        assert_eq!(config.title, "stroller");
        assert_eq!(
            config.theme.sidebar()["/articles/"][0].items[1].link,
            "/articles/interview"
        );
    }

    #[test]
    fn test_load_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_load_file_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.js");
        fs::write(&path, "export default {}").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_file_invalid_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stroller.json");
        fs::write(&path, r#"{ "title": "stroller", "description": "blog" }"#).unwrap();

        let err = load_file(&path).unwrap_err();
        let LoadError::Invalid { errors, .. } = &err else {
            panic!("Expected LoadError::Invalid, got {err:?}");
        };
        assert!(matches!(errors.first(), ValidationError::MissingField { .. }));
        let msg = err.to_string();
        assert!(msg.contains("stroller.json"));
        assert!(msg.contains("themeConfig"));
    }

    #[test]
    fn test_load_file_all_collects_violations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stroller.json");
        fs::write(&path, r#"{ "themeConfig": { "sidebar": { "articles": [] } } }"#).unwrap();

        let Err(LoadError::Invalid { errors, .. }) = load_file_all(&path) else {
            panic!("Expected LoadError::Invalid");
        };
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("docs/.vitepress");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.json"), STROLLER_JSON).unwrap();
        let nested = dir.path().join("docs/articles");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(discover(&nested), Some(config_dir.join("config.json")));
        assert_eq!(
            discover(dir.path()),
            Some(dir.path().join("docs/.vitepress/config.json"))
        );
    }

    #[test]
    fn test_discover_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stroller.toml"), STROLLER_TOML).unwrap();
        let nested = dir.path().join("site");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("stroller.yaml"), STROLLER_YAML).unwrap();

        assert_eq!(discover(&nested), Some(nested.join("stroller.yaml")));
    }
}
