//! Runtime configuration.
//!
//! Configuration is read from a JSON file and may be overridden through
//! environment variables:
//!
//! ```json
//! {
//!   "extensions": { "preferred_parser": "parse-mp3" },
//!   "staging": { "temp_dir": "/var/tmp/tagtext" }
//! }
//! ```
//!
//! | Variable                   | Overrides                       |
//! |----------------------------|---------------------------------|
//! | `TAGTEXT_PREFERRED_PARSER` | `extensions.preferred_parser`   |
//! | `TAGTEXT_TEMP_DIR`         | `staging.temp_dir`              |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TagTextError};

pub const ENV_PREFERRED_PARSER: &str = "TAGTEXT_PREFERRED_PARSER";
pub const ENV_TEMP_DIR: &str = "TAGTEXT_TEMP_DIR";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extensions: ExtensionConfig,
    pub staging: StagingConfig,
}

/// Extension selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Name of the parser extension to use when several are registered
    pub preferred_parser: Option<String>,
}

impl ExtensionConfig {
    /// The preferred parser name, `None` when unset or blank
    pub fn preferred_parser(&self) -> Option<&str> {
        self.preferred_parser
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Where input bytes are staged while parsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Directory for temporary files; the system default when unset
    pub temp_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TagTextError::config_with_source(format!("cannot read {}", path.display()), e)
        })?;
        Self::from_json_str(&contents).map_err(|e| match e {
            TagTextError::Config { message, source } => TagTextError::Config {
                message: format!("{}: {}", path.display(), message),
                source,
            },
            other => other,
        })
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| TagTextError::config_with_source("invalid configuration", e))
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(ENV_PREFERRED_PARSER) {
            self.extensions.preferred_parser = Some(name);
        }
        if let Some(dir) = lookup(ENV_TEMP_DIR) {
            self.staging.temp_dir = Some(PathBuf::from(dir));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_empty() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.extensions.preferred_parser(), None);
    }

    #[test]
    fn test_parses_sections() {
        let config = Config::from_json_str(
            r#"{"extensions": {"preferred_parser": "parse-mp3"}, "staging": {"temp_dir": "/var/tmp"}}"#,
        )
        .unwrap();
        assert_eq!(config.extensions.preferred_parser(), Some("parse-mp3"));
        assert_eq!(config.staging.temp_dir, Some(PathBuf::from("/var/tmp")));
    }

    #[test]
    fn test_blank_preference_is_none() {
        let config = Config::from_json_str(r#"{"extensions": {"preferred_parser": "  "}}"#).unwrap();
        assert_eq!(config.extensions.preferred_parser(), None);
    }

    #[test]
    fn test_invalid_json_is_a_config_error() {
        let err = Config::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, TagTextError::Config { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagtext.json");
        std::fs::write(&path, r#"{"extensions": {"preferred_parser": "foo"}}"#).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.extensions.preferred_parser(), Some("foo"));

        let missing = Config::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, TagTextError::Config { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [(ENV_PREFERRED_PARSER, "bar"), (ENV_TEMP_DIR, "/scratch")]
            .into_iter()
            .collect();
        let config = Config::default().with_overrides(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.extensions.preferred_parser(), Some("bar"));
        assert_eq!(config.staging.temp_dir, Some(PathBuf::from("/scratch")));
    }
}
