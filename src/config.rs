//! YAML configuration for ingredient screening.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! reference:
//!   # Custom banned list in the same layout as the bundled one.
//!   path: ./my-list.yaml
//!   # Keep the bundled entries and append the custom ones.
//!   include_bundled: true
//!
//! logging:
//!   level: info
//!   format: pretty
//! ```
//!
//! Every section is optional; an empty document (apart from `version`)
//! screens against the bundled list with `info` logging.

use std::fs;
use std::path::{Path, PathBuf};

use reference::{bundled_entries, load_entries_from_file, BannedIngredient, ReferenceError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level screening configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScreenConfig {
    /// Configuration format version
    pub version: String,

    /// Which banned list to screen against
    #[serde(default)]
    pub reference: ReferenceYamlConfig,

    /// Log level and output format for the binary
    #[serde(default)]
    pub logging: LoggingYamlConfig,
}

impl ScreenConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: ScreenConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.reference.validate()?;
        self.logging.validate()?;

        Ok(())
    }

    /// Entries selected by the `reference` section.
    pub fn reference_entries(&self) -> Result<Vec<BannedIngredient>, ReferenceError> {
        self.reference.entries()
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            reference: ReferenceYamlConfig::default(),
            logging: LoggingYamlConfig::default(),
        }
    }
}

/// Reference list selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceYamlConfig {
    /// Custom list; the bundled list is used when absent
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// With a custom `path`, also keep the bundled entries (first)
    #[serde(default = "true_value")]
    pub include_bundled: bool,
}

impl ReferenceYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.path.is_none() && !self.include_bundled {
            return Err(ConfigLoadError::Validation(
                "reference.include_bundled may only be false when reference.path is set"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn entries(&self) -> Result<Vec<BannedIngredient>, ReferenceError> {
        let Some(path) = &self.path else {
            return bundled_entries();
        };

        let custom = load_entries_from_file(path)?;
        if !self.include_bundled {
            return Ok(custom);
        }

        let mut entries = bundled_entries()?;
        entries.extend(custom);
        Ok(entries)
    }
}

impl Default for ReferenceYamlConfig {
    fn default() -> Self {
        Self {
            path: None,
            include_bundled: true,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingYamlConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigLoadError::Validation(format!(
                "logging.level must be one of: {valid_levels:?}"
            )));
        }
        Ok(())
    }
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn true_value() -> bool {
    true
}
fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
logging:
  level: debug
  format: json
"#;

        let config = ScreenConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.reference.path.is_none());
        assert!(config.reference.include_bundled);
    }

    #[test]
    fn test_default_config() {
        let config = ScreenConfig::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.reference_entries().unwrap().len() >= 100);
    }

    #[test]
    fn test_unsupported_version() {
        let result = ScreenConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(result, Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"));
    }

    #[test]
    fn test_log_level_validation() {
        let yaml = r#"
version: "1"
logging:
  level: loud
"#;
        let result = ScreenConfig::from_yaml(yaml);
        assert!(result.unwrap_err().to_string().contains("logging.level"));
    }

    #[test]
    fn test_bundled_cannot_be_dropped_without_path() {
        let yaml = r#"
version: "1"
reference:
  include_bundled: false
"#;
        let result = ScreenConfig::from_yaml(yaml);
        assert!(matches!(result, Err(ConfigLoadError::Validation(_))));
    }

    #[test]
    fn test_custom_reference_list() {
        let mut list = NamedTempFile::new().unwrap();
        list.write_all(
            b"version: 1\ningredients:\n  - canonical_name: Palm Oil\n    category: other\n    severity: low\n",
        )
        .unwrap();

        let yaml = format!(
            "version: \"1.0\"\nreference:\n  path: {}\n  include_bundled: false\n",
            list.path().display()
        );
        let config = ScreenConfig::from_yaml(&yaml).unwrap();
        let entries = config.reference_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].canonical_name, "Palm Oil");

        let merged = ScreenConfig {
            reference: ReferenceYamlConfig {
                include_bundled: true,
                ..config.reference.clone()
            },
            ..config
        };
        let entries = merged.reference_entries().unwrap();
        assert!(entries.len() > 100);
        assert_eq!(entries.last().unwrap().canonical_name, "Palm Oil");
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"version: \"1.0\"\n").unwrap();

        let config = ScreenConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.version, "1.0");
    }

    #[test]
    fn test_missing_file() {
        let result = ScreenConfig::from_file("/no/such/config.yaml");
        assert!(matches!(result, Err(ConfigLoadError::FileRead(_))));
    }
}
