//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$FILEMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/filemeta/config.toml`
//! 3. `~/.filemeta/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., the XML suffix must
//! start with a dot and every extension must be non-empty).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// extensions = [".txt", ".pdf"]
/// suffix = ".metadata.xml"
/// prompt = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Extensions handled by File Meta. When unset, every file is handled.
    pub extensions: Option<Vec<String>>,

    /// Suffix appended to a target's path to name its XML file
    pub suffix: Option<String>,

    /// Pause for a key press before exiting
    pub prompt: Option<bool>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(suffix) = &self.suffix {
            if !suffix.starts_with('.') || suffix.len() < 2 {
                return Err(ConfigError::InvalidValue(format!(
                    "suffix '{}' must start with '.' and name an extension",
                    suffix
                )));
            }
            if suffix.contains(&['/', '\\'][..]) {
                return Err(ConfigError::InvalidValue(format!(
                    "suffix '{}' cannot contain path separators",
                    suffix
                )));
            }
        }

        if let Some(extensions) = &self.extensions {
            for ext in extensions {
                if ext.trim_start_matches('.').is_empty() {
                    return Err(ConfigError::InvalidValue(
                        "extensions cannot contain an empty entry".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}
