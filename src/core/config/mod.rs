//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$FILEMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/filemeta/config.toml`
//! 3. `~/.filemeta/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use filemeta::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load().unwrap();
//! println!("XML suffix: {}", config.suffix());
//! println!("Handles report.txt: {}", config.handles(Path::new("report.txt")));
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::paths::DEFAULT_XML_SUFFIX;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: FileConfig,
    /// Path the config was loaded from, if any
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation. A missing config file is not an error (defaults
    /// are used).
    pub fn load() -> Result<Self, ConfigError> {
        let (file, loaded_from) = Self::locate()?;
        file.validate()?;
        Ok(Config { file, loaded_from })
    }

    fn locate() -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $FILEMETA_CONFIG
        if let Ok(path) = std::env::var("FILEMETA_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/filemeta/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("filemeta/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.filemeta/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".filemeta/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((FileConfig::default(), None))
    }

    /// Read, parse and validate one config file.
    pub fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Check if `path` has an extension File Meta handles.
    ///
    /// Every file is handled when no extension list is configured.
    /// Comparison ignores case and an optional leading dot.
    pub fn handles(&self, path: &Path) -> bool {
        let Some(extensions) = &self.file.extensions else {
            return true;
        };
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        extensions
            .iter()
            .any(|handled| handled.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Get the XML file suffix.
    ///
    /// Defaults to ".metadata.xml" if not configured.
    pub fn suffix(&self) -> &str {
        self.file.suffix.as_deref().unwrap_or(DEFAULT_XML_SUFFIX)
    }

    /// Check if the CLI should pause before exiting.
    ///
    /// Defaults to `false` if not configured.
    pub fn prompt(&self) -> bool {
        self.file.prompt.unwrap_or(false)
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}
