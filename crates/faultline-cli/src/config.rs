//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments

use crate::error::{Error, Result};
use faultline_core::{ResourceCatalog, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale settings
    pub locale: LocaleConfig,

    /// Message catalog settings
    pub resources: ResourcesConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Locale configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale used when neither --lng nor --accept-language is given
    pub default: String,
}

/// Message catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Directory of `<locale>.yaml|yml|json` catalog files
    pub dir: Option<PathBuf>,

    /// Start from the built-in English templates
    pub include_builtin: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            include_builtin: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let parsed = if is_yaml(path) {
            serde_yaml::from_str(&content).map_err(|e| (e.to_string(), "YAML"))
        } else {
            serde_json::from_str(&content).map_err(|e| (e.to_string(), "JSON"))
        };

        parsed.map_err(|(reason, expected)| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            reason,
        })
    }

    /// Load configuration from default locations
    ///
    /// A default-path file that fails to load is reported on stderr and
    /// skipped. Logging is not initialized yet at this point.
    pub fn load() -> Result<Self> {
        Ok(Self::load_first(
            &Self::default_config_paths(),
            &mut std::io::stderr(),
        ))
    }

    /// First loadable file among `paths`, or the defaults
    fn load_first(paths: &[PathBuf], warnings: &mut dyn Write) -> Self {
        for path in paths.iter().filter(|path| path.exists()) {
            match Self::from_file(path) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded configuration");
                    return config;
                }
                Err(e) => {
                    let _ = writeln!(
                        warnings,
                        "Warning: Failed to load config from {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }

        // Return default config if no config file found
        Self::default()
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// The file `load_with_file` would read, if any
    pub fn locate(file: Option<&Path>) -> Option<PathBuf> {
        match file {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_config_paths()
                .into_iter()
                .find(|path| path.exists()),
        }
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // Current directory
            PathBuf::from(".faultline.yaml"),
            PathBuf::from(".faultline.json"),
            PathBuf::from("faultline.yaml"),
            PathBuf::from("faultline.json"),
        ];

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let faultline_dir = config_dir.join("faultline");
            paths.push(faultline_dir.join("config.yaml"));
            paths.push(faultline_dir.join("config.json"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".faultline.yaml"));
            paths.push(home_dir.join(".faultline.json"));
        }

        paths
    }

    /// Build the resource catalog described by the `resources` section
    pub fn build_catalog(&self) -> Result<ResourceCatalog> {
        let mut catalog = if self.resources.include_builtin {
            ResourceCatalog::builtin()
        } else {
            ResourceCatalog::new(self.locale.default.clone())
        };

        if let Some(dir) = &self.resources.dir {
            let files = catalog.load_dir(dir)?;
            debug!(dir = %dir.display(), files, "Loaded resource files");
        }

        if catalog.locales().is_empty() {
            return Err(Error::config(
                "no message templates available: enable resources.include_builtin or set resources.dir",
            ));
        }

        Ok(catalog)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Builder for creating configurations programmatically
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new config builder
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the fallback locale
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.config.locale.default = locale.into();
        self
    }

    /// Set the catalog directory
    pub fn resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.resources.dir = Some(dir.into());
        self
    }

    /// Include or exclude the built-in templates
    pub fn include_builtin(mut self, include: bool) -> Self {
        self.config.resources.include_builtin = include;
        self
    }

    /// Set the log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
