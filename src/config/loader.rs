//! Configuration File Loading
//!
//! Handles loading and saving configuration files from platform locations,
//! with TOML as the primary format and JSON as a fallback.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{Error, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(ConfigFormat::Toml),
            Some("json") => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

/// Configuration file loader
pub struct ConfigLoader {
    /// Search paths for configuration files, in priority order
    search_paths: Vec<PathBuf>,
    /// Path the configuration was loaded from (if any)
    current_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader with platform search paths
    pub fn new() -> Self {
        Self {
            search_paths: Self::default_search_paths(),
            current_path: None,
        }
    }

    /// Load configuration from the first existing search path, falling back
    /// to defaults when no file exists. A file that exists but fails to
    /// parse is an error, not a silent fallback.
    pub fn load() -> Result<Config> {
        let mut loader = Self::new();
        match loader.find_config_file() {
            Some(path) => {
                let config = Self::load_from(&path)?;
                loader.current_path = Some(path);
                Ok(config)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = match ConfigFormat::from_path(path) {
            Some(ConfigFormat::Json) => {
                serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                })?
            }
            // TOML is the primary format and the default for unknown extensions
            _ => toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                format: "TOML".to_string(),
                reason: e.to_string(),
            })?,
        };

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to an explicit path, format chosen by extension
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        let content = match ConfigFormat::from_path(path) {
            Some(ConfigFormat::Json) => {
                serde_json::to_string_pretty(config).map_err(|e| Error::ConfigSaveFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?
            }
            _ => toml::to_string_pretty(config).map_err(|e| Error::ConfigSaveFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| Error::ConfigSaveFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            }
        }

        fs::write(path, content).map_err(|e| Error::ConfigSaveFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Path the configuration was loaded from, if a file was used
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// First existing configuration file among the search paths
    fn find_config_file(&self) -> Option<PathBuf> {
        self.search_paths.iter().find(|p| p.is_file()).cloned()
    }

    /// Platform search paths, most specific first
    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join("ktspad.toml"));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ktspad").join("config.toml"));
            paths.push(config_dir.join("ktspad").join("config.json"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".ktspad.toml"));
        }

        paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
