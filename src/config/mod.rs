//! Configuration management for ktspad
//!
//! Provides the configuration for the interpreter invocation, session
//! behavior, and highlighting, with loading/saving and validation.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Main configuration structure for ktspad
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Interpreter invocation configuration
    pub interpreter: InterpreterConfig,

    /// Session/relay configuration
    pub session: SessionConfig,

    /// Highlighting configuration
    pub highlight: HighlightConfig,
}

/// Interpreter invocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Interpreter binary name, resolved through the platform launcher
    pub binary: String,

    /// Flag that puts the interpreter into script mode
    pub script_flag: String,

    /// Path of the transient script artifact
    pub script_path: PathBuf,

    /// Script source extension (without dot), anchoring diagnostic patterns
    pub source_extension: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            binary: "kotlinc".to_string(),
            script_flag: "-script".to_string(),
            script_path: PathBuf::from("TempKotlin.kts"),
            source_extension: "kts".to_string(),
        }
    }
}

/// Session/relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Grace interval between process exit and artifact deletion, in
    /// milliseconds. Covers file-system activity the interpreter may still
    /// be finishing against the script file right after exit.
    pub cleanup_grace_ms: u64,

    /// Event bus capacity for buffered session events
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cleanup_grace_ms: 1000,
            event_capacity: 256,
        }
    }
}

/// Highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Whether the consumer should apply highlighting at all
    pub enabled: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Validate the configuration, returning the first offending field
    pub fn validate(&self) -> Result<()> {
        if self.interpreter.binary.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "interpreter.binary".to_string(),
                reason: "interpreter binary must not be empty".to_string(),
            });
        }
        if self.interpreter.script_path.as_os_str().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "interpreter.script_path".to_string(),
                reason: "script path must not be empty".to_string(),
            });
        }
        if self.interpreter.source_extension.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "interpreter.source_extension".to_string(),
                reason: "source extension must not be empty".to_string(),
            });
        }
        if self.interpreter.source_extension.starts_with('.') {
            return Err(Error::ConfigValidationFailed {
                field: "interpreter.source_extension".to_string(),
                reason: "source extension is given without the leading dot".to_string(),
            });
        }
        if self.session.event_capacity == 0 {
            return Err(Error::ConfigValidationFailed {
                field: "session.event_capacity".to_string(),
                reason: "event capacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
