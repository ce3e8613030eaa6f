//! Error types and Result aliases for ktspad

use std::fmt;
use std::path::PathBuf;

/// Result type alias for ktspad operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ktspad
#[derive(Debug)]
pub enum Error {
    // === Session errors ===
    /// Failed to open a PTY for the interpreter
    PtyCreationFailed {
        command: String,
        reason: String,
    },

    /// Failed to launch the interpreter process (binary missing, permission denied)
    SpawnFailed {
        command: String,
        reason: String,
    },

    /// Failed to clone the PTY reader
    ReaderCloneFailed {
        reason: String,
    },

    /// Failed to take the PTY writer
    WriterTakeFailed {
        reason: String,
    },

    /// Failed to read from the interpreter's output stream mid-run
    StreamReadFailed {
        reason: String,
    },

    /// Failed to hand input to the interpreter's input stream
    InputSendFailed {
        reason: String,
    },

    /// Input was sent to a session whose process has already terminated
    WriteAfterTermination,

    /// A session is already running; at most one may be live at a time
    SessionAlreadyActive,

    // === Script artifact errors ===
    /// Failed to write the transient script file
    ArtifactWriteFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to delete the transient script file after the run
    CleanupFailed {
        path: PathBuf,
        reason: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to save configuration file
    ConfigSaveFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    /// Regex compilation errors
    Regex(regex::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Session errors
            Error::PtyCreationFailed { command, reason } => {
                write!(f, "Failed to open PTY for '{}': {}", command, reason)
            }
            Error::SpawnFailed { command, reason } => {
                write!(f, "Failed to launch interpreter '{}': {}", command, reason)
            }
            Error::ReaderCloneFailed { reason } => {
                write!(f, "Failed to clone output reader: {}", reason)
            }
            Error::WriterTakeFailed { reason } => {
                write!(f, "Failed to take input writer: {}", reason)
            }
            Error::StreamReadFailed { reason } => {
                write!(f, "Failed to read interpreter output: {}", reason)
            }
            Error::InputSendFailed { reason } => {
                write!(f, "Failed to send input to interpreter: {}", reason)
            }
            Error::WriteAfterTermination => {
                write!(f, "Input sent after the interpreter process terminated")
            }
            Error::SessionAlreadyActive => {
                write!(f, "A script session is already running")
            }

            // Script artifact errors
            Error::ArtifactWriteFailed { path, reason } => {
                write!(f, "Failed to write script file '{}': {}", path.display(), reason)
            }
            Error::CleanupFailed { path, reason } => {
                write!(f, "Failed to delete script file '{}': {}", path.display(), reason)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigSaveFailed { path, reason } => {
                write!(f, "Failed to save config to '{}': {}", path.display(), reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
            Error::Regex(err) => write!(f, "Regex compilation error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Regex(err)
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
