//! ktspad - Execution and highlighting core for a Kotlin script scratchpad
//!
//! This library provides the headless core behind a script-scratchpad
//! editor: run the buffer through `kotlinc -script`, stream the
//! interpreter's merged output back as events, forward user input to the
//! running process, and lexically highlight the source on every edit.
//!
//! ## Features
//!
//! - **Script sessions:** One interpreter invocation at a time, spawned
//!   under a PTY via `portable-pty` so stderr and stdout arrive as a single
//!   ordered stream
//! - **Output relay:** Line events in receive order, a synthesized exit-code
//!   line, and guaranteed cleanup of the transient script file
//! - **Input forwarding:** Line-oriented, flush-on-write stdin channel that
//!   stays safe after process exit
//! - **Lexical highlighting:** Single-pass tokenizer producing style spans
//!   that partition the text exactly
//! - **Diagnostics:** Source-location classification of output lines for
//!   marking and click-to-navigate
//! - **Configuration:** TOML-based configuration files
//!
//! ## Module Organization
//!
//! - [`session`] - Session lifecycle, process spawning, output relay, events
//! - [`highlight`] - Tokenizer and style span computation
//! - [`diagnostics`] - Error-line classification
//! - [`models`] - Data structures (OutputLine, ScriptProcess, RunResult)
//! - [`config`] - Configuration loading and validation
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use ktspad::{init, SessionManager};
//!
//! # async fn run() -> ktspad::Result<()> {
//! let config = init()?;
//! let manager = SessionManager::new(config);
//!
//! let mut events = manager.subscribe().await;
//! let _session = manager.start("println(\"hi\")").await?;
//!
//! while let Some(event) = events.recv().await {
//!     // render lines, toggle busy state, wire click-to-navigate
//!     # let _ = event;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The crate uses a hybrid threading model:
//!
//! - **Caller's context:** Runs `start()`, `send_input()`, and the
//!   highlighter; never blocked by a running script
//! - **Relay task:** A tokio task per run that assembles, classifies, and
//!   publishes output lines, then handles exit and cleanup
//! - **Bridge threads:** Blocking PTY reads/writes on dedicated threads,
//!   connected to the relay via channels
//!
//! ## Safety and Reliability
//!
//! - All fallible operations return `Result`
//! - Every terminal relay path publishes `Ended`, so UI busy state cannot
//!   get stuck
//! - A single-flight guard refuses overlapping runs

#[macro_use]
extern crate tracing;

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod highlight;
pub mod models;
pub mod session;

// Re-exports for core functionality
pub use config::{Config, HighlightConfig, InterpreterConfig, SessionConfig};
pub use error::{Error, Result};
pub use session::{ScriptSession, SessionEvent, SessionManager};

// Convenience re-exports for common types
pub use config::loader::ConfigLoader;
pub use diagnostics::DiagnosticMatcher;
pub use highlight::{compute_highlighting, is_content_change, StyleClass, StyleSpan};
pub use models::{LineKind, OutputLine, RunResult, ScriptProcess};

// Version information
/// The current version of ktspad from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The library name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The library description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initialize ktspad with configuration from the default locations.
///
/// Loads the first configuration file found on the platform search paths,
/// falling back to defaults when none exists or loading fails, and
/// validates the result.
///
/// # Errors
///
/// Returns an error when the effective configuration fails validation.
pub fn init() -> Result<Config> {
    info!("Initializing {} v{}", NAME, VERSION);

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    };

    config.validate()?;

    debug!(
        "Interpreter: {} {} {}",
        config.interpreter.binary,
        config.interpreter.script_flag,
        config.interpreter.script_path.display()
    );
    Ok(config)
}

/// Initialize ktspad from an explicit configuration file
pub fn init_with_config(path: &std::path::Path) -> Result<Config> {
    let config = ConfigLoader::load_from(path)?;
    config.validate()?;
    Ok(config)
}
