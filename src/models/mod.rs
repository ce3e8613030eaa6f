//! Core data models for ktspad
//!
//! This module contains the data structures that represent the domain
//! entities of a script run: output lines with their diagnostic
//! classification, the interpreter process lifecycle, and run results.

pub mod output_line;
pub mod script_process;

// Re-exports for convenience
pub use output_line::{LineKind, OutputLine};
pub use script_process::{ProcessState, RunResult, ScriptProcess};
