//! Interpreter Command Line
//!
//! Builds the platform-normalized command line for one script run. The
//! interpreter binary is resolved through a launcher prefix because
//! discovery differs by platform: `cmd /c` consults the Windows shell's
//! PATH logic, `/usr/bin/env` resolves against the login environment on
//! POSIX hosts.

use std::fmt;

use crate::config::InterpreterConfig;

/// An immutable, platform-normalized interpreter command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    tokens: Vec<String>,
}

impl CommandSpec {
    /// Build the command line for the current host platform
    pub fn new(interpreter: &InterpreterConfig) -> Self {
        Self::for_platform(interpreter, cfg!(windows))
    }

    /// Build the command line for an explicit platform family
    pub fn for_platform(interpreter: &InterpreterConfig, windows: bool) -> Self {
        let mut tokens: Vec<String> = if windows {
            vec!["cmd".to_string(), "/c".to_string()]
        } else {
            vec!["/usr/bin/env".to_string()]
        };

        tokens.push(interpreter.binary.clone());
        if !interpreter.script_flag.is_empty() {
            tokens.push(interpreter.script_flag.clone());
        }
        tokens.push(interpreter.script_path.to_string_lossy().into_owned());

        Self { tokens }
    }

    /// The launcher program (first token)
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Arguments after the launcher program
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// The full token sequence
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}
