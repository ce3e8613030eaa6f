//! Output Line Model
//!
//! Represents a single line of the interpreter's merged output stream,
//! together with its diagnostic classification. Lines are produced by the
//! output relay and consumed per event; the core does not retain them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{self, DiagnosticMatcher};

/// Classification of an output line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LineKind {
    /// Ordinary program or interpreter output
    #[default]
    Normal,
    /// Error-like line carrying a 1-based source line number
    Diagnostic {
        /// Line in the script source the diagnostic points at (1-based)
        source_line: u32,
    },
}

/// A single line of merged interpreter output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputLine {
    /// The line text, without its terminator
    pub text: String,

    /// Classification derived from the diagnostic patterns
    pub kind: LineKind,

    /// Position in the run's output (0-based sequence number)
    pub line_number: usize,

    /// When this line was received
    pub timestamp: DateTime<Utc>,
}

impl OutputLine {
    /// Create a new, unclassified output line
    pub fn new(text: String, line_number: usize) -> Self {
        Self {
            text,
            kind: LineKind::Normal,
            line_number,
            timestamp: Utc::now(),
        }
    }

    /// Create an output line classified against the given matcher
    pub fn classified(text: String, line_number: usize, matcher: &DiagnosticMatcher) -> Self {
        let kind = match matcher.classify(&text) {
            Some(source_line) => LineKind::Diagnostic { source_line },
            None => LineKind::Normal,
        };
        Self {
            text,
            kind,
            line_number,
            timestamp: Utc::now(),
        }
    }

    /// Whether this line is error-like
    pub fn is_diagnostic(&self) -> bool {
        matches!(self.kind, LineKind::Diagnostic { .. })
    }

    /// The 1-based source line this diagnostic points at, if any
    pub fn source_line(&self) -> Option<u32> {
        match self.kind {
            LineKind::Diagnostic { source_line } => Some(source_line),
            LineKind::Normal => None,
        }
    }

    /// The 0-based editor caret line for click-to-navigate, if error-like
    pub fn caret_line(&self) -> Option<usize> {
        self.source_line().map(diagnostics::caret_line)
    }
}

impl From<String> for OutputLine {
    fn from(text: String) -> Self {
        Self::new(text, 0)
    }
}

impl From<&str> for OutputLine {
    fn from(text: &str) -> Self {
        Self::new(text.to_string(), 0)
    }
}
