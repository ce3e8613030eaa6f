//! Diagnostic Line Classification
//!
//! Classifies interpreter output lines that point back into the script
//! source. Two shapes are recognized against the script's file-extension
//! marker: the compiler diagnostic form `<path>.<ext>:<line>:<col>: <message>`
//! and the looser runtime exception form `<path>.<ext>:<line>`. Both carry a
//! 1-based source line number, used for visual marking and click-to-navigate.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

/// Matcher for source-location diagnostics in interpreter output.
///
/// Built per extension so callers can anchor the patterns to the actual
/// script file type instead of a hard-coded literal.
#[derive(Debug, Clone)]
pub struct DiagnosticMatcher {
    /// Compiler diagnostic shape: `<path>.<ext>:<line>:<col>: <message>`
    compiler: Regex,
    /// Runtime exception shape: `<path>.<ext>:<line>`
    runtime: Regex,
    /// Extension the patterns are anchored to (without the dot)
    extension: String,
}

impl DiagnosticMatcher {
    /// Build a matcher anchored to the given source extension (without dot)
    pub fn new(extension: &str) -> Result<Self> {
        let ext = regex::escape(extension);
        let compiler = Regex::new(&format!(r"\.{}:(\d+):\d+: ", ext))?;
        let runtime = Regex::new(&format!(r"\.{}:(\d+)", ext))?;
        Ok(Self {
            compiler,
            runtime,
            extension: extension.to_string(),
        })
    }

    /// Extension this matcher is anchored to
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Classify one output line.
    ///
    /// Returns the 1-based source line number if the line is error-like.
    /// The compiler shape is checked first; the first successfully parsed
    /// number wins when both shapes match.
    pub fn classify(&self, line: &str) -> Option<u32> {
        if let Some(caps) = self.compiler.captures(line) {
            if let Ok(n) = caps[1].parse::<u32>() {
                return Some(n);
            }
        }
        if let Some(caps) = self.runtime.captures(line) {
            if let Ok(n) = caps[1].parse::<u32>() {
                return Some(n);
            }
        }
        None
    }

    /// Whether the line is error-like at all
    pub fn is_diagnostic(&self, line: &str) -> bool {
        self.classify(line).is_some()
    }
}

/// Matcher for the default Kotlin script extension
static DEFAULT_MATCHER: Lazy<DiagnosticMatcher> = Lazy::new(|| {
    // The pattern is built from a fixed literal, so construction cannot fail
    DiagnosticMatcher::new(DEFAULT_EXTENSION).expect("default diagnostic patterns are valid")
});

/// Default script extension the matcher is anchored to
pub const DEFAULT_EXTENSION: &str = "kts";

/// Classify a line against the default `.kts` patterns
pub fn classify_line(line: &str) -> Option<u32> {
    DEFAULT_MATCHER.classify(line)
}

/// Convert a 1-based diagnostic line number to a 0-based editor caret line
pub fn caret_line(source_line: u32) -> usize {
    (source_line as usize).saturating_sub(1)
}
