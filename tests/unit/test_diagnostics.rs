//! Unit Tests for Diagnostic Line Classification
//!
//! Verifies both source-location shapes, extension anchoring, and the
//! classification carried on output lines.

use ktspad::diagnostics::{caret_line, classify_line};
use ktspad::{DiagnosticMatcher, LineKind, OutputLine};

#[test]
fn test_compiler_diagnostic_extracts_line_number() {
    let line = "TempKotlin.kts:7:3: error: type mismatch";
    assert_eq!(classify_line(line), Some(7));
}

#[test]
fn test_runtime_exception_extracts_line_number() {
    let line = "Exception in thread \"main\" java.lang.IllegalStateException at TempKotlin.kts:12";
    assert_eq!(classify_line(line), Some(12));
}

#[test]
fn test_ordinary_output_is_not_classified() {
    assert_eq!(classify_line("Hello from the script"), None);
    assert_eq!(classify_line("Exit code 0"), None);
    assert_eq!(classify_line("warning: something happened at line 4"), None);
}

#[test]
fn test_path_prefix_is_allowed() {
    let line = "/tmp/work/TempKotlin.kts:21:9: error: unresolved reference";
    assert_eq!(classify_line(line), Some(21));
}

#[test]
fn test_either_pattern_counts() {
    // The strict compiler shape fails without a column, the loose shape
    // still classifies the line
    assert_eq!(classify_line("script.kts:3"), Some(3));
    // Both shapes match; the number is extracted once
    assert_eq!(classify_line("script.kts:3:1: error: e"), Some(3));
}

#[test]
fn test_caret_line_is_zero_based() {
    assert_eq!(caret_line(7), 6);
    assert_eq!(caret_line(1), 0);
}

#[test]
fn test_output_line_classification() {
    let matcher = DiagnosticMatcher::new("kts").unwrap();

    let diag = OutputLine::classified(
        "TempKotlin.kts:7:3: error: type mismatch".to_string(),
        0,
        &matcher,
    );
    assert_eq!(diag.kind, LineKind::Diagnostic { source_line: 7 });
    assert_eq!(diag.caret_line(), Some(6));

    let plain = OutputLine::classified("all good".to_string(), 1, &matcher);
    assert_eq!(plain.kind, LineKind::Normal);
    assert_eq!(plain.caret_line(), None);
}

#[test]
fn test_matcher_follows_configured_extension() {
    let matcher = DiagnosticMatcher::new("gvy").unwrap();
    assert_eq!(matcher.classify("Script.gvy:5:1: error: oops"), Some(5));
    // The default extension no longer matches
    assert_eq!(matcher.classify("TempKotlin.kts:5:1: error: oops"), None);
    assert_eq!(matcher.extension(), "gvy");
}

#[test]
fn test_large_line_numbers() {
    assert_eq!(classify_line("big.kts:123456:1: error: far away"), Some(123456));
}
