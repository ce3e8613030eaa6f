//! Property-Based Tests for the Highlighter
//!
//! The partition invariant and determinism must hold for arbitrary input,
//! not just curated samples.

use proptest::prelude::*;

use ktspad::highlight::{compute_highlighting, tokenize};

proptest! {
    /// Span lengths always sum to the text length
    #[test]
    fn prop_spans_partition_any_text(text in ".*") {
        let spans = compute_highlighting(&text);
        let total: usize = spans.iter().map(|s| s.len).sum();
        prop_assert_eq!(total, text.len());
    }

    /// Kotlin-ish fragments with brackets, quotes, and comments still
    /// partition exactly
    #[test]
    fn prop_spans_partition_code_like_text(
        text in "[a-z(){}\\[\\];\"\\\\/*\n ]{0,200}"
    ) {
        let spans = compute_highlighting(&text);
        let total: usize = spans.iter().map(|s| s.len).sum();
        prop_assert_eq!(total, text.len());
    }

    /// The same text always yields the same spans
    #[test]
    fn prop_highlighting_is_deterministic(text in ".*") {
        prop_assert_eq!(compute_highlighting(&text), compute_highlighting(&text));
    }

    /// Tokens come out ordered and non-overlapping
    #[test]
    fn prop_tokens_are_ordered(text in ".*") {
        let tokens = tokenize(&text);
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for token in &tokens {
            prop_assert!(token.start < token.end);
            prop_assert!(token.end <= text.len());
        }
    }

    /// Tagged spans reproduce the token lengths in order
    #[test]
    fn prop_tagged_spans_match_tokens(text in ".*") {
        let tokens = tokenize(&text);
        let spans = compute_highlighting(&text);
        let tagged: Vec<usize> = spans
            .iter()
            .filter(|s| s.class.is_some())
            .map(|s| s.len)
            .collect();
        let token_lens: Vec<usize> = tokens.iter().map(|t| t.len()).collect();
        prop_assert_eq!(tagged, token_lens);
    }
}
