//! Lexical Highlighting
//!
//! A pure, single-pass highlighter: source text in, ordered style spans out.
//! The scanner classifies non-overlapping lexical tokens (keywords, bracket
//! kinds, strings, comments, statement separators) and the span builder folds
//! them into a gap/token partition of the whole text. Stateless between
//! calls; the caller decides when to recompute via [`is_content_change`].

pub mod scanner;
pub mod spans;

// Re-exports for convenience
pub use scanner::{tokenize, Token, TokenKind, KEYWORDS};
pub use spans::{compute_highlighting, is_content_change, StyleClass, StyleSpan};
