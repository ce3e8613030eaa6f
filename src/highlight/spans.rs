//! Style Spans
//!
//! Folds the scanner's token stream into a sequence of contiguous style
//! spans covering the whole text: an untagged gap before each token
//! (possibly zero length), a tagged span for the token itself, and a final
//! untagged span for trailing text. The span lengths always sum to the
//! text's length, so the consumer can apply them without re-measuring.

use serde::{Deserialize, Serialize};

use super::scanner::{tokenize, TokenKind};

/// Presentation class attached to a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleClass {
    Keyword,
    Paren,
    Brace,
    Bracket,
    Semicolon,
    StringLiteral,
    Comment,
}

impl StyleClass {
    /// Stylesheet class name used by the editor surface
    pub fn css_class(&self) -> &'static str {
        match self {
            StyleClass::Keyword => "keyword",
            StyleClass::Paren => "paren",
            StyleClass::Brace => "brace",
            StyleClass::Bracket => "bracket",
            StyleClass::Semicolon => "semicolon",
            StyleClass::StringLiteral => "string",
            StyleClass::Comment => "comment",
        }
    }
}

impl From<TokenKind> for StyleClass {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Keyword => StyleClass::Keyword,
            TokenKind::Paren => StyleClass::Paren,
            TokenKind::Brace => StyleClass::Brace,
            TokenKind::Bracket => StyleClass::Bracket,
            TokenKind::Semicolon => StyleClass::Semicolon,
            TokenKind::StringLiteral => StyleClass::StringLiteral,
            TokenKind::Comment => StyleClass::Comment,
        }
    }
}

/// A contiguous run of text with zero or one style class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpan {
    /// Style class, or `None` for untagged text
    pub class: Option<StyleClass>,
    /// Length of the run in bytes
    pub len: usize,
}

impl StyleSpan {
    /// An untagged span
    pub fn untagged(len: usize) -> Self {
        Self { class: None, len }
    }

    /// A span tagged with a style class
    pub fn tagged(class: StyleClass, len: usize) -> Self {
        Self {
            class: Some(class),
            len,
        }
    }
}

/// Compute the style spans for the given source text.
///
/// The returned spans partition the text exactly: left-to-right,
/// non-overlapping, lengths summing to `text.len()`. Calling this twice on
/// the same text yields the same spans.
pub fn compute_highlighting(text: &str) -> Vec<StyleSpan> {
    let mut spans = Vec::new();
    let mut last_end = 0;
    for token in tokenize(text) {
        spans.push(StyleSpan::untagged(token.start - last_end));
        spans.push(StyleSpan::tagged(token.kind.into(), token.len()));
        last_end = token.end;
    }
    spans.push(StyleSpan::untagged(text.len() - last_end));
    spans
}

/// Caller-side edit filter: recompute highlighting only for edits that
/// change character content. Style-only changes replace a range with
/// identical text; re-running the highlighter on those would recurse into
/// endless recomputation.
pub fn is_content_change(inserted: &str, removed: &str) -> bool {
    inserted != removed
}
