//! Lexical Scanner
//!
//! Single left-to-right scan over the source text using one compiled
//! ordered-alternation pattern. Alternation order is match priority at each
//! position: keyword, paren, brace, bracket, semicolon, string, comment.
//! Strings are double-quoted with backslash escapes; line comments run to
//! end-of-line and block comments are non-greedy across lines. Text between
//! matches is left untagged.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kotlin hard keywords recognized by the scanner, word-boundary matched
pub const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "val", "var", "when", "while",
];

/// Kind tag of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Reserved keyword
    Keyword,
    /// `(` or `)`
    Paren,
    /// `{` or `}`
    Brace,
    /// `[` or `]`
    Bracket,
    /// Statement separator `;`
    Semicolon,
    /// Double-quoted string literal
    StringLiteral,
    /// Line or block comment
    Comment,
}

/// A classified lexical unit with a half-open byte range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Kind tag
    pub kind: TokenKind,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl Token {
    /// Length of the token in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the token covers no text
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Capture group name per token kind, in match-priority order
const TOKEN_GROUPS: &[(&str, TokenKind)] = &[
    ("keyword", TokenKind::Keyword),
    ("paren", TokenKind::Paren),
    ("brace", TokenKind::Brace),
    ("bracket", TokenKind::Bracket),
    ("semicolon", TokenKind::Semicolon),
    ("string", TokenKind::StringLiteral),
    ("comment", TokenKind::Comment),
];

/// The combined token pattern, compiled once
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let keywords = KEYWORDS.join("|");
    let pattern = format!(
        concat!(
            r"(?P<keyword>\b(?:{keywords})\b)",
            r"|(?P<paren>[()])",
            r"|(?P<brace>[{{}}])",
            r"|(?P<bracket>[\[\]])",
            r"|(?P<semicolon>;)",
            r#"|(?P<string>"(?:[^"\\]|\\.)*")"#,
            r"|(?P<comment>//[^\n]*|/\*(?s:.)*?\*/)",
        ),
        keywords = keywords
    );
    Regex::new(&pattern).expect("token pattern is valid")
});

/// Scan the text into classified, non-overlapping tokens in source order
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for caps in TOKEN_PATTERN.captures_iter(text) {
        for (name, kind) in TOKEN_GROUPS {
            if let Some(m) = caps.name(name) {
                tokens.push(Token {
                    kind: *kind,
                    start: m.start(),
                    end: m.end(),
                });
                break;
            }
        }
    }
    tokens
}
