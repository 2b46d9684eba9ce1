//! Token definitions for the lambda surface syntax
//!
//! The lexer is driven by an ordered table of [`Definition`]s. At each cursor position the
//! patterns are tried in table order and the first one that matches wins: there is no
//! longest-match rule across patterns. That is why `_x` lexes as a blank followed by the
//! identifier `x`, and why identifiers cannot contain `_`.
//!
//! Patterns whose kind is `None` are trivia: they are matched so the cursor moves past
//! them, but they never produce a token.

use crate::lambda::range::Range;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    LambdaBinder,
    Dot,
    /// A hole literal, `_` or `◯`
    Blank,
    Identifier,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::LambdaBinder => "LambdaBinder",
            TokenKind::Dot => "Dot",
            TokenKind::Blank => "Blank",
            TokenKind::Identifier => "Identifier",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexed token. Created by the lexer and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub range: Range,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, range: Range) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) @ {}", self.kind, self.text, self.range)
    }
}

/// One entry of the pattern table.
pub struct Definition {
    pub kind: Option<TokenKind>,
    pattern: Regex,
}

impl Definition {
    fn new(kind: Option<TokenKind>, pattern: &str) -> Self {
        // Anchor at the start of the haystack: the lexer hands in the unconsumed rest of
        // the input, and a match must begin exactly at the cursor.
        let anchored = format!("^(?:{})", pattern);
        Self {
            kind,
            pattern: Regex::new(&anchored).unwrap_or_else(|e| {
                panic!("invalid built-in token pattern {:?}: {}", pattern, e)
            }),
        }
    }

    /// The text this pattern matches at the start of `rest`, if any.
    ///
    /// Empty matches are rejected so the lexer always makes progress.
    pub fn match_at<'a>(&self, rest: &'a str) -> Option<&'a str> {
        self.pattern
            .find(rest)
            .map(|m| m.as_str())
            .filter(|text| !text.is_empty())
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Identifier syntax, also used to validate test shorthands.
pub const IDENTIFIER_PATTERN: &str = r"[A-Za-z][A-Za-z0-9]*";

/// The pattern table, in priority order.
pub static DEFINITIONS: Lazy<Vec<Definition>> = Lazy::new(|| {
    vec![
        Definition::new(Some(TokenKind::OpenParen), r"\("),
        Definition::new(Some(TokenKind::CloseParen), r"\)"),
        Definition::new(Some(TokenKind::Blank), r"_|◯"),
        Definition::new(Some(TokenKind::Dot), r"\."),
        Definition::new(Some(TokenKind::LambdaBinder), r"\\|λ"),
        Definition::new(Some(TokenKind::Identifier), IDENTIFIER_PATTERN),
        Definition::new(None, r"\s+"),
    ]
});

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{})$", IDENTIFIER_PATTERN))
        .unwrap_or_else(|e| panic!("invalid identifier pattern: {}", e))
});

/// Whether `text` is, in its entirety, a valid identifier.
pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text)
}
