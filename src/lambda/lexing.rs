//! Lexer
//!
//!     Single pass over the input, driven by the pattern table in
//!     [`DEFINITIONS`](crate::lambda::token::DEFINITIONS). At every cursor position the
//!     patterns are tried in order, anchored at the cursor; the first match wins.
//!
//! Error Recovery
//!
//!     Lexing never stops early. When no pattern matches, a [`LexError`] covering exactly
//!     one codepoint is recorded and that codepoint is skipped. All errors are collected
//!     in one pass, and every token that did lex is still returned, since the parser is
//!     expected to run on partial token streams while text is being edited.
//!
//! Coverage
//!
//!     Tokens, errors and the implicit trivia between them tile the input: concatenating
//!     their spans covers `[0, len)` with no gaps and no overlaps.

use crate::lambda::range::{Position, Range};
use crate::lambda::token::{Token, DEFINITIONS};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// A codepoint no pattern could match.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("unexpected character {text:?} at {}", .range.start)]
pub struct LexError {
    pub range: Range,
    pub text: String,
}

/// Everything one lex pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexerOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexerOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tokenize `input`.
pub fn lex(input: &str) -> LexerOutput {
    let mut output = LexerOutput::default();
    let mut pos = Position::ZERO;
    let mut byte = 0;

    'outer: while byte < input.len() {
        let rest = &input[byte..];

        for def in DEFINITIONS.iter() {
            let Some(text) = def.match_at(rest) else {
                continue;
            };

            let start = pos;
            pos = pos.advance(text);
            byte += text.len();

            if let Some(kind) = def.kind {
                output
                    .tokens
                    .push(Token::new(kind, text, Range::new(start, pos)));
            }
            continue 'outer;
        }

        // No pattern matched: record the codepoint and skip it
        let Some(ch) = rest.chars().next() else {
            break;
        };
        let start = pos;
        let text = ch.to_string();
        pos = pos.advance(&text);
        byte += ch.len_utf8();
        output.errors.push(LexError {
            range: Range::new(start, pos),
            text,
        });
    }

    debug!(
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "lexed {} codepoints",
        pos.index
    );

    output
}
