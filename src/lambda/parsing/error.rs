//! Parse errors
//!
//! None of these abort parsing; they are collected next to the best-effort tree.

use crate::lambda::range::{Position, Range};
use crate::lambda::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ParseError {
    /// A token where the grammar forbids one: a bare dot, a binder after a value in the
    /// same group, a non-identifier where a parameter was expected.
    #[error("unexpected {} {:?} at {}", .0.kind, .0.text, .0.range.start)]
    UnexpectedToken(Token),
    /// Input ended while a binder's parameter or body was still expected.
    #[error("unexpected end of input at {0}")]
    UnexpectedEnd(Position),
    /// A closing bracket with no matching open bracket.
    #[error("unmatched closing parenthesis at {}", .0.range.start)]
    ExtraClose(Token),
    /// A group or binder body closed before receiving any expression. Carries the
    /// closing bracket.
    #[error("empty expression before {:?} at {}", .0.text, .0.range.start)]
    EmptyExpression(Token),
    /// Input ended with a group still open. Carries the open bracket's range.
    #[error("unclosed parenthesis opened at {}", .0.start)]
    UnclosedParenthesis(Range),
}

/// Discriminant of [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseErrorKind {
    UnexpectedToken,
    UnexpectedEnd,
    ExtraClose,
    EmptyExpression,
    UnclosedParenthesis,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::UnexpectedToken(_) => ParseErrorKind::UnexpectedToken,
            ParseError::UnexpectedEnd(_) => ParseErrorKind::UnexpectedEnd,
            ParseError::ExtraClose(_) => ParseErrorKind::ExtraClose,
            ParseError::EmptyExpression(_) => ParseErrorKind::EmptyExpression,
            ParseError::UnclosedParenthesis(_) => ParseErrorKind::UnclosedParenthesis,
        }
    }

    /// The token that triggered the error, if there was one.
    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseError::UnexpectedToken(token)
            | ParseError::ExtraClose(token)
            | ParseError::EmptyExpression(token) => Some(token),
            ParseError::UnexpectedEnd(_) | ParseError::UnclosedParenthesis(_) => None,
        }
    }

    /// Where to highlight the error.
    pub fn range(&self) -> Range {
        match self {
            ParseError::UnexpectedEnd(at) => Range::empty(*at),
            ParseError::UnclosedParenthesis(open) => *open,
            other => other
                .token()
                .map(|token| token.range)
                .unwrap_or_default(),
        }
    }
}
