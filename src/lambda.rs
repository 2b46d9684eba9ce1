//! Main module for lambda-syntax library functionality
//!
//! The pipeline is two passes, each total:
//!
//! 1. [`lexing::lex`] turns source text into tokens, skipping what it cannot recognise
//! 2. [`parsing::parse`] turns tokens into a range-annotated [`ast::Tree`], filling gaps
//!    with blanks
//!
//! [`parse_source`] runs both and keeps every error next to the resulting tree.

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod range;
pub mod testing;
pub mod token;

use lexing::{lex, LexError, LexerOutput};
use parsing::{parse, ParseError, ParseOutput, SyntaxTree};
use serde::{Deserialize, Serialize};
use token::Token;
use tracing::debug;

/// Everything produced from one source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOutput {
    pub tokens: Vec<Token>,
    pub expression: SyntaxTree,
    pub lex_errors: Vec<LexError>,
    pub parse_errors: Vec<ParseError>,
}

impl SourceOutput {
    pub fn is_ok(&self) -> bool {
        self.lex_errors.is_empty() && self.parse_errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.lex_errors.len() + self.parse_errors.len()
    }
}

/// Lex and parse `text`.
pub fn parse_source(text: &str) -> SourceOutput {
    let LexerOutput {
        tokens,
        errors: lex_errors,
    } = lex(text);
    let ParseOutput {
        expression,
        errors: parse_errors,
    } = parse(&tokens);

    debug!(
        lex_errors = lex_errors.len(),
        parse_errors = parse_errors.len(),
        "parsed source"
    );

    SourceOutput {
        tokens,
        expression,
        lex_errors,
        parse_errors,
    }
}
