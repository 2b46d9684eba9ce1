//! Test factories for positions, ranges and tokens

use crate::lambda::range::{Position, Range};
use crate::lambda::token::{is_identifier, Token, TokenKind};

/// A position on the first row.
pub fn pos(index: usize) -> Position {
    Position::new(index, 0, index)
}

/// A range on the first row.
pub fn range(start: usize, end: usize) -> Range {
    Range::new(pos(start), pos(end))
}

fn unplaced(kind: TokenKind, text: &str) -> Token {
    Token::new(kind, text, Range::default())
}

/// `(`
pub fn pl() -> Token {
    unplaced(TokenKind::OpenParen, "(")
}

/// `)`
pub fn pr() -> Token {
    unplaced(TokenKind::CloseParen, ")")
}

/// `_`
pub fn hole() -> Token {
    unplaced(TokenKind::Blank, "_")
}

/// `.`
pub fn dot() -> Token {
    unplaced(TokenKind::Dot, ".")
}

/// `λ`
pub fn lambda() -> Token {
    unplaced(TokenKind::LambdaBinder, "λ")
}

/// An identifier token.
///
/// # Panics
///
/// If `name` would not lex as a single identifier.
pub fn id(name: &str) -> Token {
    assert!(is_identifier(name), "{name:?} is not a valid identifier");
    unplaced(TokenKind::Identifier, name)
}

/// Give each token a range as if the tokens were written on one row separated by single
/// spaces.
pub fn assemble(tokens: &[Token]) -> Vec<Token> {
    let mut index = 0;
    tokens
        .iter()
        .map(|token| {
            let start = index;
            let end = start + token.text.chars().count();
            index = end + 1;
            Token::new(token.kind, token.text.clone(), range(start, end))
        })
        .collect()
}
