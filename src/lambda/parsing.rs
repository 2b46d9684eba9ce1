//! Parsing module for lambda expressions
//!
//! Turns the lexer's token sequence into a [`SyntaxTree`], a structural tree annotated
//! with source ranges. The parser never fails outright: malformed input still yields a
//! tree, with the gaps filled by blanks, alongside a list of [`ParseError`]s.
//!
//! Range conventions:
//!
//! - a variable or blank covers its token
//! - an application covers the union of its two sides
//! - an abstraction runs from its binder (or, for curried parameters after the first,
//!   from the parameter) to the end of its body
//! - a parenthesised expression is stretched to cover both brackets
//! - a parameter carries the range of its identifier token

mod error;
mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse, ParseOutput, SyntaxTree};
