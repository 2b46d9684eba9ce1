//! # lambda-syntax
//!
//! Lexer, parser and dual tree representation for the untyped lambda calculus, built for
//! structural editors: parsing never fails, every node carries its source range, and the
//! tree can be flattened into a keyed dictionary for node-by-node editing.
//!
//! ## Testing
//!
//! For token factories and tree assertions, see the [testing module](lambda::testing).

pub mod lambda;

pub use lambda::{parse_source, SourceOutput};
