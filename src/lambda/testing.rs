//! Testing utilities
//!
//! Two tools, meant to be used together in parser tests:
//!
//! 1. **Factories** ([`pl`], [`id`], [`assemble`], ...) build token sequences without going
//!    through the lexer, so a parser test states exactly which tokens it feeds in.
//!    [`assemble`] lays the tokens out on one row, one space apart, which makes every
//!    expected range easy to count by hand:
//!
//!    ```rust-example
//!    // "λ x . y"
//!    let tokens = assemble(&[lambda(), id("x"), dot(), id("y")]);
//!    // λ at [0,1), x at [2,3), . at [4,5), y at [6,7)
//!    ```
//!
//! 2. **[`assert_tree`]**, a fluent API checking shape, names and ranges of a whole tree in
//!    one expression:
//!
//!    ```rust-example
//!    assert_tree(&output.expression)
//!        .abstraction("x")
//!        .range(0, 7)
//!        .parameter_range(2, 3)
//!        .body(|body| {
//!            body.variable("y").range(6, 7);
//!        });
//!    ```
//!
//! Both are compiled into the library, not only under `cfg(test)`, so integration tests in
//! `tests/` can use them.

mod testing_assertions;
mod testing_factories;

pub use testing_assertions::{assert_tree, TreeAssertion};
pub use testing_factories::{assemble, dot, hole, id, lambda, pl, pos, pr, range};
