//! The todo-stack parser
//!
//! Lambda-calculus grammar:
//!
//! ```text
//! Expression        -> ApplicationOrAtom
//! Expression        -> [Binder] [Identifier]? LambdaRest
//! LambdaRest        -> [Dot] Expression
//! LambdaRest        -> [Identifier] LambdaRest        (curried binder sugar)
//! ApplicationOrAtom -> Atom+                           (left-associative)
//! Atom              -> [Identifier] | [Blank] | [OpenParen] Expression [CloseParen]
//! ```
//!
//! Rather than recursive descent, the parser keeps an explicit stack of containers, each
//! accumulating one in-progress subtree:
//!
//! - `Root`, at the bottom, never popped before end of input
//! - `Paren`, opened by `(`
//! - `Lambda`, opened by a binder, one per parameter
//!
//! Atoms fold into the top container by left-associative application. When a container
//! is finished (on `)` or at end of input) it is finalized into a subtree and folded into
//! the container below it. The same finalize-and-fold step serves every container kind,
//! which keeps end-of-input handling a single loop.
//!
//! The parser is total: whatever the tokens, a tree comes out. Missing pieces become
//! zero-width blanks and the problem is recorded as a [`ParseError`].

use super::error::ParseError;
use crate::lambda::ast::Tree;
use crate::lambda::range::{Position, Range};
use crate::lambda::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::iter::Peekable;
use std::slice;
use tracing::{debug, trace};

/// A structural tree annotated with source ranges, as produced by the parser.
pub type SyntaxTree = Tree<Range>;

/// Result of a parse: always a tree, plus whatever went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutput {
    pub expression: SyntaxTree,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug)]
enum Container {
    Root,
    Paren {
        open: Range,
    },
    Lambda {
        parameter: String,
        parameter_range: Range,
        start: Position,
    },
}

/// One stack entry: the subtree accumulated so far, if any, and what encloses it.
#[derive(Debug)]
struct Todo {
    node: Option<SyntaxTree>,
    container: Container,
}

impl Todo {
    fn new(container: Container) -> Self {
        Self {
            node: None,
            container,
        }
    }

    /// Fold `tree` in by left-associative application.
    fn insert(&mut self, tree: SyntaxTree) {
        self.node = Some(match self.node.take() {
            None => tree,
            Some(function) => {
                let range = function.range().union(&tree.range());
                Tree::application(function, tree, range)
            }
        });
    }

    /// Turn the container into a finished subtree.
    ///
    /// An empty container yields a zero-width blank at `hole`. A paren's range is
    /// stretched to cover both brackets, ending at `close`.
    fn finalize(self, hole: Position, close: Position) -> SyntaxTree {
        let node = self
            .node
            .unwrap_or_else(|| Tree::blank(Range::empty(hole)));

        match self.container {
            Container::Root => node,
            Container::Lambda {
                parameter,
                parameter_range,
                start,
            } => {
                let range = Range::new(start, node.range().end);
                Tree::abstraction(parameter, node, parameter_range, range)
            }
            Container::Paren { open } => {
                let mut node = node;
                node.metadata = Range::new(open.start, close);
                node
            }
        }
    }
}

struct Parser<'a> {
    todo: Vec<Todo>,
    errors: Vec<ParseError>,
    tokens: Peekable<slice::Iter<'a, Token>>,
    /// End of the last consumed token.
    end: Position,
}

/// Parse a token sequence into a range-annotated tree.
pub fn parse(tokens: &[Token]) -> ParseOutput {
    let mut parser = Parser {
        todo: vec![Todo::new(Container::Root)],
        errors: Vec::new(),
        tokens: tokens.iter().peekable(),
        end: Position::ZERO,
    };

    while let Some(token) = parser.tokens.next() {
        let hole = parser.end;
        parser.end = token.range.end;
        trace!(kind = %token.kind, text = %token.text, depth = parser.todo.len(), "token");

        match token.kind {
            TokenKind::OpenParen => parser.todo.push(Todo::new(Container::Paren {
                open: token.range,
            })),
            TokenKind::Identifier => parser
                .top()
                .insert(Tree::variable(token.text.clone(), token.range)),
            TokenKind::Blank => parser.top().insert(Tree::blank(token.range)),
            TokenKind::CloseParen => parser.close(token, hole),
            TokenKind::Dot => parser
                .errors
                .push(ParseError::UnexpectedToken(token.clone())),
            TokenKind::LambdaBinder => parser.binder(token),
        }
    }

    let expression = parser.finish();
    debug!(
        tokens = tokens.len(),
        errors = parser.errors.len(),
        "parsed expression"
    );

    ParseOutput {
        expression,
        errors: parser.errors,
    }
}

impl<'a> Parser<'a> {
    fn top(&mut self) -> &mut Todo {
        if self.todo.is_empty() {
            self.todo.push(Todo::new(Container::Root));
        }
        let last = self.todo.len() - 1;
        &mut self.todo[last]
    }

    fn consume(&mut self, token: &Token) {
        self.tokens.next();
        self.end = token.range.end;
    }

    /// Pop and fold containers up to and including the nearest paren.
    fn close(&mut self, token: &Token, hole: Position) {
        while let Some(todo) = self.todo.pop() {
            match todo.container {
                Container::Root => {
                    // Nothing left to close: keep what the root holds and carry on
                    self.errors.push(ParseError::ExtraClose(token.clone()));
                    self.todo.push(todo);
                    return;
                }
                Container::Paren { .. } | Container::Lambda { .. } => {
                    let is_paren = matches!(todo.container, Container::Paren { .. });
                    if todo.node.is_none() {
                        self.errors
                            .push(ParseError::EmptyExpression(token.clone()));
                    }
                    let tree = todo.finalize(hole, token.range.end);
                    self.top().insert(tree);
                    if is_paren {
                        return;
                    }
                }
            }
        }
    }

    /// Handle a binder and collect its parameters, pushing one lambda container each.
    fn binder(&mut self, binder: &Token) {
        if self.top().node.is_some() {
            self.errors
                .push(ParseError::UnexpectedToken(binder.clone()));
            return;
        }

        let Some(first) = self.tokens.peek().copied() else {
            self.errors.push(ParseError::UnexpectedEnd(self.end));
            return;
        };
        match first.kind {
            TokenKind::Identifier => {
                self.consume(first);
                self.todo.push(Todo::new(Container::Lambda {
                    parameter: first.text.clone(),
                    parameter_range: first.range,
                    start: binder.range.start,
                }));
            }
            TokenKind::Dot => {
                // Elided parameter: `λ. e`
                self.consume(first);
                self.todo.push(Todo::new(Container::Lambda {
                    parameter: String::new(),
                    parameter_range: Range::empty(first.range.start),
                    start: binder.range.start,
                }));
                return;
            }
            _ => {
                // Left in place to be handled as an ordinary token
                self.errors.push(ParseError::UnexpectedToken(first.clone()));
                return;
            }
        }

        // Running out of input here is reported when the empty body is finalized
        while let Some(next) = self.tokens.peek().copied() {
            match next.kind {
                TokenKind::Identifier => {
                    self.consume(next);
                    self.todo.push(Todo::new(Container::Lambda {
                        parameter: next.text.clone(),
                        parameter_range: next.range,
                        start: next.range.start,
                    }));
                }
                TokenKind::Dot => {
                    self.consume(next);
                    return;
                }
                _ => {
                    self.errors.push(ParseError::UnexpectedToken(next.clone()));
                    return;
                }
            }
        }
    }

    /// Finalize every open container, innermost first.
    fn finish(&mut self) -> SyntaxTree {
        let mut finished: Option<SyntaxTree> = None;

        while let Some(mut todo) = self.todo.pop() {
            if let Some(child) = finished.take() {
                todo.insert(child);
            }
            match &todo.container {
                Container::Paren { open } => {
                    self.errors.push(ParseError::UnclosedParenthesis(*open));
                }
                Container::Lambda { .. } if todo.node.is_none() => {
                    self.errors.push(ParseError::UnexpectedEnd(self.end));
                }
                _ => {}
            }
            finished = Some(todo.finalize(self.end, self.end));
        }

        finished.unwrap_or_else(|| Tree::blank(Range::empty(self.end)))
    }
}
