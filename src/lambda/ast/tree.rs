//! Structural representation
//!
//! Nodes own their children directly. This is the form the parser produces and the one
//! that is stringified; it is self-contained and compares structurally.
//!
//! Left-associative application makes long chains as deep as they are long, so every
//! traversal here keeps its own work stack instead of recursing. That includes `Drop`,
//! `Clone` and equality.

use super::node::{Node, NodeData, NodeTag};
use crate::lambda::range::Range;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};

/// A self-contained expression tree.
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree<M> {
    pub node: Node<Box<Tree<M>>, M>,
}

impl<M> Tree<M> {
    pub fn blank(metadata: M) -> Self {
        Node::blank(metadata).into()
    }

    pub fn variable(name: impl Into<String>, metadata: M) -> Self {
        Node::variable(name, metadata).into()
    }

    pub fn abstraction(
        parameter: impl Into<String>,
        body: Tree<M>,
        parameter_metadata: M,
        metadata: M,
    ) -> Self {
        Node::abstraction(parameter, Box::new(body), parameter_metadata, metadata).into()
    }

    pub fn application(function: Tree<M>, argument: Tree<M>, metadata: M) -> Self {
        Node::application(Box::new(function), Box::new(argument), metadata).into()
    }

    /// Take the root node apart. `Tree` has its own `Drop`, so its field can't be moved
    /// out by a pattern.
    pub fn into_node(self) -> Node<Box<Tree<M>>, M> {
        let tree = ManuallyDrop::new(self);
        // SAFETY: `tree` is never touched or dropped again, so the node is moved out
        // exactly once.
        unsafe { std::ptr::read(&tree.node) }
    }

    /// Rewrite every node's metadata and every abstraction parameter's metadata,
    /// keeping the shape.
    ///
    /// `f` sees metadata in pre-order, a node's own before its parameter's.
    pub fn map_metadata<N>(self, mut f: impl FnMut(M) -> N) -> Tree<N> {
        self.map_with(&mut f)
    }

    fn map_with<N>(self, f: &mut impl FnMut(M) -> N) -> Tree<N> {
        build_post_order(self, |tree| {
            let Node { data, metadata } = tree.into_node();
            let metadata = f(metadata);
            let mut children = Vec::new();
            let data = data.map(|child| children.push(*child), |meta| f(meta));
            (Node { data, metadata }, children)
        })
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut size = 0;
        self.walk(&mut |_| size += 1);
        size
    }

    /// Number of nodes on the longest path from the root down to a leaf.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((tree, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(tree.node.children().into_iter().map(|child| (&**child, depth + 1)));
        }
        deepest
    }

    /// Visit every node in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Tree<M>)) {
        let mut pending = vec![self];
        while let Some(tree) = pending.pop() {
            visit(tree);
            pending.extend(tree.node.children().into_iter().rev().map(|child| &**child));
        }
    }
}

/// Build a tree bottom-up from a root of any kind.
///
/// `open` splits one item into its node, with `()` where the children go, and the
/// items for those children in order. Each node is assembled once all of its children
/// are.
pub(super) fn build_post_order<T, N>(
    root: T,
    mut open: impl FnMut(T) -> (Node<(), N>, Vec<T>),
) -> Tree<N> {
    enum Step<T, N> {
        Open(T),
        Assemble(Node<(), N>),
    }

    let mut pending = vec![Step::Open(root)];
    let mut built: Vec<Tree<N>> = Vec::new();
    while let Some(step) = pending.pop() {
        match step {
            Step::Open(item) => {
                let (shell, children) = open(item);
                pending.push(Step::Assemble(shell));
                pending.extend(children.into_iter().rev().map(Step::Open));
            }
            Step::Assemble(Node { data, metadata }) => {
                let first = built.len() - data.children().len();
                let mut children = built.drain(first..);
                let data = data.map(
                    |()| match children.next() {
                        Some(child) => Box::new(child),
                        None => unreachable!("children are assembled before their parent"),
                    },
                    |meta| meta,
                );
                drop(children);
                built.push(Node { data, metadata }.into());
            }
        }
    }
    match built.pop() {
        Some(tree) => tree,
        None => unreachable!("the root is always assembled"),
    }
}

/// Move the children out of `data`, leaving a blank behind.
fn detach_children<M>(data: &mut NodeData<Box<Tree<M>>, M>, into: &mut Vec<Box<Tree<M>>>) {
    if matches!(data, NodeData::Blank | NodeData::Variable { .. }) {
        return;
    }
    match mem::replace(data, NodeData::Blank) {
        NodeData::Abstraction { body, .. } => into.push(body),
        NodeData::Application { function, argument } => {
            into.push(function);
            into.push(argument);
        }
        NodeData::Blank | NodeData::Variable { .. } => {}
    }
}

impl<M> Drop for Tree<M> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(&mut self.node.data, &mut pending);
        while let Some(mut child) = pending.pop() {
            detach_children(&mut child.node.data, &mut pending);
        }
    }
}

impl<M: Clone> Clone for Tree<M> {
    fn clone(&self) -> Self {
        build_post_order(self, |tree| {
            let (data, children) = tree.data.split();
            let children = children.into_iter().map(|child| &**child).collect();
            (
                Node {
                    data,
                    metadata: tree.metadata.clone(),
                },
                children,
            )
        })
    }
}

impl<M: PartialEq> PartialEq for Tree<M> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.metadata != right.metadata {
                return false;
            }
            match (&left.data, &right.data) {
                (NodeData::Blank, NodeData::Blank) => {}
                (NodeData::Variable { name: a }, NodeData::Variable { name: b }) if a == b => {}
                (
                    NodeData::Abstraction { parameter: p, body: a },
                    NodeData::Abstraction { parameter: q, body: b },
                ) if p == q => pending.push((&**a, &**b)),
                (
                    NodeData::Application { function: f, argument: a },
                    NodeData::Application { function: g, argument: b },
                ) => {
                    pending.push((&**a, &**b));
                    pending.push((&**f, &**g));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<M: Eq> Eq for Tree<M> {}

impl<M: Hash> Hash for Tree<M> {
    /// Hashes the pre-order sequence of nodes, which determines the tree.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.walk(&mut |tree| {
            tree.tag().hash(state);
            tree.metadata.hash(state);
            match &tree.data {
                NodeData::Variable { name } => name.hash(state),
                NodeData::Abstraction { parameter, .. } => parameter.hash(state),
                NodeData::Blank | NodeData::Application { .. } => {}
            }
        });
    }
}

impl Tree<Range> {
    pub fn range(&self) -> Range {
        self.metadata
    }
}

impl<M> From<Node<Box<Tree<M>>, M>> for Tree<M> {
    fn from(node: Node<Box<Tree<M>>, M>) -> Self {
        Tree { node }
    }
}

impl<M> Deref for Tree<M> {
    type Target = Node<Box<Tree<M>>, M>;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

impl<M> DerefMut for Tree<M> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.node
    }
}

/// Glyph for a blank. It lexes back to a blank, so compact output re-parses.
pub const BLANK_GLYPH: &str = "_";
/// Stand-in for a variable with an empty name. This one does not re-lex.
pub const UNNAMED_GLYPH: &str = "?";

/// Render `tree` in the canonical compact form.
///
/// - Blank: `_`
/// - Variable: its name, or `?` when the name is empty
/// - Abstraction: `λ<param>. <body>`
/// - Application: `<fn> <arg>`, with the function parenthesised iff it is an abstraction,
///   and the argument iff it is an abstraction or an application
pub fn stringify_compact<M>(tree: &Tree<M>) -> String {
    enum Piece<'a, M> {
        Tree(&'a Tree<M>),
        Text(&'static str),
    }

    fn wrapped<'a, M>(tree: &'a Tree<M>, parens: bool, pending: &mut Vec<Piece<'a, M>>) {
        if parens {
            pending.push(Piece::Text(")"));
            pending.push(Piece::Tree(tree));
            pending.push(Piece::Text("("));
        } else {
            pending.push(Piece::Tree(tree));
        }
    }

    let mut out = String::new();
    let mut pending = vec![Piece::Tree(tree)];
    while let Some(piece) = pending.pop() {
        let tree = match piece {
            Piece::Text(text) => {
                out.push_str(text);
                continue;
            }
            Piece::Tree(tree) => tree,
        };
        match &tree.data {
            NodeData::Blank => out.push_str(BLANK_GLYPH),
            NodeData::Variable { name } if name.is_empty() => out.push_str(UNNAMED_GLYPH),
            NodeData::Variable { name } => out.push_str(name),
            NodeData::Abstraction { parameter, body } => {
                out.push('λ');
                out.push_str(&parameter.name);
                out.push_str(". ");
                pending.push(Piece::Tree(&**body));
            }
            NodeData::Application { function, argument } => {
                // Pushed in reverse: the function comes out first.
                wrapped(
                    &**argument,
                    matches!(argument.tag(), NodeTag::Abstraction | NodeTag::Application),
                    &mut pending,
                );
                pending.push(Piece::Text(" "));
                wrapped(&**function, matches!(function.tag(), NodeTag::Abstraction), &mut pending);
            }
        }
    }
    out
}

impl<M> fmt::Display for Tree<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&stringify_compact(self))
    }
}
