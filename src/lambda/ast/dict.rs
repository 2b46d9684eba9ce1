//! Flattened representation
//!
//! Nodes live in a single arena, [`TreeDict`], and refer to their children through
//! [`TreeKey`] handles. Replacing one subtree is then a lookup by key instead of a
//! rebuild of the whole path from the root, which is what interactive editing needs.
//!
//! Ownership: the dictionary owns every node. Keys are plain handles, only meaningful
//! for the dictionary that issued them. Slots are never reused, so a key whose node was
//! removed misses instead of silently aliasing a newer node.
//!
//! Invariant (checked by [`TreeDict::validate`]): starting from the root, every key
//! reached through `body`/`function`/`argument` is present exactly once, no key has two
//! parents, and nothing else is stored.

use super::node::Node;
use super::tree::{build_post_order, Tree};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU32;
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// Opaque handle into a [`TreeDict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TreeKey(NonZeroU32);

impl TreeKey {
    fn from_slot(slot: usize) -> Self {
        let raw = u32::try_from(slot + 1)
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| panic!("tree dictionary exceeded {} nodes", u32::MAX - 1));
        TreeKey(raw)
    }

    fn slot(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl fmt::Display for TreeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the flattened form.
pub type FlatNode<M> = Node<TreeKey, M>;

/// Violations of the flattened-tree invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeDictError {
    #[error("key {0} is referenced but missing from the dictionary")]
    MissingKey(TreeKey),
    #[error("key {0} is referenced more than once")]
    SharedKey(TreeKey),
    #[error("{0} node(s) are stored but unreachable from the root")]
    Unreachable(usize),
    #[error("dictionary records {recorded} node(s) but stores {stored}")]
    CountMismatch { recorded: usize, stored: usize },
}

/// Arena of flattened nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDict<M> {
    slots: Vec<Option<FlatNode<M>>>,
    len: usize,
}

impl<M> Default for TreeDict<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> TreeDict<M> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Store a node under a fresh key.
    pub fn insert(&mut self, node: FlatNode<M>) -> TreeKey {
        let key = self.reserve();
        self.fill(key, node);
        key
    }

    /// Allocate a key whose node is filled in later, so parents can be keyed before
    /// their children.
    fn reserve(&mut self) -> TreeKey {
        self.slots.push(None);
        TreeKey::from_slot(self.slots.len() - 1)
    }

    fn fill(&mut self, key: TreeKey, node: FlatNode<M>) {
        let slot = &mut self.slots[key.slot()];
        if slot.is_none() {
            self.len += 1;
        }
        *slot = Some(node);
    }

    pub fn get(&self, key: TreeKey) -> Option<&FlatNode<M>> {
        self.slots.get(key.slot()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, key: TreeKey) -> Option<&mut FlatNode<M>> {
        self.slots.get_mut(key.slot()).and_then(Option::as_mut)
    }

    pub fn contains(&self, key: TreeKey) -> bool {
        self.get(key).is_some()
    }

    /// Remove a single node. Its children, if any, stay stored.
    pub fn remove(&mut self, key: TreeKey) -> Option<FlatNode<M>> {
        let removed = self.slots.get_mut(key.slot()).and_then(Option::take);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Remove every node below `key`, leaving `key` itself in place.
    pub(crate) fn remove_descendants(&mut self, key: TreeKey) {
        let mut pending: Vec<TreeKey> = match self.get(key) {
            Some(node) => node.children().into_iter().copied().collect(),
            None => return,
        };
        while let Some(next) = pending.pop() {
            if let Some(node) = self.remove(next) {
                pending.extend(node.children().into_iter().copied());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stored nodes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (TreeKey, &FlatNode<M>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, node)| node.as_ref().map(|node| (TreeKey::from_slot(slot), node)))
    }

    /// Check the forest-of-one invariant for the tree rooted at `root`.
    pub fn validate(&self, root: TreeKey) -> Result<(), TreeDictError> {
        let mut seen = HashSet::new();
        let mut pending = vec![root];
        while let Some(key) = pending.pop() {
            if !seen.insert(key) {
                return Err(TreeDictError::SharedKey(key));
            }
            let node = self.get(key).ok_or(TreeDictError::MissingKey(key))?;
            pending.extend(node.children().into_iter().copied());
        }
        // `len` is only trusted as far as it agrees with the slots. A deserialized
        // dictionary may carry any count.
        let stored = self.slots.iter().filter(|slot| slot.is_some()).count();
        if stored != self.len {
            return Err(TreeDictError::CountMismatch {
                recorded: self.len,
                stored,
            });
        }
        match stored - seen.len() {
            0 => Ok(()),
            unreachable => Err(TreeDictError::Unreachable(unreachable)),
        }
    }
}

impl<M> Index<TreeKey> for TreeDict<M> {
    type Output = FlatNode<M>;

    /// Panics on a missing key: callers must never hold a dangling key.
    fn index(&self, key: TreeKey) -> &Self::Output {
        self.get(key)
            .unwrap_or_else(|| panic!("missing subtree {} in tree dictionary", key))
    }
}

impl<M> IndexMut<TreeKey> for TreeDict<M> {
    fn index_mut(&mut self, key: TreeKey) -> &mut Self::Output {
        self.get_mut(key)
            .unwrap_or_else(|| panic!("missing subtree {} in tree dictionary", key))
    }
}

/// A dictionary together with the key of its root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTree<M> {
    pub nodes: TreeDict<M>,
    pub root: TreeKey,
}

impl<M> FlatTree<M> {
    /// A tree consisting of a single blank.
    pub fn blank(metadata: M) -> Self {
        let mut nodes = TreeDict::new();
        let root = nodes.insert(Node::blank(metadata));
        Self { nodes, root }
    }

    pub fn root_node(&self) -> &FlatNode<M> {
        &self.nodes[self.root]
    }

    pub fn validate(&self) -> Result<(), TreeDictError> {
        self.nodes.validate(self.root)
    }
}

impl<M: Clone> FlatTree<M> {
    pub fn structure(&self) -> Tree<M> {
        structure(&self.nodes, self.root)
    }
}

impl<M> From<Tree<M>> for FlatTree<M> {
    fn from(tree: Tree<M>) -> Self {
        flatten(tree)
    }
}

/// Flatten `tree` into a fresh dictionary.
///
/// Each parent's key is allocated before its children's, and a node's children get
/// consecutive keys. Keys carry no meaning across calls.
pub fn flatten<M>(tree: Tree<M>) -> FlatTree<M> {
    let mut nodes = TreeDict::with_capacity(tree.size());
    let root = nodes.reserve();
    let mut pending = vec![(root, tree)];
    while let Some((key, tree)) = pending.pop() {
        let Node { data, metadata } = tree.into_node();
        let mut children = Vec::new();
        let data = data.map(
            |child| {
                let child_key = nodes.reserve();
                children.push((child_key, *child));
                child_key
            },
            |meta| meta,
        );
        nodes.fill(key, Node { data, metadata });
        pending.extend(children.into_iter().rev());
    }
    FlatTree { nodes, root }
}

/// Rebuild the structural tree rooted at `root`.
///
/// # Panics
///
/// If any key reachable from `root` is missing. A dangling key is a bug in whoever built
/// the dictionary, not a recoverable condition.
pub fn structure<M: Clone>(nodes: &TreeDict<M>, root: TreeKey) -> Tree<M> {
    build_post_order(root, |key| {
        let node = &nodes[key];
        let (data, children) = node.data.split();
        (
            Node {
                data,
                metadata: node.metadata.clone(),
            },
            children.into_iter().copied().collect(),
        )
    })
}
