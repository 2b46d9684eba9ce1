//! Structural editing on the flattened form
//!
//! These are the mutations an interactive editor performs by key: turning a node into a
//! variable, abstraction or application, renaming, and pruning back to a blank.
//!
//! Replacing a node first removes everything below it, so the dictionary keeps holding
//! exactly one tree. The node at the edited key keeps its metadata (an editor keeps its
//! layout slot); freshly created children and parameters get `M::default()`.

use super::dict::{TreeDict, TreeKey};
use super::node::{Node, NodeData, NodeTag, Parameter};
use thiserror::Error;
use tracing::trace;

/// Name given to variables and parameters created by an edit.
pub const DEFAULT_NAME: &str = "x";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no node with key {0}")]
    MissingNode(TreeKey),
    #[error("node {key} is a {tag} and has no name to change")]
    NotRenameable {
        key: TreeKey,
        tag: NodeTag,
    },
}

impl<M: Default> TreeDict<M> {
    /// Store a new blank and return its key.
    pub fn new_blank(&mut self) -> TreeKey {
        self.insert(Node::blank(M::default()))
    }

    /// Replace the subtree at `key` with a variable.
    pub fn make_variable(&mut self, key: TreeKey, name: impl Into<String>) -> Result<(), EditError> {
        self.replace_data(key, NodeData::Variable { name: name.into() })
    }

    /// Replace the subtree at `key` with an abstraction over a blank body.
    pub fn make_abstraction(
        &mut self,
        key: TreeKey,
        parameter: impl Into<String>,
    ) -> Result<(), EditError> {
        self.ensure(key)?;
        self.remove_descendants(key);
        let body = self.new_blank();
        self.set_data(
            key,
            NodeData::Abstraction {
                parameter: Parameter::new(parameter, M::default()),
                body,
            },
        )
    }

    /// Replace the subtree at `key` with an application of a blank to a blank.
    pub fn make_application(&mut self, key: TreeKey) -> Result<(), EditError> {
        self.ensure(key)?;
        self.remove_descendants(key);
        let function = self.new_blank();
        let argument = self.new_blank();
        self.set_data(key, NodeData::Application { function, argument })
    }

    fn replace_data(&mut self, key: TreeKey, data: NodeData<TreeKey, M>) -> Result<(), EditError> {
        self.ensure(key)?;
        self.remove_descendants(key);
        self.set_data(key, data)
    }
}

impl<M> TreeDict<M> {
    /// Rename a variable, or the parameter of an abstraction.
    pub fn rename(&mut self, key: TreeKey, name: impl Into<String>) -> Result<(), EditError> {
        let node = self.get_mut(key).ok_or(EditError::MissingNode(key))?;
        match &mut node.data {
            NodeData::Variable { name: current } => *current = name.into(),
            NodeData::Abstraction { parameter, .. } => parameter.name = name.into(),
            other => {
                return Err(EditError::NotRenameable {
                    key,
                    tag: other.tag(),
                })
            }
        }
        trace!(%key, "renamed node");
        Ok(())
    }

    /// Cut the subtree at `key` back to a blank, dropping everything below it.
    pub fn prune(&mut self, key: TreeKey) -> Result<(), EditError> {
        self.ensure(key)?;
        self.remove_descendants(key);
        self.set_data(key, NodeData::Blank)
    }

    fn ensure(&self, key: TreeKey) -> Result<(), EditError> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(EditError::MissingNode(key))
        }
    }

    fn set_data(&mut self, key: TreeKey, data: NodeData<TreeKey, M>) -> Result<(), EditError> {
        let node = self.get_mut(key).ok_or(EditError::MissingNode(key))?;
        trace!(%key, from = %node.tag(), to = %data.tag(), "replaced node");
        node.data = data;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lambda::ast::{flatten, FlatTree, Tree};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Ui {
        pinned: bool,
    }

    fn pinned_blank() -> FlatTree<Ui> {
        FlatTree::blank(Ui { pinned: true })
    }

    #[test]
    fn test_make_variable_keeps_metadata() {
        let mut flat = pinned_blank();
        flat.nodes.make_variable(flat.root, "y").unwrap();
        assert_eq!(flat.root_node(), &Node::variable("y", Ui { pinned: true }));
    }

    #[test]
    fn test_make_abstraction_adds_blank_body() {
        let mut flat = pinned_blank();
        flat.nodes.make_abstraction(flat.root, DEFAULT_NAME).unwrap();
        assert_eq!(flat.nodes.len(), 2);
        assert_eq!(flat.structure().to_string(), "λx. _");
        assert!(flat.validate().is_ok());
    }

    #[test]
    fn test_make_application_adds_two_blanks() {
        let mut flat = pinned_blank();
        flat.nodes.make_application(flat.root).unwrap();
        assert_eq!(flat.nodes.len(), 3);
        assert_eq!(flat.structure().to_string(), "_ _");
    }

    #[test]
    fn test_replacing_drops_old_subtree() {
        let tree = Tree::application(
            Tree::abstraction("a", Tree::variable("a", Ui::default()), Ui::default(), Ui::default()),
            Tree::variable("b", Ui::default()),
            Ui::default(),
        );
        let mut flat = flatten(tree);
        assert_eq!(flat.nodes.len(), 4);
        flat.nodes.make_variable(flat.root, "z").unwrap();
        assert_eq!(flat.nodes.len(), 1);
        assert!(flat.validate().is_ok());
    }

    #[test]
    fn test_rename() {
        let mut flat = flatten(Tree::abstraction(
            "x",
            Tree::variable("x", Ui::default()),
            Ui::default(),
            Ui::default(),
        ));
        flat.nodes.rename(flat.root, "y").unwrap();
        let NodeData::Abstraction { body, .. } = flat.root_node().data.clone() else {
            unreachable!()
        };
        flat.nodes.rename(body, "y").unwrap();
        assert_eq!(flat.structure().to_string(), "λy. y");
    }

    #[test]
    fn test_rename_rejects_blank_and_application() {
        let mut flat = pinned_blank();
        assert_eq!(
            flat.nodes.rename(flat.root, "y"),
            Err(EditError::NotRenameable {
                key: flat.root,
                tag: NodeTag::Blank
            })
        );
        flat.nodes.make_application(flat.root).unwrap();
        assert!(flat.nodes.rename(flat.root, "y").is_err());
    }

    #[test]
    fn test_prune() {
        let mut flat = pinned_blank();
        flat.nodes.make_application(flat.root).unwrap();
        let NodeData::Application { argument, .. } = flat.root_node().data.clone() else {
            unreachable!()
        };
        flat.nodes.make_abstraction(argument, "q").unwrap();
        assert_eq!(flat.structure().to_string(), "_ (λq. _)");

        flat.nodes.prune(flat.root).unwrap();
        assert_eq!(flat.nodes.len(), 1);
        assert_eq!(flat.root_node(), &Node::blank(Ui { pinned: true }));
    }

    #[test]
    fn test_missing_key() {
        let mut flat = pinned_blank();
        let stale = flat.nodes.new_blank();
        flat.nodes.remove(stale);
        assert_eq!(flat.nodes.prune(stale), Err(EditError::MissingNode(stale)));
        assert_eq!(
            flat.nodes.make_application(stale),
            Err(EditError::MissingNode(stale))
        );
    }
}
