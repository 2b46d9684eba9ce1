//! Fluent assertion API for syntax trees

use crate::lambda::ast::{NodeData, NodeTag, Tree};
use crate::lambda::range::Range;

use super::testing_factories::range;

/// Start an assertion chain at the root of `tree`.
pub fn assert_tree(tree: &Tree<Range>) -> TreeAssertion<'_> {
    TreeAssertion {
        tree,
        context: "root".to_string(),
    }
}

pub struct TreeAssertion<'a> {
    tree: &'a Tree<Range>,
    context: String,
}

impl<'a> TreeAssertion<'a> {
    fn expect_tag(&self, expected: NodeTag) {
        assert_eq!(
            self.tree.tag(),
            expected,
            "{}: expected {}, found {} `{}`",
            self.context,
            expected,
            self.tree.tag(),
            self.tree
        );
    }

    fn child(&self, name: &str, tree: &'a Tree<Range>) -> TreeAssertion<'a> {
        TreeAssertion {
            tree,
            context: format!("{}.{}", self.context, name),
        }
    }

    pub fn blank(self) -> Self {
        self.expect_tag(NodeTag::Blank);
        self
    }

    pub fn variable(self, name: &str) -> Self {
        self.expect_tag(NodeTag::Variable);
        if let NodeData::Variable { name: actual } = &self.tree.data {
            assert_eq!(actual, name, "{}: variable name", self.context);
        }
        self
    }

    pub fn abstraction(self, parameter: &str) -> Self {
        self.expect_tag(NodeTag::Abstraction);
        if let NodeData::Abstraction { parameter: actual, .. } = &self.tree.data {
            assert_eq!(actual.name, parameter, "{}: parameter name", self.context);
        }
        self
    }

    pub fn application(self) -> Self {
        self.expect_tag(NodeTag::Application);
        self
    }

    /// Assert the node's source range, by codepoint index on the first row.
    pub fn range(self, start: usize, end: usize) -> Self {
        assert_eq!(
            self.tree.metadata,
            range(start, end),
            "{}: range of `{}`",
            self.context,
            self.tree
        );
        self
    }

    pub fn parameter_range(self, start: usize, end: usize) -> Self {
        self.expect_tag(NodeTag::Abstraction);
        if let NodeData::Abstraction { parameter, .. } = &self.tree.data {
            assert_eq!(
                parameter.metadata,
                range(start, end),
                "{}: range of parameter {:?}",
                self.context,
                parameter.name
            );
        }
        self
    }

    /// Assert the compact rendering of the subtree.
    pub fn renders_as(self, expected: &str) -> Self {
        assert_eq!(self.tree.to_string(), expected, "{}: rendering", self.context);
        self
    }

    pub fn body<F>(self, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a>),
    {
        self.expect_tag(NodeTag::Abstraction);
        if let NodeData::Abstraction { body, .. } = &self.tree.data {
            assertion(self.child("body", body));
        }
        self
    }

    pub fn function<F>(self, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a>),
    {
        self.expect_tag(NodeTag::Application);
        if let NodeData::Application { function, .. } = &self.tree.data {
            assertion(self.child("function", function));
        }
        self
    }

    pub fn argument<F>(self, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a>),
    {
        self.expect_tag(NodeTag::Application);
        if let NodeData::Application { argument, .. } = &self.tree.data {
            assertion(self.child("argument", argument));
        }
        self
    }
}
