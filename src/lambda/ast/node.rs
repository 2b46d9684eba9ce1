//! The four-way expression node
//!
//! `Node` is generic over how children are referenced (`S`) and over the metadata payload
//! (`M`). The structural tree instantiates `S` with a boxed [`Tree`](super::Tree); the
//! flattened form instantiates it with a [`TreeKey`](super::TreeKey) into a
//! [`TreeDict`](super::TreeDict). Metadata is opaque to this crate: the parser attaches
//! source ranges, an editor attaches layout.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of a node, without its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeData<S, M> {
    /// A syntax hole: nothing here yet.
    Blank,
    /// A variable occurrence. The name may be empty.
    Variable { name: String },
    Abstraction { parameter: Parameter<M>, body: S },
    Application { function: S, argument: S },
}

/// A bound parameter. Its metadata is separate from the abstraction's own, since the
/// binder occupies a different part of the source than the whole abstraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter<M> {
    pub name: String,
    pub metadata: M,
}

impl<M> Parameter<M> {
    pub fn new(name: impl Into<String>, metadata: M) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }
}

/// Node discriminant, handy for matching on shape alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeTag {
    Blank,
    Variable,
    Abstraction,
    Application,
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeTag::Blank => "Blank",
            NodeTag::Variable => "Variable",
            NodeTag::Abstraction => "Abstraction",
            NodeTag::Application => "Application",
        };
        f.write_str(name)
    }
}

/// An expression node with one metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node<S, M> {
    pub data: NodeData<S, M>,
    pub metadata: M,
}

impl<S, M> Node<S, M> {
    pub fn blank(metadata: M) -> Self {
        Self {
            data: NodeData::Blank,
            metadata,
        }
    }

    pub fn variable(name: impl Into<String>, metadata: M) -> Self {
        Self {
            data: NodeData::Variable { name: name.into() },
            metadata,
        }
    }

    pub fn abstraction(
        parameter: impl Into<String>,
        body: S,
        parameter_metadata: M,
        metadata: M,
    ) -> Self {
        Self {
            data: NodeData::Abstraction {
                parameter: Parameter::new(parameter, parameter_metadata),
                body,
            },
            metadata,
        }
    }

    pub fn application(function: S, argument: S, metadata: M) -> Self {
        Self {
            data: NodeData::Application { function, argument },
            metadata,
        }
    }

    pub fn tag(&self) -> NodeTag {
        self.data.tag()
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.data, NodeData::Blank)
    }

    /// Child references in source order (function before argument).
    pub fn children(&self) -> Vec<&S> {
        self.data.children()
    }
}

impl<S, M> NodeData<S, M> {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeData::Blank => NodeTag::Blank,
            NodeData::Variable { .. } => NodeTag::Variable,
            NodeData::Abstraction { .. } => NodeTag::Abstraction,
            NodeData::Application { .. } => NodeTag::Application,
        }
    }

    pub fn children(&self) -> Vec<&S> {
        match self {
            NodeData::Blank | NodeData::Variable { .. } => Vec::new(),
            NodeData::Abstraction { body, .. } => vec![body],
            NodeData::Application { function, argument } => vec![function, argument],
        }
    }

    /// Copy the node without its children: `()` stands where each child was, and the
    /// children come back separately in order.
    pub(crate) fn split(&self) -> (NodeData<(), M>, Vec<&S>)
    where
        M: Clone,
    {
        let shell = match self {
            NodeData::Blank => NodeData::Blank,
            NodeData::Variable { name } => NodeData::Variable { name: name.clone() },
            NodeData::Abstraction { parameter, .. } => NodeData::Abstraction {
                parameter: parameter.clone(),
                body: (),
            },
            NodeData::Application { .. } => NodeData::Application {
                function: (),
                argument: (),
            },
        };
        (shell, self.children())
    }

    /// Rebuild the node with every child reference passed through `f`, and every
    /// parameter's metadata through `g`.
    pub(crate) fn map<T, N>(
        self,
        mut f: impl FnMut(S) -> T,
        g: impl FnOnce(M) -> N,
    ) -> NodeData<T, N> {
        match self {
            NodeData::Blank => NodeData::Blank,
            NodeData::Variable { name } => NodeData::Variable { name },
            NodeData::Abstraction { parameter, body } => NodeData::Abstraction {
                parameter: Parameter {
                    name: parameter.name,
                    metadata: g(parameter.metadata),
                },
                body: f(body),
            },
            NodeData::Application { function, argument } => {
                let function = f(function);
                let argument = f(argument);
                NodeData::Application { function, argument }
            }
        }
    }
}
