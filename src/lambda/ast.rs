//! Syntax tree
//!
//!     One node shape, [`Node`], in two interchangeable representations:
//!
//!         - Structural ([`Tree`]): nodes own their children. Produced by the parser,
//!           consumed by the stringifier.
//!         - Flattened ([`FlatTree`]): nodes live in an arena ([`TreeDict`]) and refer to
//!           children by [`TreeKey`]. Used for node-by-node interactive editing.
//!
//!     [`flatten`] and [`structure`] convert between the two and are inverses up to key
//!     identity. [`Tree::map_metadata`] swaps the metadata payload (source ranges for UI
//!     layout, say) without touching shape.

pub mod dict;
pub mod editing;
pub mod node;
pub mod tree;

pub use dict::{flatten, structure, FlatNode, FlatTree, TreeDict, TreeDictError, TreeKey};
pub use editing::{EditError, DEFAULT_NAME};
pub use node::{Node, NodeData, NodeTag, Parameter};
pub use tree::{stringify_compact, Tree, BLANK_GLYPH, UNNAMED_GLYPH};
