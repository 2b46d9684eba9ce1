//! Output formats
//!
//! Formatters render a [`SourceOutput`](crate::lambda::SourceOutput) to text and are looked
//! up by name through the [`FormatRegistry`]:
//!
//! - `compact`: the canonical one-line rendering, which re-parses to the same shape
//! - `treeviz`: one line per node with box-drawing connectors
//! - `json`, `yaml`: the range-annotated tree, serialized
//! - `tokens`: the lexer's tokens, one per line

pub mod registry;
pub mod serialized;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serialized::{
    CompactFormatter, JsonFormatter, TokensFormatter, YamlFormatter, MAX_NESTED_DEPTH,
};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
