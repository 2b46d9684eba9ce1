//! Treeviz formatter
//!
//! One line per node, nesting drawn with box-drawing connectors, which makes the shape of
//! deeply nested applications easy to scan.
//!
//! Each line is `<prefix><connector> <icon> <label>`:
//!
//! ```text
//! λ x
//! └─ @
//!   ├─ x f
//!   └─ x x
//! ```
//!
//! Icons
//!     Abstraction: λ (label: parameter name)
//!     Application: @
//!     Variable: x (label: variable name)
//!     Blank: _
//!
//! With ranges enabled, every line ends with the node's `row:col..row:col` source range.

use super::registry::{FormatError, Formatter};
use crate::lambda::ast::{NodeData, NodeTag, UNNAMED_GLYPH};
use crate::lambda::parsing::SyntaxTree;
use crate::lambda::SourceOutput;

fn get_icon(tag: NodeTag) -> &'static str {
    match tag {
        NodeTag::Abstraction => "λ",
        NodeTag::Application => "@",
        NodeTag::Variable => "x",
        NodeTag::Blank => "_",
    }
}

fn label(tree: &SyntaxTree) -> Option<&str> {
    let name = match &tree.data {
        NodeData::Variable { name } => name,
        NodeData::Abstraction { parameter, .. } => &parameter.name,
        NodeData::Blank | NodeData::Application { .. } => return None,
    };
    Some(if name.is_empty() { UNNAMED_GLYPH } else { name.as_str() })
}

fn format_line(tree: &SyntaxTree, show_ranges: bool) -> String {
    let mut line = get_icon(tree.tag()).to_string();
    if let Some(label) = label(tree) {
        line.push(' ');
        line.push_str(label);
    }
    if show_ranges {
        line.push_str(&format!(" [{}]", tree.metadata));
    }
    line
}

fn children(tree: &SyntaxTree) -> Vec<&SyntaxTree> {
    tree.children().into_iter().map(|child| &**child).collect()
}

/// Render a tree in treeviz form.
pub fn to_treeviz_str(tree: &SyntaxTree, show_ranges: bool) -> String {
    let mut output = format!("{}\n", format_line(tree, show_ranges));

    // (node, prefix of its line, whether it is its parent's last child)
    let mut pending: Vec<(&SyntaxTree, String, bool)> = Vec::new();
    push_children(tree, "", &mut pending);
    while let Some((tree, prefix, is_last)) = pending.pop() {
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!(
            "{}{} {}\n",
            prefix,
            connector,
            format_line(tree, show_ranges)
        ));
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        push_children(tree, &child_prefix, &mut pending);
    }

    output
}

/// Queue `tree`'s children so the first one is popped first.
fn push_children<'a>(
    tree: &'a SyntaxTree,
    prefix: &str,
    pending: &mut Vec<(&'a SyntaxTree, String, bool)>,
) {
    let kids = children(tree);
    let count = kids.len();
    for (i, child) in kids.into_iter().enumerate().rev() {
        pending.push((child, prefix.to_string(), i == count - 1));
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormatter {
    pub show_ranges: bool,
}

impl TreevizFormatter {
    pub fn new(show_ranges: bool) -> Self {
        Self { show_ranges }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, output: &SourceOutput) -> Result<String, FormatError> {
        Ok(to_treeviz_str(&output.expression, self.show_ranges))
    }

    fn description(&self) -> &str {
        "One line per node, with tree connectors"
    }
}
