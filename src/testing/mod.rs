//! Testing helpers: plain-text tree rendering.
//!
//! Functions for converting a view subtree into a stable indented string,
//! suitable for snapshot testing and structural assertions.

use crate::dom::{NodeId, ViewTree};

/// Render the subtree under `root` as an indented plain-text outline.
///
/// One line per node: the tag name, `name="value"` pairs in declaration
/// order, and the text content in quotes. Children indent by two spaces.
///
/// # Examples
///
/// ```
/// use formwork::dom::{NodeData, ViewTree};
/// use formwork::testing::tree_to_string;
///
/// let mut tree = ViewTree::new();
/// let root = tree.insert(NodeData::new("main"));
/// tree.insert_child(root, NodeData::new("input").with_attr("name", "city"));
///
/// assert_eq!(tree_to_string(&tree, root), "main\n  input name=\"city\"\n");
/// ```
pub fn tree_to_string(tree: &ViewTree, root: NodeId) -> String {
    let mut out = String::new();
    render(tree, root, 0, &mut out);
    out
}

fn render(tree: &ViewTree, node: NodeId, depth: usize, out: &mut String) {
    let Some(data) = tree.get(node) else {
        return;
    };

    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(&data.tag);
    for (name, value) in data.attrs() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    if let Some(text) = &data.text {
        out.push_str(" \"");
        out.push_str(text);
        out.push('"');
    }
    out.push('\n');

    for &child in tree.children(node) {
        render(tree, child, depth + 1, out);
    }
}
