//! Human-readable views of a tree. Display only; neither view is read back.

use crate::node::Tree;

/// Render one line per node in pre-order: `depth` tabs, then
/// `--{ LABEL(value)`. The empty tree renders as the empty string.
///
/// ```
/// use nodetree_core::{printer::render_tree, Node, Tree};
/// let tree = Tree::new(Node::integer(5).with_child(Node::text("hi")));
/// assert_eq!(render_tree(&tree), "--{ INT(5)\n\t--{ STRING(hi)\n");
/// ```
pub fn render_tree(tree: &Tree) -> String {
    let mut out = String::new();
    for (depth, node) in tree.walk() {
        for _ in 0..depth {
            out.push('\t');
        }
        out.push_str(&format!("--{{ {}({})\n", node.str_type(), node.str_data()));
    }
    out
}

/// Pretty-printed JSON view; the empty tree is `null`.
pub fn to_json(tree: &Tree) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tree)
}
