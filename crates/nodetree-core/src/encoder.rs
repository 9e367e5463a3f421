//! Tree encoder: typed [`Tree`] → markup [`Document`].
//!
//! Every node becomes one `<node>` element carrying `type` (the kind tag) and
//! `val` (the canonical value string). Children are appended depth-first in
//! pre-order, so document order is exactly child order.
//!
//! # Example
//! ```
//! use nodetree_core::{encode, Node, Tree};
//! let tree = Tree::new(Node::integer(5).with_child(Node::text("hello")));
//! let doc = encode(&tree);
//! let root = doc.first_element("node").unwrap();
//! assert_eq!(root.attribute("type"), Some("1"));
//! assert_eq!(root.children()[0].attribute("val"), Some("hello"));
//! ```

use std::path::Path;

use crate::error::Result;
use crate::markup::{Document, Element};
use crate::node::{Node, Tree};

/// Element name of every encoded node.
pub const NODE_ELEMENT: &str = "node";
/// Attribute holding the kind tag.
pub const TYPE_ATTRIBUTE: &str = "type";
/// Attribute holding the canonical value string.
pub const VAL_ATTRIBUTE: &str = "val";

/// Encode a tree. The empty tree gives a document with no elements.
///
/// Infallible: every value kind has a total canonical string form.
pub fn encode(tree: &Tree) -> Document {
    let mut document = Document::new();
    if let Some(root) = tree.root() {
        let mut element = node_element(root);
        encode_children(root, &mut element);
        document.push(element);
    }
    tracing::debug!(nodes = tree.node_count(), "encoded tree");
    document
}

/// Encode and serialize to markup text; see [`Document::write_to`] for `indent`.
pub fn encode_to_string(tree: &Tree, indent: usize) -> Result<String> {
    encode(tree).to_xml_string(indent)
}

/// Encode and write to a file. Failures here belong to the write: an I/O
/// error, or a text value holding characters XML 1.0 cannot carry (see
/// [`crate::markup::is_xml_char`]). The in-memory [`encode`] never fails.
pub fn encode_to_file(tree: &Tree, path: impl AsRef<Path>, indent: usize) -> Result<()> {
    encode(tree).save(path, indent)
}

fn node_element(node: &Node) -> Element {
    Element::new(NODE_ELEMENT)
        .with_attribute(TYPE_ATTRIBUTE, node.kind().tag().to_string())
        .with_attribute(VAL_ATTRIBUTE, node.str_data())
}

fn encode_children(node: &Node, element: &mut Element) {
    for child in node.children() {
        let child_element = element.push_child(node_element(child));
        encode_children(child, child_element);
    }
}
