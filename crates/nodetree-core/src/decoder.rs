//! Tree decoder: markup [`Document`] → typed [`Tree`].
//!
//! The first top-level `<node>` element is the root; a document without one
//! decodes to the empty tree. Each element's `type` attribute selects a
//! constructor from a [`NodeFactory`] built for this call, and its `val`
//! attribute is the payload. Child elements are visited depth-first in
//! document order, each node fully built before its children.
//!
//! Decoding is all-or-nothing. A missing or malformed attribute, an unknown
//! kind tag or an unparseable payload anywhere in the document rejects the
//! whole document with a single [`DecodeError`]; no partial tree escapes.

use crate::encoder::{NODE_ELEMENT, TYPE_ATTRIBUTE, VAL_ATTRIBUTE};
use crate::error::{DecodeError, Result, TreeError};
use crate::factory::NodeFactory;
use crate::markup::{Document, Element};
use crate::node::{Node, Tree};

/// Decode a parsed document.
pub fn decode(document: &Document) -> std::result::Result<Tree, DecodeError> {
    let Some(root_element) = document.first_element(NODE_ELEMENT) else {
        tracing::debug!("no top-level <node> element, decoded the empty tree");
        return Ok(Tree::empty());
    };

    let factory = NodeFactory::new();
    let tree = build_node(&factory, root_element).map(Tree::new).map_err(reject)?;
    tracing::debug!(nodes = tree.node_count(), "decoded tree");
    Ok(tree)
}

/// Parse markup text and decode it. Markup that is not well formed is one
/// more way for the decode to fail, reported the same way.
pub fn decode_str(text: &str) -> std::result::Result<Tree, DecodeError> {
    let document = Document::parse(text).map_err(reject)?;
    decode(&document)
}

fn reject(cause: TreeError) -> DecodeError {
    tracing::warn!(%cause, "rejected document");
    DecodeError::new(cause)
}

fn build_node(factory: &NodeFactory, element: &Element) -> Result<Node> {
    let mut node = create_from_element(factory, element)?;
    tracing::trace!(kind = %node.kind(), val = %node.str_data(), "built node");
    decode_children(factory, element, &mut node)?;
    Ok(node)
}

fn decode_children(factory: &NodeFactory, element: &Element, parent: &mut Node) -> Result<()> {
    for child_element in element.children() {
        let child = parent.push_child(create_from_element(factory, child_element)?);
        decode_children(factory, child_element, child)?;
    }
    Ok(())
}

fn create_from_element(factory: &NodeFactory, element: &Element) -> Result<Node> {
    let raw_tag = required_attribute(element, TYPE_ATTRIBUTE)?;
    let tag = raw_tag
        .parse::<u32>()
        .map_err(|_| TreeError::MalformedAttribute {
            attribute: TYPE_ATTRIBUTE,
            value: raw_tag.to_string(),
        })?;
    let raw_value = required_attribute(element, VAL_ATTRIBUTE)?;
    factory.create_node(tag, raw_value)
}

fn required_attribute<'a>(element: &'a Element, attribute: &'static str) -> Result<&'a str> {
    element
        .attribute(attribute)
        .ok_or_else(|| TreeError::MissingAttribute {
            element: element.name().to_string(),
            attribute,
        })
}
