//! Node factory dispatch: kind tag + raw payload → typed [`Node`].
//!
//! The table is an ordinary value owned by whoever builds it (the decoder
//! builds one per call), so independent decodes never share dispatch state.
//! Adding a kind means adding a [`Kind`] variant; the exhaustive match in
//! [`constructor_for`] then refuses to compile until it has a constructor.

use std::collections::HashMap;

use crate::error::{Result, TreeError};
use crate::node::{Kind, Node, Value};

/// Parses a raw `val` payload into a node of one fixed kind.
type Constructor = fn(&str) -> Result<Node>;

/// Kind-indexed table of node constructors.
pub struct NodeFactory {
    constructors: HashMap<Kind, Constructor>,
}

impl NodeFactory {
    /// Register a constructor for every known kind.
    pub fn new() -> Self {
        let constructors = Kind::ALL
            .into_iter()
            .map(|kind| (kind, constructor_for(kind)))
            .collect();
        NodeFactory { constructors }
    }

    /// Build a node from its wire tag and raw payload.
    ///
    /// Unknown tags fail with [`TreeError::UnknownKind`]; payloads that are
    /// not valid numerals for a numeric kind fail with [`TreeError::ValueParse`].
    /// Nothing is ever defaulted.
    pub fn create_node(&self, tag: u32, raw: &str) -> Result<Node> {
        let constructor = Kind::from_tag(tag)
            .and_then(|kind| self.constructors.get(&kind))
            .ok_or(TreeError::UnknownKind(tag))?;
        constructor(raw)
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        NodeFactory::new()
    }
}

/// One-shot form of [`NodeFactory::create_node`].
pub fn create_node(tag: u32, raw: &str) -> Result<Node> {
    NodeFactory::new().create_node(tag, raw)
}

fn constructor_for(kind: Kind) -> Constructor {
    match kind {
        Kind::Text => make_text,
        Kind::Integer => make_integer,
        Kind::Real => make_real,
    }
}

fn make_text(raw: &str) -> Result<Node> {
    Ok(Node::new(Value::Text(raw.to_string())))
}

fn make_integer(raw: &str) -> Result<Node> {
    raw.parse::<i64>()
        .map(Node::integer)
        .map_err(|e| value_parse(Kind::Integer, raw, e))
}

fn make_real(raw: &str) -> Result<Node> {
    raw.parse::<f64>()
        .map(Node::real)
        .map_err(|e| value_parse(Kind::Real, raw, e))
}

fn value_parse(kind: Kind, raw: &str, err: impl std::fmt::Display) -> TreeError {
    TreeError::ValueParse {
        kind,
        raw: raw.to_string(),
        message: err.to_string(),
    }
}
