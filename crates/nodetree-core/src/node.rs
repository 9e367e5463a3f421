//! The typed node tree: a closed set of value kinds, nodes that own their
//! children, and the [`Tree`] wrapper whose absence of a root is the empty tree.
//!
//! A node's kind and value are fixed at construction; only its child list
//! grows, and only at the end. The canonical string of a value is exactly the
//! text the factory accepts back for the same kind, which is what makes the
//! XML encoding lossless.

use std::fmt;

use serde::Serialize;

/// Discriminator of a node's value type.
///
/// The numeric tag is written to the `type` attribute of every encoded
/// element. Tags are frozen: existing documents depend on them, so a new kind
/// must take the next unused tag and never renumber the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Text,
    Integer,
    Real,
}

impl Kind {
    /// Every kind, in tag order.
    pub const ALL: [Kind; 3] = [Kind::Text, Kind::Integer, Kind::Real];

    /// Wire tag of this kind.
    pub const fn tag(self) -> u32 {
        match self {
            Kind::Text => 0,
            Kind::Integer => 1,
            Kind::Real => 2,
        }
    }

    /// Look a kind up by its wire tag.
    pub fn from_tag(tag: u32) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Human-readable type label, used for display only.
    pub const fn label(self) -> &'static str {
        match self {
            Kind::Text => "STRING",
            Kind::Integer => "INT",
            Kind::Real => "REAL",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The value carried by a node.
///
/// Integers are 64-bit signed. Reals are `f64` and render with Rust's
/// shortest round-trip formatting, so `3.14` stays `3.14` and parsing the
/// rendered text gives back the identical bits (`NaN` and `inf` included).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Text(_) => Kind::Text,
            Value::Integer(_) => Kind::Integer,
            Value::Real(_) => Kind::Real,
        }
    }

    /// Canonical string form, the payload of the `val` attribute.
    pub fn to_canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Real(x) => write!(f, "{x}"),
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

/// One element of a typed tree. Exclusively owns its ordered children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    value: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    pub fn new(value: impl Into<Value>) -> Self {
        Node {
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::new(Value::Text(text.into()))
    }

    pub fn integer(n: i64) -> Self {
        Node::new(Value::Integer(n))
    }

    pub fn real(x: f64) -> Self {
        Node::new(Value::Real(x))
    }

    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Canonical string of the value; see [`Value::to_canonical`].
    pub fn str_data(&self) -> String {
        self.value.to_canonical()
    }

    /// Display label of the node's kind (`STRING`, `INT`, `REAL`).
    pub fn str_type(&self) -> &'static str {
        self.kind().label()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Append a child after the existing ones and return it for further building.
    pub fn push_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Builder form of [`Node::push_child`].
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

/// Pre-order iterator yielding `(depth, node)` pairs.
///
/// Uses an explicit stack, so walking is not bounded by the call stack the
/// way the recursive decoder and encoder are.
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// A tree is one root node, or nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tree {
    root: Option<Node>,
}

impl Tree {
    /// The empty tree.
    pub fn empty() -> Self {
        Tree { root: None }
    }

    pub fn new(root: Node) -> Self {
        Tree { root: Some(root) }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Pre-order walk from the root; yields nothing for the empty tree.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.root.iter().map(|root| (0, root)).collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Number of levels: 0 for the empty tree, 1 for a lone root.
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }
}

impl From<Node> for Tree {
    fn from(root: Node) -> Self {
        Tree::new(root)
    }
}

impl From<Option<Node>> for Tree {
    fn from(root: Option<Node>) -> Self {
        Tree { root }
    }
}
