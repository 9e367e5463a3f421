//! # nodetree-core
//!
//! Typed node trees and their lossless XML encoding.
//!
//! A [`Tree`] is one root [`Node`] (or nothing). Each node holds a value of one
//! of a closed set of kinds (text, 64-bit integer, real) and owns an ordered
//! list of children. On disk every node is a `<node>` element with a `type`
//! attribute (the frozen kind tag: `0` text, `1` integer, `2` real) and a
//! `val` attribute (the canonical value string), with child elements in child
//! order.
//!
//! ## Quick start
//!
//! ```rust
//! use nodetree_core::{decode_str, encode_to_string, Node, Tree};
//!
//! let tree = Tree::new(
//!     Node::integer(5)
//!         .with_child(Node::text("hello"))
//!         .with_child(Node::real(3.14)),
//! );
//!
//! let xml = encode_to_string(&tree, 4).unwrap();
//! assert!(xml.contains(r#"<node type="1" val="5">"#));
//!
//! let back = decode_str(&xml).unwrap();
//! assert_eq!(back, tree);
//! ```
//!
//! ## Modules
//!
//! - [`node`] — `Kind`, `Value`, `Node`, `Tree`
//! - [`factory`] — kind tag + payload → node dispatch
//! - [`decoder`] — markup document → tree
//! - [`encoder`] — tree → markup document
//! - [`markup`] — the element tree and its quick-xml reader/writer
//! - [`printer`] — indented text and JSON views for display
//! - [`error`] — `TreeError` and the collapsed `DecodeError`

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod factory;
pub mod markup;
pub mod node;
pub mod printer;

pub use decoder::{decode, decode_str};
pub use encoder::{encode, encode_to_file, encode_to_string};
pub use error::{DecodeError, TreeError};
pub use factory::{create_node, NodeFactory};
pub use markup::{Document, Element};
pub use node::{Kind, Node, Tree, Value};
