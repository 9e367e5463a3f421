//! Error types for node tree decoding, encoding and markup I/O.

use thiserror::Error;

use crate::node::Kind;

/// Errors that can occur while building, decoding or writing node trees.
#[derive(Error, Debug)]
pub enum TreeError {
    /// No node factory is registered for the kind tag found on the wire.
    #[error("no node factory registered for kind tag {0}")]
    UnknownKind(u32),

    /// The `val` payload could not be parsed into the value type of its kind.
    #[error("cannot parse {raw:?} as {kind} value: {message}")]
    ValueParse {
        kind: Kind,
        raw: String,
        message: String,
    },

    /// A required attribute is absent from a markup element.
    #[error("element <{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// An attribute is present but its text is not acceptable.
    #[error("attribute `{attribute}` has malformed value {value:?}")]
    MalformedAttribute {
        attribute: &'static str,
        value: String,
    },

    /// The markup text itself is not well formed.
    #[error("markup parse error at byte {position}: {message}")]
    Markup { position: u64, message: String },

    /// I/O error while reading or writing a document, including writer failures.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value holds characters that XML 1.0 cannot represent, not even as
    /// character references (C0 controls other than tab, LF and CR, U+FFFE, U+FFFF).
    #[error("attribute `{attribute}` value {value:?} is not representable in XML 1.0")]
    Unrepresentable { attribute: String, value: String },
}

/// Convenience alias used throughout nodetree-core.
pub type Result<T> = std::result::Result<T, TreeError>;

/// The single failure outcome of a decode.
///
/// Whatever went wrong (unknown kind, bad payload, missing attribute, broken
/// markup) the caller only learns that no tree was produced. The underlying
/// [`TreeError`] stays reachable through [`std::error::Error::source`] for logging.
#[derive(Error, Debug)]
#[error("failed to decode tree")]
pub struct DecodeError {
    #[source]
    cause: TreeError,
}

impl DecodeError {
    pub(crate) fn new(cause: TreeError) -> Self {
        DecodeError { cause }
    }

    /// The error that aborted the decode.
    pub fn cause(&self) -> &TreeError {
        &self.cause
    }
}

impl From<TreeError> for DecodeError {
    fn from(cause: TreeError) -> Self {
        DecodeError::new(cause)
    }
}
