//! Error types for serialization.
//!
//! Failures fall into two disjoint classes: **structural** errors
//! ([`MalformedTree`]) reported by a node provider, which abort a call
//! immediately and are never retried, and **allocation** failures raised
//! while sizing the output buffer. Running out of buffer capacity is not an
//! error at this level — the driver transparently grows the buffer and
//! re-runs the serialization.

use thiserror::Error;

/// A structural defect in the node tree, reported by the node provider.
///
/// A tree with any of these defects cannot be serialized, not even
/// partially; the serializer surfaces the defect and discards everything
/// written so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedTree {
    /// An attribute key was neither a plain name nor a `(uri, name)` pair.
    #[error("attribute key is neither a name nor a (uri, name) pair")]
    BadAttrKey,
    /// An attribute value was not textual.
    #[error("attribute value is not textual")]
    BadAttrValue,
    /// A node could not be classified as character data or an element.
    #[error("node is neither character data nor an element")]
    BadNode,
    /// A required element field was absent from the provider's representation.
    #[error("element is missing required field `{0}`")]
    MissingField(&'static str),
}

/// The error type returned when serialization fails.
///
/// # Examples
///
/// ```
/// use domoxide::{serialize, Node, SerializeError};
///
/// // A well-formed tree serializes without error.
/// assert!(serialize(&Node::text("hello")).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// The node tree is structurally invalid. Fatal; never retried.
    #[error("malformed element tree: {0}")]
    Malformed(#[from] MalformedTree),
    /// The output buffer could not be allocated at the required capacity
    /// (or the capacity overflowed while doubling). Distinct from a
    /// recoverable buffer-full condition, which is handled internally.
    #[error("failed to allocate a {capacity}-byte output buffer")]
    Allocation {
        /// The capacity, in bytes, that could not be allocated.
        capacity: usize,
    },
}
