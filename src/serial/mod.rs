//! Serialization entry points and the grow-and-retry driver.
//!
//! [`serialize`] walks a node tree into a buffer of a fixed starting
//! capacity. If the output outgrows the buffer, the pass is abandoned —
//! never patched up in place — and re-run from the root in a buffer of
//! twice the capacity, with a freshly seeded prefix registry so that
//! registry state always mirrors an output cursor at zero. The loop repeats
//! until the tree fits or allocation fails.

mod escape;
mod prefix;
mod xml;

use log::trace;

use crate::buffer::OutBuf;
use crate::error::SerializeError;
use crate::node::XmlNode;
use prefix::PrefixRegistry;

/// Default output buffer capacity for the first pass, in bytes.
const INITIAL_CAPACITY: usize = 4096;

/// Options controlling serialization.
///
/// # Examples
///
/// ```
/// use domoxide::{serialize_with_options, Element, Node, SerializeOptions};
///
/// let options = SerializeOptions::default()
///     .prefix("urn:example", "ex")
///     .close_element(false);
/// let root = Element::new("root").namespace("urn:example");
/// let xml = serialize_with_options(&Node::from(root), &options).unwrap();
/// assert_eq!(xml, "<ex:root xmlns:ex='urn:example'>");
/// ```
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Caller-chosen `(uri, prefix)` bindings, registered before the walk.
    /// Each starts out of scope and is declared on first use.
    pub prefixes: Vec<(String, String)>,
    /// Prefix *names* treated as already declared in the output context, so
    /// no declaration is emitted for them. Matched by exact equality
    /// against registered prefixes (seeded ones and the built-in `xml`);
    /// unmatched names are ignored.
    pub prefixes_in_scope: Vec<String>,
    /// When `false`, serialization stops after the root element's open tag,
    /// attributes, and namespace declarations — no children, no close tag.
    /// Used to produce a streamable tag header. Defaults to `true`.
    pub close_element: bool,
    /// Output buffer capacity for the first pass. Defaults to 4096 bytes;
    /// callers that know their output size can skip the retry doublings.
    pub initial_capacity: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            prefixes: Vec::new(),
            prefixes_in_scope: Vec::new(),
            close_element: true,
            initial_capacity: INITIAL_CAPACITY,
        }
    }
}

impl SerializeOptions {
    /// Adds a caller-chosen prefix for a namespace URI.
    #[must_use]
    pub fn prefix(mut self, uri: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.prefixes.push((uri.into(), prefix.into()));
        self
    }

    /// Marks a prefix name as already in scope.
    #[must_use]
    pub fn prefix_in_scope(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes_in_scope.push(prefix.into());
        self
    }

    /// Enables or disables emitting children and the close tag.
    #[must_use]
    pub fn close_element(mut self, close: bool) -> Self {
        self.close_element = close;
        self
    }

    /// Sets the output buffer capacity for the first pass.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

/// Serializes a node tree to an XML string with default options.
///
/// # Errors
///
/// Returns [`SerializeError::Malformed`] if the provider reports a
/// structurally invalid node, or [`SerializeError::Allocation`] if an
/// output buffer cannot be allocated.
///
/// # Examples
///
/// ```
/// use domoxide::{serialize, Element, Node};
///
/// let el = Element::new("simple").attr("to", "jack").text("hello");
/// assert_eq!(
///     serialize(&Node::from(el)).unwrap(),
///     "<simple to='jack'>hello</simple>"
/// );
/// ```
pub fn serialize<N: XmlNode>(node: &N) -> Result<String, SerializeError> {
    serialize_with_options(node, &SerializeOptions::default())
}

/// Serializes a node tree to an XML string with the given options.
///
/// # Errors
///
/// As [`serialize`].
pub fn serialize_with_options<N: XmlNode>(
    node: &N,
    options: &SerializeOptions,
) -> Result<String, SerializeError> {
    // A zero capacity could never grow by doubling.
    let mut capacity = options.initial_capacity.max(1);
    loop {
        let mut out = OutBuf::with_capacity(capacity)?;
        let mut registry = registry_for(options);
        match xml::serialize_node(node, None, &mut registry, options.close_element, &mut out) {
            Ok(()) => return Ok(out.into_string()),
            Err(xml::Halt::Full) => {
                let grown = capacity
                    .checked_mul(2)
                    .ok_or(SerializeError::Allocation { capacity })?;
                trace!(
                    "output buffer full at {} of {capacity} bytes, retrying with {grown}",
                    out.pos()
                );
                capacity = grown;
            }
            Err(xml::Halt::Malformed(reason)) => return Err(SerializeError::Malformed(reason)),
        }
    }
}

/// Builds the registry for one pass: the built-in `xml` binding, then the
/// caller's seeds, then the in-scope markings.
fn registry_for(options: &SerializeOptions) -> PrefixRegistry {
    let mut registry = PrefixRegistry::new();
    for (uri, prefix) in &options.prefixes {
        registry.seed(uri, prefix);
    }
    for prefix in &options.prefixes_in_scope {
        registry.mark_prefix_in_scope(prefix);
    }
    registry
}
