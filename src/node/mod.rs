//! The node provider contract.
//!
//! The serializer never commits to a concrete tree representation. It
//! consumes nodes through the [`XmlNode`] / [`XmlElement`] trait pair, which
//! exposes exactly the fields the tree walk needs: a classification of each
//! node (character data, pre-serialized markup, or element) and, for
//! elements, a name, optional namespace URIs, ordered attributes, local
//! prefix overrides, and ordered children.
//!
//! Providers backed by typed trees (like [`crate::tree`]) are infallible by
//! construction. Providers wrapping dynamic host representations can report
//! malformed nodes through the fallible points — [`XmlNode::content`] and
//! the items of [`XmlElement::attributes`] — which abort serialization with
//! a structural error.

use crate::error::MalformedTree;

/// The namespace URI permanently bound to the `xml` prefix.
///
/// See <https://www.w3.org/TR/xml-names/#ns-decl>: this binding is implicit
/// in every document and is never written as a declaration.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Classification of a node, as the serializer consumes it.
#[derive(Debug, Clone, Copy)]
pub enum NodeContent<'a, E> {
    /// Character data, escaped on output.
    Text(&'a str),
    /// Pre-serialized markup, copied through without escaping.
    Raw(&'a str),
    /// An element node.
    Element(&'a E),
}

/// Borrowed view of an attribute key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrName<'a> {
    /// An unqualified attribute name, written as-is.
    Local(&'a str),
    /// A namespace-qualified attribute, written `prefix:name` under a
    /// prefix resolved for `uri`.
    Qualified {
        /// The namespace URI the attribute belongs to.
        uri: &'a str,
        /// The local attribute name.
        name: &'a str,
    },
}

/// A node in a serializable tree.
pub trait XmlNode: Sized {
    /// The element representation paired with this node type.
    type Element: XmlElement<Node = Self>;

    /// Classifies this node.
    ///
    /// An `Err` marks the node as structurally invalid and aborts the
    /// serialization call.
    fn content(&self) -> Result<NodeContent<'_, Self::Element>, MalformedTree>;
}

/// An element in a serializable tree.
///
/// Iteration order of [`attributes`](Self::attributes) and
/// [`children`](Self::children) is the provider's; the serializer preserves
/// it in the output.
pub trait XmlElement: Sized {
    /// The node representation paired with this element type.
    type Node: XmlNode<Element = Self>;
    /// Iterator over attributes in document order. A provider that cannot
    /// represent an attribute as a key/value pair of strings yields an
    /// `Err` item.
    type Attrs<'a>: Iterator<Item = Result<(AttrName<'a>, &'a str), MalformedTree>>
    where
        Self: 'a;
    /// Iterator over local `(uri, prefix)` overrides.
    type Prefixes<'a>: Iterator<Item = (&'a str, &'a str)>
    where
        Self: 'a;
    /// Iterator over child nodes in document order.
    type Children<'a>: Iterator<Item = &'a Self::Node>
    where
        Self: 'a,
        Self::Node: 'a;

    /// The element's local name.
    fn name(&self) -> &str;

    /// The element's own namespace URI, if any.
    fn uri(&self) -> Option<&str>;

    /// The default namespace URI this element declares for itself and its
    /// descendants, if any.
    fn default_uri(&self) -> Option<&str>;

    /// The element's attributes.
    fn attributes(&self) -> Self::Attrs<'_>;

    /// Caller-chosen `(uri, prefix)` bindings scoped to this element.
    fn local_prefixes(&self) -> Self::Prefixes<'_>;

    /// The element's children.
    fn children(&self) -> Self::Children<'_>;
}
