//! Node and attribute-key definitions for the owned tree.

use super::Element;
use crate::node::AttrName;

/// A node in an owned element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Character data. Escaped when serialized.
    Text(String),
    /// Pre-serialized markup. Emitted verbatim, with no escaping — the
    /// caller is responsible for its well-formedness.
    Raw(String),
    /// An element.
    Element(Element),
}

impl Node {
    /// Creates a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Creates a raw (pre-serialized) node.
    pub fn raw(content: impl Into<String>) -> Self {
        Self::Raw(content.into())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An attribute key: either a plain name or a namespace-qualified pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrKey {
    /// An unqualified name, e.g. `id`.
    Local(String),
    /// A namespace-qualified name, e.g. `(http://www.w3.org/XML/1998/namespace, lang)`
    /// for `xml:lang`.
    Qualified {
        /// The namespace URI.
        uri: String,
        /// The local name.
        name: String,
    },
}

impl AttrKey {
    /// Borrows this key as a provider-contract view.
    #[must_use]
    pub fn as_name(&self) -> AttrName<'_> {
        match self {
            Self::Local(name) => AttrName::Local(name),
            Self::Qualified { uri, name } => AttrName::Qualified { uri, name },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_constructors() {
        assert_eq!(Node::text("hi"), Node::Text("hi".to_string()));
        assert_eq!(Node::raw("<x/>"), Node::Raw("<x/>".to_string()));
    }

    #[test]
    fn test_node_from_element() {
        let node = Node::from(Element::new("a"));
        assert!(matches!(node, Node::Element(_)));
    }

    #[test]
    fn test_attr_key_as_name() {
        let key = AttrKey::Local("id".to_string());
        assert_eq!(key.as_name(), AttrName::Local("id"));

        let key = AttrKey::Qualified {
            uri: "urn:x".to_string(),
            name: "id".to_string(),
        };
        assert_eq!(
            key.as_name(),
            AttrName::Qualified { uri: "urn:x", name: "id" }
        );
    }
}
