//! Owned element tree with a builder API.
//!
//! This module provides the ready-made tree representation: an [`Element`]
//! owns its name, namespace URIs, ordered attributes, local prefix
//! overrides, and children, and a [`Node`] is either an element, character
//! data, or pre-serialized markup. The types implement the
//! [`crate::node`] provider contract, so a tree built here serializes
//! directly.
//!
//! The shape mirrors Twisted's `domish.Element`: an element carries both
//! its own namespace `uri` and the `default_uri` it declares for
//! descendants, and attributes are keyed by plain names or `(uri, name)`
//! pairs.
//!
//! # Examples
//!
//! ```
//! use domoxide::{serialize, Element, Node};
//!
//! let presence = Element::new("presence")
//!     .attr("from", "juliet@capulet.lit")
//!     .child(Element::new("show").text("away"));
//! let xml = serialize(&Node::from(presence)).unwrap();
//! assert_eq!(
//!     xml,
//!     "<presence from='juliet@capulet.lit'><show>away</show></presence>"
//! );
//! ```

mod node;

pub use node::{AttrKey, Node};

use crate::error::MalformedTree;
use crate::node::{AttrName, NodeContent, XmlElement, XmlNode};

/// An XML element: name, optional namespaces, ordered attributes, local
/// prefix overrides, and children.
///
/// Built with consuming `#[must_use]` methods:
///
/// ```
/// use domoxide::Element;
///
/// let el = Element::new("body")
///     .namespace("http://www.w3.org/1999/xhtml")
///     .attr("class", "quote")
///     .text("Call me but love");
/// assert_eq!(el.name(), "body");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    uri: Option<String>,
    default_uri: Option<String>,
    /// Ordered mapping; keys are unique, insertion order is emission order.
    attributes: Vec<(AttrKey, String)>,
    /// Ordered `(uri, prefix)` overrides scoped to this element.
    local_prefixes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element with the given local name and nothing else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: None,
            default_uri: None,
            attributes: Vec::new(),
            local_prefixes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the element's own namespace URI.
    #[must_use]
    pub fn namespace(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Sets the default namespace URI this element declares for itself and
    /// its descendants.
    #[must_use]
    pub fn default_namespace(mut self, uri: impl Into<String>) -> Self {
        self.default_uri = Some(uri.into());
        self
    }

    /// Sets an unqualified attribute. Re-setting a key replaces its value
    /// in place, keeping the original position.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(AttrKey::Local(name.into()), value.into());
        self
    }

    /// Sets a namespace-qualified attribute.
    #[must_use]
    pub fn attr_ns(
        mut self,
        uri: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set_attr(
            AttrKey::Qualified {
                uri: uri.into(),
                name: name.into(),
            },
            value.into(),
        );
        self
    }

    /// Declares a caller-chosen `(uri, prefix)` binding scoped to this
    /// element, taking precedence over a synthetic prefix that would
    /// otherwise be generated for `uri`.
    #[must_use]
    pub fn local_prefix(mut self, uri: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.local_prefixes.push((uri.into(), prefix.into()));
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(Node::Text(content.into()));
        self
    }

    /// Appends a raw (pre-serialized) child, emitted without escaping.
    #[must_use]
    pub fn raw(mut self, content: impl Into<String>) -> Self {
        self.children.push(Node::Raw(content.into()));
        self
    }

    /// Wraps this element into a [`Node`].
    #[must_use]
    pub fn into_node(self) -> Node {
        Node::Element(self)
    }

    /// The element's local name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element's own namespace URI, if any.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// The default namespace URI declared on this element, if any.
    #[must_use]
    pub fn default_uri(&self) -> Option<&str> {
        self.default_uri.as_deref()
    }

    /// The attributes, in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[(AttrKey, String)] {
        &self.attributes
    }

    /// The local prefix overrides, in insertion order.
    #[must_use]
    pub fn local_prefixes(&self) -> &[(String, String)] {
        &self.local_prefixes
    }

    /// The children, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    fn set_attr(&mut self, key: AttrKey, value: String) {
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.attributes.push((key, value));
        }
    }
}

/// Iterator over an element's attributes as provider-contract views.
#[derive(Debug)]
pub struct Attrs<'a> {
    inner: std::slice::Iter<'a, (AttrKey, String)>,
}

impl<'a> Iterator for Attrs<'a> {
    type Item = Result<(AttrName<'a>, &'a str), MalformedTree>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, value)| Ok((key.as_name(), value.as_str())))
    }
}

/// Iterator over an element's `(uri, prefix)` overrides.
#[derive(Debug)]
pub struct LocalPrefixes<'a> {
    inner: std::slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for LocalPrefixes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(uri, prefix)| (uri.as_str(), prefix.as_str()))
    }
}

/// Iterator over an element's children.
#[derive(Debug)]
pub struct Children<'a> {
    inner: std::slice::Iter<'a, Node>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl XmlNode for Node {
    type Element = Element;

    fn content(&self) -> Result<NodeContent<'_, Element>, MalformedTree> {
        Ok(match self {
            Node::Text(content) => NodeContent::Text(content),
            Node::Raw(content) => NodeContent::Raw(content),
            Node::Element(element) => NodeContent::Element(element),
        })
    }
}

impl XmlElement for Element {
    type Node = Node;
    type Attrs<'a> = Attrs<'a> where Self: 'a;
    type Prefixes<'a> = LocalPrefixes<'a> where Self: 'a;
    type Children<'a> = Children<'a> where Self: 'a, Self::Node: 'a;

    fn name(&self) -> &str {
        &self.name
    }

    fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    fn default_uri(&self) -> Option<&str> {
        self.default_uri.as_deref()
    }

    fn attributes(&self) -> Attrs<'_> {
        Attrs {
            inner: self.attributes.iter(),
        }
    }

    fn local_prefixes(&self) -> LocalPrefixes<'_> {
        LocalPrefixes {
            inner: self.local_prefixes.iter(),
        }
    }

    fn children(&self) -> Children<'_> {
        Children {
            inner: self.children.iter(),
        }
    }
}
