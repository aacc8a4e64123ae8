//! # domoxide
//!
//! A namespace-aware XML serializer for Twisted `domish`-style element
//! trees. Converts an in-memory tree of text and element nodes into
//! well-formed XML text, allocating and scoping namespace prefixes on the
//! fly, and writing into a size-limited output buffer that grows and
//! retries on overflow.
//!
//! The serializer consumes nodes through the [`node`] provider contract,
//! so any tree representation can be serialized; the [`tree`] module
//! supplies a ready-made owned tree with a builder API.
//!
//! ## Quick Start
//!
//! ```
//! use domoxide::{serialize, Element, Node};
//!
//! let message = Element::new("message")
//!     .attr("to", "romeo@example.net")
//!     .text("Art thou not Romeo?");
//! let xml = serialize(&Node::from(message)).unwrap();
//! assert_eq!(xml, "<message to='romeo@example.net'>Art thou not Romeo?</message>");
//! ```
//!
//! Namespace prefixes are allocated and scoped automatically:
//!
//! ```
//! use domoxide::{serialize, Element, Node};
//!
//! let iq = Element::new("iq")
//!     .default_namespace("jabber:client")
//!     .child(Element::new("query").namespace("jabber:iq:roster"));
//! let xml = serialize(&Node::from(iq)).unwrap();
//! assert_eq!(xml, "<iq xmlns='jabber:client'><ns0:query xmlns:ns0='jabber:iq:roster'/></iq>");
//! ```

mod buffer;
pub mod error;
pub mod node;
pub mod serial;
pub mod tree;

// Re-export primary types at the crate root for convenience.
pub use error::{MalformedTree, SerializeError};
pub use node::{AttrName, NodeContent, XmlElement, XmlNode, XML_NAMESPACE};
pub use serial::{serialize, serialize_with_options, SerializeOptions};
pub use tree::{AttrKey, Element, Node};
