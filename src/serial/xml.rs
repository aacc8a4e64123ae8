//! The tree walker: recursive descent that emits XML.
//!
//! Each element is written in a fixed order: open angle bracket and
//! (possibly prefixed) name, attributes, a default-namespace declaration if
//! one is due, pending `xmlns:prefix` declarations in registry append
//! order, then either `/>`, a short-circuit `>` in open-tag mode, or the
//! children followed by an identically qualified close tag. Namespace
//! declarations bind on the start tag that carries them, so a qualified
//! attribute may precede its declaration within the same tag.

use crate::buffer::{BufferFull, OutBuf};
use crate::error::MalformedTree;
use crate::node::{AttrName, NodeContent, XmlElement, XmlNode};
use crate::serial::escape::{encode, Context};
use crate::serial::prefix::PrefixRegistry;

/// Why a pass stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Halt {
    /// The output buffer cannot hold the next write. The driver grows the
    /// buffer and re-runs the pass.
    Full,
    /// The provider reported a structurally invalid node. Never retried.
    Malformed(MalformedTree),
}

impl From<BufferFull> for Halt {
    fn from(_: BufferFull) -> Self {
        Halt::Full
    }
}

impl From<MalformedTree> for Halt {
    fn from(reason: MalformedTree) -> Self {
        Halt::Malformed(reason)
    }
}

/// Serializes one node (and its subtree) into `out`.
pub(crate) fn serialize_node<'a, N: XmlNode>(
    node: &'a N,
    inherited_default: Option<&'a str>,
    registry: &mut PrefixRegistry,
    close_element: bool,
    out: &mut OutBuf,
) -> Result<(), Halt> {
    match node.content()? {
        NodeContent::Text(content) => Ok(encode(out, content, Context::Text)?),
        NodeContent::Raw(content) => Ok(out.push_str(content)?),
        NodeContent::Element(element) => {
            serialize_element(element, inherited_default, registry, close_element, out)
        }
    }
}

#[allow(clippy::too_many_lines)]
fn serialize_element<'a, E: XmlElement>(
    element: &'a E,
    inherited_default: Option<&'a str>,
    registry: &mut PrefixRegistry,
    close_element: bool,
    out: &mut OutBuf,
) -> Result<(), Halt> {
    // Resolve the default namespace first; it decides whether the tag
    // itself needs a prefix. A declared default equal to the inherited one
    // is a no-op. When the element's own namespace equals the new default
    // and an in-scope prefix already covers it, the xmlns declaration is
    // suppressed, the tag uses that prefix, and descendants keep the
    // inherited default (see DESIGN.md, D1).
    let mut effective_default = inherited_default;
    let mut write_default = None;
    if let Some(declared) = element.default_uri() {
        if inherited_default != Some(declared)
            && !(element.uri() == Some(declared) && registry.uri_in_scope(declared))
        {
            effective_default = Some(declared);
            write_default = Some(declared);
        }
    }

    // Local overrides merge before any prefix is resolved, so they win
    // over synthetic allocation for the same URI.
    for (uri, prefix) in element.local_prefixes() {
        registry.merge_local(uri, prefix);
    }

    let name = element.name();
    let mut tag_prefix = None;
    if let Some(uri) = element.uri() {
        if effective_default != Some(uri) {
            let idx = registry.find_or_create(uri);
            if !registry.in_scope(idx) {
                registry.mark_needs_write(idx);
                registry.mark_in_scope(idx);
            }
            tag_prefix = Some(idx);
        }
    }

    out.push_char('<')?;
    if let Some(idx) = tag_prefix {
        out.push_str(registry.prefix(idx))?;
        out.push_char(':')?;
    }
    out.push_str(name)?;

    for attr in element.attributes() {
        let (key, value) = attr?;
        out.push_char(' ')?;
        match key {
            AttrName::Local(attr_name) => out.push_str(attr_name)?,
            AttrName::Qualified { uri, name: attr_name } => {
                // Qualified attributes always carry a prefix; unprefixed
                // attributes are never in the default namespace.
                let idx = registry.find_or_create(uri);
                if !registry.in_scope(idx) {
                    registry.mark_needs_write(idx);
                }
                out.push_str(registry.prefix(idx))?;
                out.push_char(':')?;
                out.push_str(attr_name)?;
            }
        }
        out.push_str("='")?;
        encode(out, value, Context::Attribute)?;
        out.push_char('\'')?;
    }

    if let Some(declared) = write_default {
        out.push_str(" xmlns='")?;
        out.push_str(declared)?;
        out.push_char('\'')?;
    }

    for idx in 0..registry.len() {
        if !registry.needs_write(idx) || registry.prefix(idx) == "xml" {
            continue;
        }
        out.push_str(" xmlns:")?;
        out.push_str(registry.prefix(idx))?;
        out.push_str("='")?;
        out.push_str(registry.uri(idx))?;
        out.push_char('\'')?;
        registry.mark_written(idx);
    }

    // Open-tag mode: the caller streams the children themselves.
    if !close_element {
        out.push_char('>')?;
        return Ok(());
    }

    let mut children = element.children().peekable();
    if children.peek().is_none() {
        out.push_str("/>")?;
        return Ok(());
    }

    out.push_char('>')?;
    registry.enter_scope();
    let mut walked = Ok(());
    for child in children {
        walked = serialize_node(child, effective_default, registry, close_element, out);
        if walked.is_err() {
            break;
        }
    }
    registry.leave_scope();
    walked?;

    out.push_str("</")?;
    if let Some(idx) = tag_prefix {
        out.push_str(registry.prefix(idx))?;
        out.push_char(':')?;
    }
    out.push_str(name)?;
    out.push_char('>')?;
    Ok(())
}
