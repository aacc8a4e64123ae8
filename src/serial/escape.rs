//! Character escaping for text and attribute output.
//!
//! `&`, `<`, and `>` are escaped everywhere; `'` additionally inside
//! attribute values, which are emitted single-quoted. Clean runs between
//! special bytes are located with `memchr` and appended in one
//! bounds-checked copy.

use memchr::{memchr, memchr3};

use crate::buffer::{BufferFull, OutBuf};

/// Where the text being encoded will appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    /// Element character data.
    Text,
    /// A single-quoted attribute value.
    Attribute,
}

/// Appends `text` to `out`, escaping for the given context.
///
/// Either the whole escaped form fits, or this returns [`BufferFull`]
/// without a partially written escape sequence: each run and each
/// replacement is an atomic append.
pub(crate) fn encode(out: &mut OutBuf, text: &str, context: Context) -> Result<(), BufferFull> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        match next_special(&bytes[start..], context) {
            None => return out.push_str(&text[start..]),
            Some(off) => {
                if off > 0 {
                    out.push_str(&text[start..start + off])?;
                }
                let replacement = match bytes[start + off] {
                    b'&' => "&amp;",
                    b'<' => "&lt;",
                    b'>' => "&gt;",
                    // The apostrophe is only reported in attribute context.
                    _ => "&apos;",
                };
                out.push_str(replacement)?;
                start += off + 1;
            }
        }
    }
    Ok(())
}

/// Offset of the next byte needing an escape, if any.
fn next_special(haystack: &[u8], context: Context) -> Option<usize> {
    let base = memchr3(b'&', b'<', b'>', haystack);
    match context {
        Context::Text => base,
        Context::Attribute => match (base, memchr(b'\'', haystack)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        },
    }
}
