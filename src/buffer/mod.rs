//! Bounds-checked append buffer for serializer output.
//!
//! An [`OutBuf`] holds UTF-8 output up to a fixed logical capacity. Every
//! write either completes in full or returns [`BufferFull`] with the cursor
//! unchanged — there are no torn writes, so a failed pass can simply be
//! thrown away and re-run in a larger buffer.

use crate::error::SerializeError;

/// Signal that a write did not fit in the remaining capacity.
///
/// Recoverable: the driver reacts by doubling the capacity and re-running
/// the whole serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BufferFull;

/// An append-only output buffer with a fixed logical capacity.
#[derive(Debug)]
pub(crate) struct OutBuf {
    buf: String,
    capacity: usize,
}

impl OutBuf {
    /// Allocates a buffer of the given capacity.
    ///
    /// Allocation failure is reported as [`SerializeError::Allocation`]
    /// rather than aborting the process.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, SerializeError> {
        let mut buf = String::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| SerializeError::Allocation { capacity })?;
        Ok(Self { buf, capacity })
    }

    /// The write cursor: how many bytes have been appended.
    pub(crate) fn pos(&self) -> usize {
        self.buf.len()
    }

    /// Bytes still available before the capacity is reached.
    pub(crate) fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    /// Appends a string slice, whole or not at all.
    pub(crate) fn push_str(&mut self, s: &str) -> Result<(), BufferFull> {
        if s.len() > self.remaining() {
            return Err(BufferFull);
        }
        self.buf.push_str(s);
        Ok(())
    }

    /// Appends a single character, whole or not at all.
    pub(crate) fn push_char(&mut self, c: char) -> Result<(), BufferFull> {
        if c.len_utf8() > self.remaining() {
            return Err(BufferFull);
        }
        self.buf.push(c);
        Ok(())
    }

    /// Consumes the buffer, yielding the accumulated output.
    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut out = OutBuf::with_capacity(8).unwrap();
        out.push_str("ab").unwrap();
        out.push_char('c').unwrap();
        assert_eq!(out.pos(), 3);
        assert_eq!(out.remaining(), 5);
        assert_eq!(out.into_string(), "abc");
    }

    #[test]
    fn test_overflow_leaves_cursor_unchanged() {
        let mut out = OutBuf::with_capacity(4).unwrap();
        out.push_str("abc").unwrap();
        assert_eq!(out.push_str("de"), Err(BufferFull));
        assert_eq!(out.pos(), 3);
        // A write that exactly fits still succeeds.
        out.push_char('d').unwrap();
        assert_eq!(out.remaining(), 0);
        assert_eq!(out.push_char('e'), Err(BufferFull));
        assert_eq!(out.into_string(), "abcd");
    }

    #[test]
    fn test_multibyte_char_accounting() {
        let mut out = OutBuf::with_capacity(2).unwrap();
        // 'é' is two bytes in UTF-8; '✓' is three and does not fit.
        assert_eq!(out.push_char('✓'), Err(BufferFull));
        out.push_char('é').unwrap();
        assert_eq!(out.remaining(), 0);
        assert_eq!(out.into_string(), "é");
    }

    #[test]
    fn test_zero_capacity() {
        let mut out = OutBuf::with_capacity(0).unwrap();
        assert_eq!(out.remaining(), 0);
        assert_eq!(out.push_str("x"), Err(BufferFull));
        assert!(out.push_str("").is_ok());
    }
}
