use crate::error::WireError;
use crate::varint::decode_varint;

/// Position-tracking reader over an immutable byte slice.
///
/// Every read is bounds-checked against the remaining bytes before the
/// position moves, so a failed read leaves the cursor where it was.
///
/// ```text
///   buf:  [ consumed ........ | remaining ................ ]
///                             ^ position()
/// ```
///
/// Two flavours of fixed-size read are offered:
///
/// - [`take`](Self::take) fails with [`WireError::Truncated`] when short.
/// - [`try_take`](Self::try_take) returns `None` when short, for callers
///   that treat a short tail as a clean end of input.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Offset of the next unread byte from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread tail of the buffer, without advancing.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Read exactly `n` bytes.
    ///
    /// # Errors
    ///
    /// [`WireError::Truncated`] if fewer than `n` bytes remain. The
    /// position is unchanged on error.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        self.try_take(n).ok_or(WireError::Truncated {
            offset: self.pos,
            needed: n,
            remaining: self.remaining(),
        })
    }

    /// Read exactly `n` bytes, or return `None` without advancing if
    /// fewer than `n` remain.
    pub fn try_take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let bytes = self.buf.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    /// Read a single byte.
    ///
    /// # Errors
    ///
    /// [`WireError::Truncated`] at end of input.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take(1)?[0])
    }

    /// Read an unsigned LEB128 varint.
    ///
    /// # Errors
    ///
    /// [`WireError::VarintTooLong`] or [`WireError::UnexpectedEof`], with
    /// the EOF offset reported relative to the whole buffer.
    pub fn read_varint(&mut self) -> Result<u64, WireError> {
        let (value, n) = decode_varint(self.rest()).map_err(|e| match e {
            WireError::UnexpectedEof { offset } => WireError::UnexpectedEof {
                offset: self.pos + offset,
            },
            other => other,
        })?;
        self.pos += n;
        Ok(value)
    }

    /// Read a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// [`WireError::Truncated`] if fewer than 4 bytes remain.
    pub fn read_u32_le(&mut self) -> Result<u32, WireError> {
        let bytes = self.take(4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(raw))
    }

    /// Read a little-endian `u64`.
    ///
    /// # Errors
    ///
    /// [`WireError::Truncated`] if fewer than 8 bytes remain.
    pub fn read_u64_le(&mut self) -> Result<u64, WireError> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    /// Skip up to `n` bytes, stopping early at end of input.
    ///
    /// Returns the number of bytes actually skipped.
    pub fn skip_at_most(&mut self, n: usize) -> usize {
        let skipped = n.min(self.remaining());
        self.pos += skipped;
        skipped
    }
}
