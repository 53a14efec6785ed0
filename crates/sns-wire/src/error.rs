/// Errors raised while walking raw bytes: varints, field keys, and
/// length-prefixed payloads.
///
/// Every variant that can point at a position carries the byte offset
/// from the start of the buffer being decoded, so a failing cache row can
/// be located with a hex dump.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WireError {
    /// Varint encoding exceeded 10 bytes without terminating.
    #[error("varint too long: exceeded 10-byte limit")]
    VarintTooLong,

    /// Input ended in the middle of a varint.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A fixed-size or length-prefixed read asked for more bytes than remain.
    #[error("truncated read at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A field key carried a wire type this decoder does not handle.
    ///
    /// Groups (3, 4) are deprecated and never appear in the timeline
    /// messages; 6 and 7 are undefined.
    #[error("unsupported wire type {value} at offset {offset}")]
    UnsupportedWireType { value: u8, offset: usize },

    /// A field key decoded to field number 0, which is reserved.
    #[error("invalid field number 0 at offset {offset}")]
    InvalidFieldNumber { offset: usize },
}
