use crate::error::WireError;

/// Maximum number of bytes a u64 varint can occupy: ceil(64 / 7).
pub const MAX_VARINT_BYTES: usize = 10;

/// Append `value` to `buf` as an unsigned LEB128 varint.
///
/// Returns the number of bytes written (1–10).
///
/// | Value   | Encoded bytes        |
/// |---------|----------------------|
/// | 0       | `[0x00]`             |
/// | 127     | `[0x7F]`             |
/// | 128     | `[0x80, 0x01]`       |
/// | 300     | `[0xAC, 0x02]`       |
/// | 16384   | `[0x80, 0x80, 0x01]` |
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) -> usize {
    let start = buf.len();
    while value >= 0x80 {
        buf.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
    buf.len() - start
}

/// Decode an unsigned LEB128 varint from the front of `buf`.
///
/// Returns `(value, bytes_consumed)`. Trailing bytes are left alone.
///
/// # Errors
///
/// - [`WireError::VarintTooLong`] if no terminating byte appears within
///   10 bytes.
/// - [`WireError::UnexpectedEof`] if `buf` ends mid-varint; the offset is
///   relative to `buf`.
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize), WireError> {
    let mut value: u64 = 0;

    for (i, &byte) in buf.iter().enumerate() {
        if i >= MAX_VARINT_BYTES {
            return Err(WireError::VarintTooLong);
        }
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    if buf.len() >= MAX_VARINT_BYTES {
        return Err(WireError::VarintTooLong);
    }
    Err(WireError::UnexpectedEof { offset: buf.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_varint(value, &mut buf);
        buf
    }

    #[test]
    fn encode_known_values() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(127), vec![0x7F]);
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xAC, 0x02]);
        assert_eq!(encode(16384), vec![0x80, 0x80, 0x01]);
        assert_eq!(encode(u64::MAX).len(), MAX_VARINT_BYTES);
    }

    #[test]
    fn encode_appends_to_existing_buffer() {
        let mut buf = vec![0xEE];
        let n = encode_varint(300, &mut buf);
        assert_eq!(n, 2);
        assert_eq!(buf, vec![0xEE, 0xAC, 0x02]);
    }

    #[test]
    fn decode_boundary_values() {
        for value in [0, 1, 127, 128, 16383, 16384, u64::from(u32::MAX), u64::MAX] {
            let encoded = encode(value);
            assert_eq!(decode_varint(&encoded).unwrap(), (value, encoded.len()));
        }
    }

    #[test]
    fn decode_leaves_trailing_bytes() {
        assert_eq!(decode_varint(&[0xAC, 0x02, 0xFF]).unwrap(), (300, 2));
    }

    #[test]
    fn decode_empty_input() {
        assert_eq!(
            decode_varint(&[]),
            Err(WireError::UnexpectedEof { offset: 0 })
        );
    }

    #[test]
    fn decode_truncated_varint() {
        assert_eq!(
            decode_varint(&[0x80, 0x80]),
            Err(WireError::UnexpectedEof { offset: 2 })
        );
    }

    #[test]
    fn decode_too_long() {
        assert_eq!(decode_varint(&[0x80; 11]), Err(WireError::VarintTooLong));
        assert_eq!(decode_varint(&[0x80; 10]), Err(WireError::VarintTooLong));
    }
}
