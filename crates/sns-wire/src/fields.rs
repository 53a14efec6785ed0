use crate::cursor::ByteCursor;
use crate::error::WireError;
use crate::varint::encode_varint;

/// Protobuf wire types understood by the decoder.
///
/// Every field starts with a varint key `(field_number << 3) | wire_type`:
///
/// ```text
/// ┌──────┬──────────┬─────────────────────────────────┐
/// │ Wire │ Type     │ Payload format                  │
/// ├──────┼──────────┼─────────────────────────────────┤
/// │ 0    │ Varint   │ Single varint value             │
/// │ 1    │ Fixed64  │ 8 bytes, little endian          │
/// │ 2    │ Len      │ Varint length + raw bytes       │
/// │ 5    │ Fixed32  │ 4 bytes, little endian          │
/// └──────┴──────────┴─────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    Len = 2,
    Fixed32 = 5,
}

impl WireType {
    /// Convert the low three bits of a field key to a [`WireType`].
    ///
    /// `offset` is only used to annotate the error.
    ///
    /// # Errors
    ///
    /// [`WireError::UnsupportedWireType`] for groups (3, 4) and the
    /// undefined values 6 and 7.
    pub fn from_raw(value: u8, offset: usize) -> Result<Self, WireError> {
        match value {
            0 => Ok(Self::Varint),
            1 => Ok(Self::Fixed64),
            2 => Ok(Self::Len),
            5 => Ok(Self::Fixed32),
            other => Err(WireError::UnsupportedWireType {
                value: other,
                offset,
            }),
        }
    }
}

/// The payload of one decoded field, borrowing from the input buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Varint(u64),
    Fixed64(u64),
    Bytes(&'a [u8]),
    Fixed32(u32),
}

impl FieldValue<'_> {
    pub fn wire_type(&self) -> WireType {
        match self {
            Self::Varint(_) => WireType::Varint,
            Self::Fixed64(_) => WireType::Fixed64,
            Self::Bytes(_) => WireType::Len,
            Self::Fixed32(_) => WireType::Fixed32,
        }
    }
}

/// One numbered field of a message, in wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field<'a> {
    pub number: u32,
    pub value: FieldValue<'a>,
    /// Offset of the field key within the message buffer.
    pub offset: usize,
}

/// Read one field (key + payload) from the cursor.
///
/// # Errors
///
/// Any [`WireError`] raised by the key varint, the wire type, or a
/// payload that runs past the end of the buffer.
pub fn read_field<'a>(cursor: &mut ByteCursor<'a>) -> Result<Field<'a>, WireError> {
    let offset = cursor.position();
    let key = cursor.read_varint()?;

    let wire_type = WireType::from_raw((key & 0x07) as u8, offset)?;
    let number = u32::try_from(key >> 3).map_err(|_| WireError::InvalidFieldNumber { offset })?;
    if number == 0 {
        return Err(WireError::InvalidFieldNumber { offset });
    }

    let value = match wire_type {
        WireType::Varint => FieldValue::Varint(cursor.read_varint()?),
        WireType::Fixed64 => FieldValue::Fixed64(cursor.read_u64_le()?),
        WireType::Fixed32 => FieldValue::Fixed32(cursor.read_u32_le()?),
        WireType::Len => {
            let len_offset = cursor.position();
            let len = cursor.read_varint()?;
            let len = usize::try_from(len).map_err(|_| WireError::Truncated {
                offset: len_offset,
                needed: usize::MAX,
                remaining: cursor.remaining(),
            })?;
            FieldValue::Bytes(cursor.take(len)?)
        }
    };

    Ok(Field {
        number,
        value,
        offset,
    })
}

/// Walks a whole protobuf message buffer field by field.
///
/// This is deliberately schema-less: it yields every field in wire order
/// and leaves naming, defaults, and repeated-field handling to the
/// caller. Nested messages come back as [`FieldValue::Bytes`] and can be
/// fed back into [`Message::decode`].
pub struct Message;

impl Message {
    /// Decode every field in `buf`.
    ///
    /// # Errors
    ///
    /// The first [`WireError`] encountered. No partial result is returned.
    pub fn decode(buf: &[u8]) -> Result<Vec<Field<'_>>, WireError> {
        let mut cursor = ByteCursor::new(buf);
        let mut fields = Vec::new();
        while !cursor.is_empty() {
            fields.push(read_field(&mut cursor)?);
        }
        Ok(fields)
    }
}

// ── Encoding helpers ──────────────────────────────────────────────────
//
// Used to build fixtures for tests and fuzz seeds. The exporter itself
// never writes protobuf.

fn push_key(buf: &mut Vec<u8>, field_number: u32, wire_type: WireType) {
    encode_varint((u64::from(field_number) << 3) | wire_type as u64, buf);
}

/// Encode a varint field (wire type 0).
pub fn encode_varint_field(buf: &mut Vec<u8>, field_number: u32, value: u64) {
    push_key(buf, field_number, WireType::Varint);
    encode_varint(value, buf);
}

/// Encode a length-delimited field (wire type 2).
pub fn encode_bytes_field(buf: &mut Vec<u8>, field_number: u32, data: &[u8]) {
    push_key(buf, field_number, WireType::Len);
    encode_varint(data.len() as u64, buf);
    buf.extend_from_slice(data);
}

/// Encode a fixed 64-bit field (wire type 1).
pub fn encode_fixed64_field(buf: &mut Vec<u8>, field_number: u32, value: u64) {
    push_key(buf, field_number, WireType::Fixed64);
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Encode a fixed 32-bit field (wire type 5).
pub fn encode_fixed32_field(buf: &mut Vec<u8>, field_number: u32, value: u32) {
    push_key(buf, field_number, WireType::Fixed32);
    buf.extend_from_slice(&value.to_le_bytes());
}
