use sns_wire::fields::{FieldValue, Message};

use crate::error::TypeError;
use crate::schema::{TimelineFields, TimelineSlot};

/// The parts of an `SnsTimeline` message the export uses.
///
/// Absent fields keep protobuf defaults (zero / empty). When a field
/// number repeats, the last occurrence wins, as protobuf does for
/// singular fields.
///
/// `favorite_detail` and `comment_detail` are kept as raw bytes here;
/// the favorite list is decoded separately by
/// [`decode_favorite_list`](crate::favorite::decode_favorite_list).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimelineMessage {
    pub id: u64,
    pub create_time: u64,
    pub content: String,
    pub author_wxid: String,
    pub author_name: String,
    pub favorite_count: u32,
    pub favorite_detail: Vec<u8>,
    pub comment_count: u32,
    pub comment_detail: Vec<u8>,
}

impl TimelineMessage {
    /// Decode a `Buffer` column value using the given field numbering.
    ///
    /// Unknown field numbers are skipped. A known number arriving with a
    /// different wire type than expected is skipped too, the same way a
    /// protobuf parser files it under unknown fields.
    ///
    /// # Errors
    ///
    /// - [`TypeError::Wire`] if the buffer is not a valid message.
    /// - [`TypeError::InvalidUtf8`] if a string field is not UTF-8.
    pub fn decode(buf: &[u8], schema: &TimelineFields) -> Result<Self, TypeError> {
        let mut msg = Self::default();

        for field in Message::decode(buf)? {
            let Some(slot) = schema.slot(field.number) else {
                continue;
            };

            match (slot, field.value) {
                (TimelineSlot::Id, FieldValue::Varint(v)) => msg.id = v,
                (TimelineSlot::CreateTime, FieldValue::Varint(v)) => msg.create_time = v,
                // uint32 fields keep the low 32 bits of the varint.
                (TimelineSlot::FavoriteCount, FieldValue::Varint(v)) => {
                    msg.favorite_count = low_u32(v);
                }
                (TimelineSlot::CommentCount, FieldValue::Varint(v)) => {
                    msg.comment_count = low_u32(v);
                }
                (TimelineSlot::Content, FieldValue::Bytes(b)) => {
                    msg.content = utf8(b, slot)?;
                }
                (TimelineSlot::AuthorWxid, FieldValue::Bytes(b)) => {
                    msg.author_wxid = utf8(b, slot)?;
                }
                (TimelineSlot::AuthorName, FieldValue::Bytes(b)) => {
                    msg.author_name = utf8(b, slot)?;
                }
                (TimelineSlot::FavoriteDetail, FieldValue::Bytes(b)) => {
                    msg.favorite_detail = b.to_vec();
                }
                (TimelineSlot::CommentDetail, FieldValue::Bytes(b)) => {
                    msg.comment_detail = b.to_vec();
                }
                _ => {}
            }
        }

        Ok(msg)
    }
}

/// Low 32 bits of a varint, as protobuf does for `uint32` fields.
#[allow(clippy::cast_possible_truncation)]
fn low_u32(v: u64) -> u32 {
    v as u32
}

fn utf8(bytes: &[u8], slot: TimelineSlot) -> Result<String, TypeError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| TypeError::InvalidUtf8 { field: slot.name() })
}

#[cfg(test)]
mod tests {
    use sns_wire::WireError;
    use sns_wire::fields::{encode_bytes_field, encode_fixed32_field, encode_varint_field};

    use super::*;

    fn sample() -> Vec<u8> {
        let mut buf = Vec::new();
        encode_varint_field(&mut buf, 1, 13_911_111_111_111_111_111);
        encode_bytes_field(&mut buf, 2, b"wxid_author");
        encode_bytes_field(&mut buf, 3, "作者".as_bytes());
        encode_varint_field(&mut buf, 4, 1_700_000_000);
        encode_bytes_field(&mut buf, 5, b"hello moments");
        encode_varint_field(&mut buf, 7, 2);
        encode_bytes_field(&mut buf, 9, &[0x01, 0x02]);
        encode_varint_field(&mut buf, 10, 1);
        encode_bytes_field(&mut buf, 12, &[0xAB, 0xCD]);
        buf
    }

    #[test]
    fn decodes_default_layout() {
        let msg = TimelineMessage::decode(&sample(), &TimelineFields::default()).unwrap();
        assert_eq!(
            msg,
            TimelineMessage {
                id: 13_911_111_111_111_111_111,
                create_time: 1_700_000_000,
                content: "hello moments".to_string(),
                author_wxid: "wxid_author".to_string(),
                author_name: "作者".to_string(),
                favorite_count: 2,
                favorite_detail: vec![0x01, 0x02],
                comment_count: 1,
                comment_detail: vec![0xAB, 0xCD],
            }
        );
    }

    #[test]
    fn empty_buffer_gives_defaults() {
        let msg = TimelineMessage::decode(&[], &TimelineFields::default()).unwrap();
        assert_eq!(msg, TimelineMessage::default());
    }

    #[test]
    fn unknown_and_mistyped_fields_skipped() {
        let mut buf = Vec::new();
        encode_bytes_field(&mut buf, 99, b"ignored");
        encode_fixed32_field(&mut buf, 4, 5);
        encode_bytes_field(&mut buf, 1, b"not a varint");
        let msg = TimelineMessage::decode(&buf, &TimelineFields::default()).unwrap();
        assert_eq!(msg, TimelineMessage::default());
    }

    #[test]
    fn last_occurrence_wins() {
        let mut buf = Vec::new();
        encode_bytes_field(&mut buf, 5, b"first");
        encode_bytes_field(&mut buf, 5, b"second");
        let msg = TimelineMessage::decode(&buf, &TimelineFields::default()).unwrap();
        assert_eq!(msg.content, "second");
    }

    #[test]
    fn count_keeps_low_32_bits() {
        let mut buf = Vec::new();
        encode_varint_field(&mut buf, 7, (1 << 32) | 3);
        let msg = TimelineMessage::decode(&buf, &TimelineFields::default()).unwrap();
        assert_eq!(msg.favorite_count, 3);
    }

    #[test]
    fn custom_numbering() {
        let schema = TimelineFields {
            content: 30,
            ..TimelineFields::default()
        };
        let mut buf = Vec::new();
        encode_bytes_field(&mut buf, 5, b"old slot");
        encode_bytes_field(&mut buf, 30, b"new slot");
        let msg = TimelineMessage::decode(&buf, &schema).unwrap();
        assert_eq!(msg.content, "new slot");
    }

    #[test]
    fn invalid_utf8_content() {
        let mut buf = Vec::new();
        encode_bytes_field(&mut buf, 5, &[0xC3, 0x28]);
        assert!(matches!(
            TimelineMessage::decode(&buf, &TimelineFields::default()),
            Err(TypeError::InvalidUtf8 { field: "content" })
        ));
    }

    #[test]
    fn truncated_message() {
        let mut buf = sample();
        buf.pop();
        assert!(matches!(
            TimelineMessage::decode(&buf, &TimelineFields::default()),
            Err(TypeError::Wire(WireError::Truncated { .. }))
        ));
    }
}
