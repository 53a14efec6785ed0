use serde::Serialize;
use sns_wire::ByteCursor;

use crate::error::FavoriteError;

/// Fixed metadata preceding each entry. Not interpreted.
pub const ENTRY_HEADER_LEN: usize = 9;

/// Fixed metadata following each entry. Not interpreted.
pub const ENTRY_TRAILER_LEN: usize = 14;

/// Tag byte announcing the display-name field.
pub const DISPLAY_NAME_TAG: u8 = 0x22;

/// Tag byte announcing the user-identifier field.
pub const USER_IDENTIFIER_TAG: u8 = 0x1a;

/// One user who liked a timeline post.
///
/// Serializes as `{"name": ..., "wxid": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FavoriteEntry {
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "wxid")]
    pub user_identifier: String,
}

/// Decode the packed `favorite_detail` buffer of a timeline message.
///
/// The buffer is a run of entries with this framing:
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ header          [9]      skipped                         │
/// │ 0x22            [1]      display-name tag                │
/// │ L1              [1]      display-name length             │
/// │ display_name    [L1]     UTF-8                           │
/// │ 0x1a            [1]      user-identifier tag             │
/// │ L2              [1]      user-identifier length          │
/// │ user_identifier [L2]     UTF-8                           │
/// │ trailer         [14]     skipped, may be short at the end│
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// Decoding stops cleanly when fewer than 9 bytes are left at the start
/// of an entry. Entries come back in buffer order.
///
/// # Errors
///
/// - [`FavoriteError::MalformedTag`] if either tag byte is wrong.
/// - [`FavoriteError::TruncatedField`] if a tag, length, or text read
///   runs past the end of the buffer.
/// - [`FavoriteError::InvalidUtf8`] if a text field is not UTF-8.
///
/// Any error discards the entries decoded so far.
pub fn decode_favorite_list(buf: &[u8]) -> Result<Vec<FavoriteEntry>, FavoriteError> {
    let mut cursor = ByteCursor::new(buf);
    let mut entries = Vec::new();

    while cursor.try_take(ENTRY_HEADER_LEN).is_some() {
        let display_name = read_tagged_text(&mut cursor, DISPLAY_NAME_TAG, "display_name")?;
        let user_identifier =
            read_tagged_text(&mut cursor, USER_IDENTIFIER_TAG, "user_identifier")?;
        entries.push(FavoriteEntry {
            display_name,
            user_identifier,
        });
        cursor.skip_at_most(ENTRY_TRAILER_LEN);
    }

    Ok(entries)
}

/// Read `tag │ len │ bytes[len]` and return the bytes as a `String`.
fn read_tagged_text(
    cursor: &mut ByteCursor<'_>,
    expected: u8,
    field: &'static str,
) -> Result<String, FavoriteError> {
    let offset = cursor.position();
    let found = read_byte(cursor)?;
    if found != expected {
        return Err(FavoriteError::MalformedTag {
            offset,
            expected,
            found,
        });
    }

    let len = usize::from(read_byte(cursor)?);
    let text_offset = cursor.position();
    let bytes = take(cursor, len)?;

    String::from_utf8(bytes.to_vec()).map_err(|_| FavoriteError::InvalidUtf8 {
        field,
        offset: text_offset,
    })
}

fn read_byte(cursor: &mut ByteCursor<'_>) -> Result<u8, FavoriteError> {
    let offset = cursor.position();
    cursor
        .read_u8()
        .map_err(|_| FavoriteError::TruncatedField {
            offset,
            needed: 1,
            remaining: 0,
        })
}

fn take<'a>(cursor: &mut ByteCursor<'a>, n: usize) -> Result<&'a [u8], FavoriteError> {
    let offset = cursor.position();
    let remaining = cursor.remaining();
    cursor.try_take(n).ok_or(FavoriteError::TruncatedField {
        offset,
        needed: n,
        remaining,
    })
}
