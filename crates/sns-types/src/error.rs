use sns_wire::WireError;

/// Errors from decoding a `favorite_detail` buffer.
///
/// Each one makes the whole buffer undecodable: the decoder never hands
/// back a partial list and never tries to resynchronize.
///
/// A buffer that ends with fewer than 9 bytes before the next entry is
/// not an error; decoding simply stops there.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FavoriteError {
    /// A tag byte did not match the sentinel for its field.
    #[error("malformed tag at offset {offset}: expected {expected:#04x}, found {found:#04x}")]
    MalformedTag { offset: usize, expected: u8, found: u8 },

    /// A tag, length, or text read ran past the end of the buffer.
    #[error("truncated field at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    TruncatedField {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A text field was not valid UTF-8.
    #[error("invalid UTF-8 in {field} at offset {offset}")]
    InvalidUtf8 { field: &'static str, offset: usize },
}

/// Errors from turning one cache row into a typed record.
///
/// ```text
/// TypeError
/// ├── Wire(WireError)          ← the timeline message itself is malformed
/// ├── Favorite(FavoriteError)  ← favorite_detail could not be decoded
/// └── InvalidUtf8              ← a string field of the message is not UTF-8
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    #[error("timeline message")]
    Wire(#[from] WireError),

    #[error("favorite_detail")]
    Favorite(#[from] FavoriteError),

    #[error("invalid UTF-8 in string field {field}")]
    InvalidUtf8 { field: &'static str },
}

/// Errors from loading a [`TimelineFields`](crate::schema::TimelineFields)
/// override.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid schema JSON")]
    Json(#[from] serde_json::Error),

    #[error("field {field} has field number 0")]
    ZeroFieldNumber { field: &'static str },

    #[error("field number {number} is assigned to both {first} and {second}")]
    DuplicateFieldNumber {
        number: u32,
        first: &'static str,
        second: &'static str,
    },
}
