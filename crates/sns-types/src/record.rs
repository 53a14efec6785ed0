use serde::{Serialize, Serializer};

use crate::error::TypeError;
use crate::favorite::{FavoriteEntry, decode_favorite_list};
use crate::schema::TimelineFields;
use crate::timeline::TimelineMessage;

/// One exported moment: the cache row's local id, the decoded timeline
/// message, and its decoded favorite list.
///
/// Field order is the JSON key order. `comment_detail` is emitted as
/// lowercase hex since it is still an undecoded blob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MomentRecord {
    pub local_id: i64,
    pub id: u64,
    pub create_time: u64,
    pub content: String,
    pub author_wxid: String,
    pub author_name: String,
    pub favorite_count: u32,
    pub favorite_users: Vec<FavoriteEntry>,
    pub comment_count: u32,
    #[serde(serialize_with = "as_hex")]
    pub comment_detail: Vec<u8>,
}

impl MomentRecord {
    /// Decode a `Buffer` column value into a record.
    ///
    /// # Errors
    ///
    /// Any [`TypeError`] from the timeline message or its favorite list.
    pub fn decode(local_id: i64, buffer: &[u8], schema: &TimelineFields) -> Result<Self, TypeError> {
        let msg = TimelineMessage::decode(buffer, schema)?;
        let favorite_users = decode_favorite_list(&msg.favorite_detail)?;
        Ok(Self::from_parts(local_id, msg, favorite_users))
    }

    pub fn from_parts(
        local_id: i64,
        msg: TimelineMessage,
        favorite_users: Vec<FavoriteEntry>,
    ) -> Self {
        Self {
            local_id,
            id: msg.id,
            create_time: msg.create_time,
            content: msg.content,
            author_wxid: msg.author_wxid,
            author_name: msg.author_name,
            favorite_count: msg.favorite_count,
            favorite_users,
            comment_count: msg.comment_count,
            comment_detail: msg.comment_detail,
        }
    }
}

fn as_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}
