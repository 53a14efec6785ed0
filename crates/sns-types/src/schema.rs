use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Field numbers of the `SnsTimeline` message, one per field the export
/// reads.
///
/// The defaults match the cache layout the exporter was written against.
/// Other client versions can be handled by loading an override with
/// [`from_json`](Self::from_json); keys left out keep their default.
///
/// ```json
/// { "favorite_detail": 9, "comment_detail": 12 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimelineFields {
    pub id: u32,
    pub author_wxid: u32,
    pub author_name: u32,
    pub create_time: u32,
    pub content: u32,
    pub favorite_count: u32,
    pub favorite_detail: u32,
    pub comment_count: u32,
    pub comment_detail: u32,
}

impl Default for TimelineFields {
    fn default() -> Self {
        Self {
            id: 1,
            author_wxid: 2,
            author_name: 3,
            create_time: 4,
            content: 5,
            favorite_count: 7,
            favorite_detail: 9,
            comment_count: 10,
            comment_detail: 12,
        }
    }
}

/// The timeline field a field number maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineSlot {
    Id,
    AuthorWxid,
    AuthorName,
    CreateTime,
    Content,
    FavoriteCount,
    FavoriteDetail,
    CommentCount,
    CommentDetail,
}

impl TimelineSlot {
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::AuthorWxid => "author_wxid",
            Self::AuthorName => "author_name",
            Self::CreateTime => "create_time",
            Self::Content => "content",
            Self::FavoriteCount => "favorite_count",
            Self::FavoriteDetail => "favorite_detail",
            Self::CommentCount => "comment_count",
            Self::CommentDetail => "comment_detail",
        }
    }
}

impl TimelineFields {
    /// Parse an override from JSON and validate it.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Json`] for malformed JSON or unknown keys,
    /// [`SchemaError::ZeroFieldNumber`] / [`SchemaError::DuplicateFieldNumber`]
    /// if the resulting numbering is unusable.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let fields: Self = serde_json::from_str(text)?;
        fields.validate()?;
        Ok(fields)
    }

    /// Check that every field number is non-zero and unique.
    ///
    /// # Errors
    ///
    /// See [`from_json`](Self::from_json).
    pub fn validate(&self) -> Result<(), SchemaError> {
        let assigned = self.assignments();
        for (i, &(slot, number)) in assigned.iter().enumerate() {
            if number == 0 {
                return Err(SchemaError::ZeroFieldNumber { field: slot.name() });
            }
            if let Some(&(first, _)) = assigned[..i].iter().find(|(_, n)| *n == number) {
                return Err(SchemaError::DuplicateFieldNumber {
                    number,
                    first: first.name(),
                    second: slot.name(),
                });
            }
        }
        Ok(())
    }

    /// Which timeline field, if any, carries `number`.
    pub fn slot(&self, number: u32) -> Option<TimelineSlot> {
        self.assignments()
            .into_iter()
            .find(|&(_, n)| n == number)
            .map(|(slot, _)| slot)
    }

    fn assignments(&self) -> [(TimelineSlot, u32); 9] {
        [
            (TimelineSlot::Id, self.id),
            (TimelineSlot::AuthorWxid, self.author_wxid),
            (TimelineSlot::AuthorName, self.author_name),
            (TimelineSlot::CreateTime, self.create_time),
            (TimelineSlot::Content, self.content),
            (TimelineSlot::FavoriteCount, self.favorite_count),
            (TimelineSlot::FavoriteDetail, self.favorite_detail),
            (TimelineSlot::CommentCount, self.comment_count),
            (TimelineSlot::CommentDetail, self.comment_detail),
        ]
    }
}
