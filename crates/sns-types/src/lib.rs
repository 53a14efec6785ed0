#![warn(clippy::pedantic)]

pub mod error;
pub mod favorite;
pub mod record;
pub mod schema;
pub mod timeline;

pub use error::{FavoriteError, SchemaError, TypeError};
pub use favorite::{FavoriteEntry, decode_favorite_list};
pub use record::MomentRecord;
pub use schema::TimelineFields;
pub use timeline::TimelineMessage;
