//! Fixture builders for the integration tests.
//!
//! Produces byte-exact `favorite_detail` runs, `SnsTimeline` messages in
//! the default field numbering, and `SNS_Timeline` tables in SQLite.

use std::path::Path;

use rusqlite::{Connection, params};
use sns_store::SnsCache;
use sns_types::favorite::{
    DISPLAY_NAME_TAG, ENTRY_HEADER_LEN, ENTRY_TRAILER_LEN, USER_IDENTIFIER_TAG,
};
use sns_wire::fields::{encode_bytes_field, encode_varint_field};

/// Header bytes placed before each fixture entry.
pub const ENTRY_HEADER: [u8; ENTRY_HEADER_LEN] = [0x0A, 0x07, 0x08, 0x01, 0x10, 0x00, 0x18, 0x00, 0x20];

/// Trailer bytes placed after each fixture entry.
pub const ENTRY_TRAILER: [u8; ENTRY_TRAILER_LEN] = [
    0x28, 0x00, 0x30, 0x00, 0x38, 0x01, 0x40, 0x00, 0x48, 0x00, 0x50, 0x00, 0x58, 0x00,
];

/// Append one entry: header, `0x22 len name`, `0x1a len wxid`, trailer.
///
/// # Panics
///
/// If either text is longer than 255 bytes.
pub fn push_favorite(buf: &mut Vec<u8>, name: &str, wxid: &str) {
    buf.extend_from_slice(&ENTRY_HEADER);
    push_text(buf, DISPLAY_NAME_TAG, name);
    push_text(buf, USER_IDENTIFIER_TAG, wxid);
    buf.extend_from_slice(&ENTRY_TRAILER);
}

fn push_text(buf: &mut Vec<u8>, tag: u8, text: &str) {
    let len = u8::try_from(text.len()).expect("fixture text longer than 255 bytes");
    buf.push(tag);
    buf.push(len);
    buf.extend_from_slice(text.as_bytes());
}

/// A packed `favorite_detail` buffer for `(name, wxid)` pairs.
pub fn favorite_detail(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    for (name, wxid) in entries {
        push_favorite(&mut buf, name, wxid);
    }
    buf
}

/// The fields of one fixture moment.
#[derive(Clone, Debug, Default)]
pub struct Moment<'a> {
    pub id: u64,
    pub create_time: u64,
    pub content: &'a str,
    pub author_wxid: &'a str,
    pub author_name: &'a str,
    pub favorites: &'a [(&'a str, &'a str)],
    pub comment_count: u32,
    pub comment_detail: &'a [u8],
}

impl Moment<'_> {
    /// Encode as an `SnsTimeline` message in the default numbering.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_varint_field(&mut buf, 1, self.id);
        encode_bytes_field(&mut buf, 2, self.author_wxid.as_bytes());
        encode_bytes_field(&mut buf, 3, self.author_name.as_bytes());
        encode_varint_field(&mut buf, 4, self.create_time);
        encode_bytes_field(&mut buf, 5, self.content.as_bytes());
        // field 6 is not exported; make sure it is skipped
        encode_varint_field(&mut buf, 6, 1);
        encode_varint_field(&mut buf, 7, self.favorites.len() as u64);
        encode_bytes_field(&mut buf, 9, &favorite_detail(self.favorites));
        encode_varint_field(&mut buf, 10, u64::from(self.comment_count));
        encode_bytes_field(&mut buf, 12, self.comment_detail);
        buf
    }
}

const SCHEMA: &str = "CREATE TABLE SNS_Timeline (
    LocalId INTEGER PRIMARY KEY,
    Id TEXT,
    FromUser TEXT,
    Type INTEGER,
    CreateTime INTEGER,
    Buffer BLOB
);";

/// Create an `SNS_Timeline` table on `conn` and insert
/// `(local_id, from_user, buffer)` rows in order.
///
/// # Panics
///
/// On any SQLite error.
pub fn fill_timeline(conn: &Connection, rows: &[(i64, &str, Vec<u8>)]) {
    conn.execute_batch(SCHEMA).expect("create SNS_Timeline");
    for (local_id, user, buffer) in rows {
        conn.execute(
            "INSERT INTO SNS_Timeline (LocalId, Id, FromUser, Type, Buffer)
             VALUES (?1, ?2, ?3, 1, ?4)",
            params![local_id, format!("1391{local_id}"), user, buffer],
        )
        .expect("insert timeline row");
    }
}

/// An in-memory cache holding `rows`.
pub fn memory_cache(rows: &[(i64, &str, Vec<u8>)]) -> SnsCache {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    fill_timeline(&conn, rows);
    SnsCache::from_connection(conn)
}

/// Write a cache file at `path` holding `rows`.
pub fn write_cache_file(path: &Path, rows: &[(i64, &str, Vec<u8>)]) {
    let _ = std::fs::remove_file(path);
    let conn = Connection::open(path).expect("create cache file");
    fill_timeline(&conn, rows);
}
