use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row, params};
use tracing::debug;

use crate::error::{ExportError, RowError};

const TIMELINE_QUERY: &str =
    "SELECT Buffer, LocalId, Id, FromUser FROM SNS_Timeline WHERE FromUser = ?1";

/// One `SNS_Timeline` row, as read from the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineRow {
    /// Encoded `SnsTimeline` message. A NULL column reads as empty and a
    /// TEXT column as its raw bytes.
    pub buffer: Vec<u8>,
    pub local_id: i64,
    /// Server-side id column. Its SQL type differs between client
    /// versions, so it is kept as text.
    pub id: Option<String>,
    pub from_user: String,
}

/// Read-only handle on an unencrypted SNS cache database.
pub struct SnsCache {
    conn: Connection,
}

impl SnsCache {
    /// Open the cache file read-only.
    ///
    /// # Errors
    ///
    /// [`ExportError::Open`] if the file cannot be opened as SQLite.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| ExportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened sns cache");
        Ok(Self { conn })
    }

    /// Wrap an already-open connection, e.g. an in-memory test database.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// All timeline rows posted by `user`, in table order.
    ///
    /// A row with a column of the wrong SQL type comes back as a
    /// [`RowError`] in its place, so one bad row never hides the others.
    ///
    /// # Errors
    ///
    /// [`ExportError::Query`] if the table is missing or SQLite fails while
    /// stepping through the result.
    pub fn timeline_rows(
        &self,
        user: &str,
    ) -> Result<Vec<Result<TimelineRow, RowError>>, ExportError> {
        let mut stmt = self.conn.prepare(TIMELINE_QUERY)?;
        let mut rows = stmt.query(params![user])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let position = out.len();
            out.push(read_row(row).map_err(|source| RowError {
                position,
                local_id: row.get(1).ok(),
                source,
            }));
        }
        Ok(out)
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<TimelineRow> {
    // Some clients store the message as TEXT; its bytes are the same.
    let buffer = match row.get_ref(0)? {
        ValueRef::Null => Vec::new(),
        ValueRef::Blob(b) | ValueRef::Text(b) => b.to_vec(),
        other => {
            return Err(rusqlite::Error::InvalidColumnType(
                0,
                "Buffer".to_string(),
                other.data_type(),
            ));
        }
    };
    let id = match row.get_ref(2)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    };
    Ok(TimelineRow {
        buffer,
        local_id: row.get(1)?,
        id,
        from_user: row.get(3)?,
    })
}
