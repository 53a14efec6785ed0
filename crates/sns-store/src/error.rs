use std::path::PathBuf;

use sns_types::TypeError;

/// Errors that end an export.
///
/// ```text
/// ExportError
/// ├── Open     ← the cache file could not be opened
/// ├── Query    ← SNS_Timeline could not be read
/// ├── Row      ← a row has a column of the wrong SQL type (Abort only)
/// └── Record   ← a row failed to decode (Abort only)
/// ```
///
/// Messages never repeat their cause; print the full chain with `{:#}`
/// through anyhow, or walk [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot open cache {}", path.display())]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("cannot read SNS_Timeline")]
    Query(#[from] rusqlite::Error),

    #[error(transparent)]
    Row(#[from] RowError),

    /// Raised only when the export runs with [`MalformedPolicy::Abort`].
    ///
    /// [`MalformedPolicy::Abort`]: crate::config::MalformedPolicy::Abort
    #[error("record local_id={local_id} could not be decoded")]
    Record { local_id: i64, source: TypeError },
}

/// A single `SNS_Timeline` row whose columns could not be read, e.g. a
/// numeric `Buffer` or a NULL `LocalId`.
///
/// Only that row is lost; the rest of the query still yields.
#[derive(Debug, thiserror::Error)]
#[error("SNS_Timeline row {position} is unreadable")]
pub struct RowError {
    /// Zero-based position of the row in the query result.
    pub position: usize,
    /// `LocalId` when it could still be read.
    pub local_id: Option<i64>,
    pub source: rusqlite::Error,
}
