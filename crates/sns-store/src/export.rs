use std::error::Error;

use sns_types::MomentRecord;
use tracing::{debug, info, warn};

use crate::cache::SnsCache;
use crate::config::{ExportConfig, MalformedPolicy};
use crate::error::ExportError;

/// Outcome of [`export_user`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Decoded records, newest `create_time` first.
    pub records: Vec<MomentRecord>,
    /// Rows returned by the query.
    pub rows_read: usize,
    /// Rows dropped under [`MalformedPolicy::Skip`].
    pub skipped: usize,
}

/// Export every timeline row of `config.user`.
///
/// Pipeline:
///
///   1. Query `SNS_Timeline` for rows whose `FromUser` matches.
///   2. Decode each row's buffer into a [`MomentRecord`] (timeline
///      message, then its favorite list).
///   3. Sort by `create_time`, newest first. The sort is stable, so rows
///      with equal timestamps keep their table order.
///
/// A row whose columns cannot be read, or that fails step 2, is handled
/// per `config.on_malformed`.
///
/// # Errors
///
/// - [`ExportError::Query`] if the rows cannot be read.
/// - [`ExportError::Row`] or [`ExportError::Record`] for the first bad
///   row when the policy is [`MalformedPolicy::Abort`].
pub fn export_user(cache: &SnsCache, config: &ExportConfig) -> Result<ExportReport, ExportError> {
    info!(user = %config.user, "exporting timeline");

    let rows = cache.timeline_rows(&config.user)?;
    info!(count = rows.len(), "timeline rows found");

    let mut report = ExportReport {
        rows_read: rows.len(),
        ..ExportReport::default()
    };

    for row in rows {
        let row = match row {
            Ok(row) => row,
            Err(err) => match config.on_malformed {
                MalformedPolicy::Abort => return Err(err.into()),
                MalformedPolicy::Skip => {
                    warn!(
                        position = err.position,
                        local_id = ?err.local_id,
                        error = %err.source,
                        "skipping unreadable row"
                    );
                    report.skipped += 1;
                    continue;
                }
            },
        };

        match MomentRecord::decode(row.local_id, &row.buffer, &config.fields) {
            Ok(record) => {
                debug!(
                    local_id = row.local_id,
                    from_user = %row.from_user,
                    favorites = record.favorite_users.len(),
                    "decoded record"
                );
                report.records.push(record);
            }
            Err(source) => match config.on_malformed {
                MalformedPolicy::Abort => {
                    return Err(ExportError::Record {
                        local_id: row.local_id,
                        source,
                    });
                }
                MalformedPolicy::Skip => {
                    warn!(
                        local_id = row.local_id,
                        error = %source,
                        cause = %cause(&source),
                        "skipping undecodable record"
                    );
                    report.skipped += 1;
                }
            },
        }
    }

    report
        .records
        .sort_by(|a, b| b.create_time.cmp(&a.create_time));

    info!(
        parsed = report.records.len(),
        skipped = report.skipped,
        "export finished"
    );
    Ok(report)
}

/// Innermost cause of `err`, for log lines that show only one message.
fn cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current
}
