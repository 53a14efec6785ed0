/// Implementation of `sns export`.
///
/// Opens the cache read-only, decodes every timeline row of the given
/// user, and writes the records as one JSON array, newest first:
///
/// ```text
/// [{"local_id":12,"id":139...,"create_time":1700000000,"content":"...",
///   "author_wxid":"wxid_...","author_name":"...","favorite_count":2,
///   "favorite_users":[{"name":"Alice","wxid":"wxid_alice"}, ...],
///   "comment_count":0,"comment_detail":"0a1b..."}, ...]
/// ```
///
/// Non-ASCII text is written as-is, never `\u` escaped.
use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use sns_store::{ExportConfig, MalformedPolicy, SnsCache, export_user};
use sns_types::MomentRecord;
use tracing::info;

use crate::{ExportArgs, schema};

/// Run the `sns export` command.
///
/// # Errors
///
/// Returns an error if the schema or cache cannot be loaded, the query
/// fails, a row fails to decode under `--strict`, or the output cannot be
/// written.
pub fn run(args: &ExportArgs) -> Result<()> {
    let fields = schema::load(args.schema.as_deref())?;
    let config = ExportConfig {
        user: args.wxid.clone(),
        on_malformed: if args.strict {
            MalformedPolicy::Abort
        } else {
            MalformedPolicy::Skip
        },
        fields,
    };

    let cache = SnsCache::open(&args.sns_cache)?;
    let report = export_user(&cache, &config)
        .with_context(|| format!("export of {} failed", args.wxid))?;

    info!(
        "successfully parsed {} of {} messages",
        report.records.len(),
        report.rows_read
    );

    if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("cannot write {}", path.display()))?;
        write_records(BufWriter::new(file), &report.records, args.pretty)
            .with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        write_records(io::stdout().lock(), &report.records, args.pretty)
            .context("cannot write to stdout")?;
    }

    Ok(())
}

/// Serialize `records` as a JSON array followed by a newline.
fn write_records<W: Write>(mut out: W, records: &[MomentRecord], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut out, records)?;
    } else {
        serde_json::to_writer(&mut out, records)?;
    }
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use sns_types::FavoriteEntry;

    use super::*;

    fn record() -> MomentRecord {
        MomentRecord {
            local_id: 3,
            id: 9,
            create_time: 10,
            content: "早上好".to_string(),
            author_wxid: "wxid_me".to_string(),
            author_name: "Me".to_string(),
            favorite_count: 1,
            favorite_users: vec![FavoriteEntry {
                display_name: "Alice".to_string(),
                user_identifier: "wxid_alice".to_string(),
            }],
            comment_count: 0,
            comment_detail: vec![],
        }
    }

    #[test]
    fn compact_output_keeps_non_ascii() {
        let mut out = Vec::new();
        write_records(&mut out, &[record()], false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"content\":\"早上好\""));
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn empty_export_is_empty_array() {
        let mut out = Vec::new();
        write_records(&mut out, &[], true).unwrap();
        assert_eq!(out, b"[]\n");
    }
}
