/// Implementation of `sns inspect`.
///
/// Prints the raw field list of every matching `SNS_Timeline` row, with
/// the timeline field each number maps to under the active schema:
///
/// ```text
/// Row local_id=12 id=13911... (214 bytes)
///   #1   varint   13911...                   id
///   #4   varint   1700000000                 create_time
///   #5   bytes    13 bytes "hello moments"   content
///   #9   bytes    76 bytes                   favorite_detail → 2 entries
/// ```
///
/// `favorite_detail` is run through the favorite decoder so a bad
/// numbering or a corrupt list shows up immediately.
use anyhow::Result;
use sns_store::{SnsCache, TimelineRow};
use sns_types::schema::TimelineSlot;
use sns_types::{TimelineFields, decode_favorite_list};
use sns_wire::fields::{Field, FieldValue, Message};

use crate::{InspectArgs, schema};

/// Longest text preview printed inline.
const PREVIEW_CHARS: usize = 40;

/// Run the `sns inspect` command.
///
/// # Errors
///
/// Returns an error if the schema or cache cannot be loaded or the query
/// fails. Unreadable or undecodable rows are reported inline, not as
/// errors.
pub fn run(args: &InspectArgs) -> Result<()> {
    let fields = schema::load(args.schema.as_deref())?;
    let cache = SnsCache::open(&args.sns_cache)?;
    let rows = cache.timeline_rows(&args.wxid)?;

    let mut shown = 0usize;
    for row in &rows {
        let local_id = match row {
            Ok(row) => Some(row.local_id),
            Err(e) => e.local_id,
        };
        if args.local_id.is_some_and(|id| local_id != Some(id)) {
            continue;
        }
        match row {
            Ok(row) => print!("{}", render_row(row, &fields, args.show_hex)),
            Err(e) => println!("{e}: {}", e.source),
        }
        shown += 1;
    }
    println!("---");
    println!("{shown} row{}", if shown == 1 { "" } else { "s" });
    Ok(())
}

fn render_row(row: &TimelineRow, schema: &TimelineFields, show_hex: bool) -> String {
    let mut out = format!(
        "Row local_id={} id={} ({} bytes)\n",
        row.local_id,
        row.id.as_deref().unwrap_or("-"),
        row.buffer.len()
    );

    let fields = match Message::decode(&row.buffer) {
        Ok(fields) => fields,
        Err(e) => {
            out.push_str(&format!("  undecodable: {e}\n"));
            return out;
        }
    };

    for field in &fields {
        let slot = schema.slot(field.number);
        out.push_str(&format!(
            "  #{:<3} {:<8} {:<40} {}\n",
            field.number,
            wire_label(field),
            value_summary(field),
            slot_note(slot, field)
        ));
        if show_hex && let FieldValue::Bytes(bytes) = field.value {
            for chunk in bytes.chunks(16) {
                out.push_str(&format!("        {}\n", hex::encode(chunk)));
            }
        }
    }
    out
}

fn wire_label(field: &Field<'_>) -> &'static str {
    match field.value {
        FieldValue::Varint(_) => "varint",
        FieldValue::Fixed64(_) => "fixed64",
        FieldValue::Bytes(_) => "bytes",
        FieldValue::Fixed32(_) => "fixed32",
    }
}

fn value_summary(field: &Field<'_>) -> String {
    match field.value {
        FieldValue::Varint(v) | FieldValue::Fixed64(v) => v.to_string(),
        FieldValue::Fixed32(v) => v.to_string(),
        FieldValue::Bytes(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) if !text.chars().any(char::is_control) => {
                let preview: String = text.chars().take(PREVIEW_CHARS).collect();
                let ellipsis = if preview.len() < text.len() { "…" } else { "" };
                format!("{} bytes {preview:?}{ellipsis}", bytes.len())
            }
            _ => format!("{} bytes", bytes.len()),
        },
    }
}

fn slot_note(slot: Option<TimelineSlot>, field: &Field<'_>) -> String {
    match (slot, field.value) {
        (None, _) => String::new(),
        (Some(TimelineSlot::FavoriteDetail), FieldValue::Bytes(bytes)) => {
            match decode_favorite_list(bytes) {
                Ok(entries) => format!("favorite_detail → {} entries", entries.len()),
                Err(e) => format!("favorite_detail → {e}"),
            }
        }
        (Some(slot), _) => slot.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use sns_wire::fields::{encode_bytes_field, encode_varint_field};

    use super::*;

    fn row(buffer: Vec<u8>) -> TimelineRow {
        TimelineRow {
            buffer,
            local_id: 4,
            id: None,
            from_user: "wxid_me".to_string(),
        }
    }

    #[test]
    fn labels_known_fields() {
        let mut buf = Vec::new();
        encode_varint_field(&mut buf, 4, 1_700_000_000);
        encode_bytes_field(&mut buf, 5, b"hi");
        encode_bytes_field(&mut buf, 9, &[]);
        encode_varint_field(&mut buf, 50, 1);

        let text = render_row(&row(buf), &TimelineFields::default(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Row local_id=4 id=- (15 bytes)");
        assert!(lines[1].starts_with("  #4   varint   1700000000"));
        assert!(lines[1].ends_with("create_time"));
        assert!(lines[2].contains("2 bytes \"hi\""));
        assert!(lines[2].ends_with("content"));
        assert!(lines[3].ends_with("favorite_detail → 0 entries"));
        assert_eq!(lines[4].trim_end(), "  #50  varint   1");
    }

    #[test]
    fn reports_undecodable_buffer() {
        let text = render_row(&row(vec![0x0A, 0x09]), &TimelineFields::default(), false);
        assert!(text.contains("undecodable: truncated read"));
    }

    #[test]
    fn hex_dump_when_requested() {
        let mut buf = Vec::new();
        encode_bytes_field(&mut buf, 12, &[0xDE, 0xAD]);
        let text = render_row(&row(buf), &TimelineFields::default(), true);
        assert!(text.contains("        dead\n"));
    }
}
