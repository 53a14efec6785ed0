use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sns_types::TimelineFields;
use tracing::debug;

/// Field numbering from `--schema`, or the built-in defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid override.
pub fn load(path: Option<&Path>) -> Result<TimelineFields> {
    let Some(path) = path else {
        return Ok(TimelineFields::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let fields = TimelineFields::from_json(&text)
        .with_context(|| format!("invalid schema {}", path.display()))?;
    debug!(?fields, "loaded field numbering");
    Ok(fields)
}
