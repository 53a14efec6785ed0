use sns_types::TimelineFields;

/// Configuration for one export run.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────┐
/// │ Field        │ Purpose                                          │
/// ├──────────────┼──────────────────────────────────────────────────┤
/// │ user         │ SNS_Timeline.FromUser value to export            │
/// │ on_malformed │ What to do with a row that fails to decode       │
/// │ fields       │ Field numbering of the SnsTimeline message       │
/// └──────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportConfig {
    pub user: String,
    pub on_malformed: MalformedPolicy,
    pub fields: TimelineFields,
}

impl ExportConfig {
    /// Default settings for `user`: skip malformed rows, default field
    /// numbering.
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            on_malformed: MalformedPolicy::default(),
            fields: TimelineFields::default(),
        }
    }
}

/// Handling of a row whose message or favorite list cannot be decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Log a warning, count the row as skipped, and keep going.
    #[default]
    Skip,
    /// Stop the export with the row's error.
    Abort,
}
