#![warn(clippy::pedantic)]

pub mod cache;
pub mod config;
pub mod error;
pub mod export;

pub use cache::{SnsCache, TimelineRow};
pub use config::{ExportConfig, MalformedPolicy};
pub use error::{ExportError, RowError};
pub use export::{ExportReport, export_user};
