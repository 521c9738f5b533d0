pub mod export;
pub mod types;

pub use export::{JsonCheckboxValues, JsonField, export_json, export_results, export_text};
pub use types::{ExportFormat, ReportForm};
