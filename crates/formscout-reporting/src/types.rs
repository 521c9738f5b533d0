use formscout_core::FormAnalysis;

/// Export format for a form report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Plain Text",
            Self::Json => "JSON",
        }
    }
}

/// One analysed form plus the metadata shown alongside it.
pub struct ReportForm<'a> {
    pub filename: &'a str,
    pub analysis: &'a FormAnalysis,
    /// `None` when the fields came from a saved dump rather than a PDF.
    pub file_size_kb: Option<u64>,
    /// Pre-formatted extraction timestamp.
    pub generated_at: &'a str,
}
