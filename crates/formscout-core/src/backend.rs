use std::path::Path;

use thiserror::Error;

use crate::ExtractedText;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{tool} is not installed. Please install {tool} to use this tool.")]
    ToolUnavailable { tool: String },
    #[error("failed to extract fields: {0}")]
    ExtractionFailed(String),
    #[error("failed to extract text: {0}")]
    TextExtractionFailed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of the raw line-oriented field dump (`FieldName:` / `---` records).
///
/// The parsing pipeline in `formscout_parsing::FormExtractor` only sees the
/// returned text; how it is produced (pdftk, a saved file, a test fixture)
/// is up to the implementor.
pub trait FieldDumpBackend: Send + Sync {
    /// Produce the field dump for the document at `path`.
    fn dump_fields(&self, path: &Path) -> Result<String, BackendError>;
}

/// Source of the document's page text.
pub trait TextBackend: Send + Sync {
    /// Extract the full text of the document together with its page count.
    fn extract_text(&self, path: &Path) -> Result<ExtractedText, BackendError>;
}

/// [`FieldDumpBackend`] that reads a previously saved dump from disk,
/// ignoring the document path it is given.
pub struct DumpFileBackend {
    dump_path: std::path::PathBuf,
}

impl DumpFileBackend {
    pub fn new(dump_path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            dump_path: dump_path.into(),
        }
    }
}

impl FieldDumpBackend for DumpFileBackend {
    fn dump_fields(&self, _path: &Path) -> Result<String, BackendError> {
        std::fs::read_to_string(&self.dump_path).map_err(|e| {
            BackendError::ExtractionFailed(format!("{}: {}", self.dump_path.display(), e))
        })
    }
}

/// [`TextBackend`] that reads plain text from disk. Page count is taken
/// from form-feed separators, with a minimum of one page for non-empty text.
pub struct TextFileBackend {
    text_path: std::path::PathBuf,
}

impl TextFileBackend {
    pub fn new(text_path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            text_path: text_path.into(),
        }
    }
}

impl TextBackend for TextFileBackend {
    fn extract_text(&self, _path: &Path) -> Result<ExtractedText, BackendError> {
        let full_text = std::fs::read_to_string(&self.text_path).map_err(|e| {
            BackendError::TextExtractionFailed(format!("{}: {}", self.text_path.display(), e))
        })?;
        let page_count = if full_text.trim().is_empty() {
            0
        } else {
            full_text.matches('\u{000C}').count() + 1
        };
        Ok(ExtractedText {
            full_text,
            page_count,
        })
    }
}
