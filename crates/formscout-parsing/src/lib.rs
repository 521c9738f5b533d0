use std::path::Path;

use thiserror::Error;

pub mod config;
pub mod dump;
pub mod extractor;
pub mod field_name;
pub mod inference;
pub mod patterns;
pub mod scoring;
pub mod summary;
pub mod text;

pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use dump::parse_field_dump;
pub use extractor::FormExtractor;
pub use field_name::{parse_field_name, split_words};
pub use inference::{LabelCandidate, LabelEngine, LabelRule, RULE_CHAIN};
pub use patterns::LabelPattern;
pub use scoring::{best_text_match, score_similarity};
pub use summary::{categorize, structural_part, summarize};
pub use text::{classify_text, is_likely_label};
// Re-export domain types from core (canonical definitions live there)
pub use formscout_core::{
    BackendError, EnrichedField, ExtractedText, FieldDumpBackend, FieldRecord, FormAnalysis,
    TextBackend,
};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("invalid pattern in configuration: {0}")]
    Config(#[from] regex::Error),
}

/// Extract and label the form fields of a PDF using the given collaborators.
///
/// Pipeline:
/// 1. Dump field records via `dump_backend` (failure is fatal)
/// 2. Extract page text via `text_backend` (failure falls back to no text)
/// 3. Classify text lines as likely captions
/// 4. Decompose each field name and score it against the captions
/// 5. Fall back to the label dictionary and naming conventions
pub fn extract_form_fields(
    pdf_path: &Path,
    dump_backend: &dyn FieldDumpBackend,
    text_backend: &dyn TextBackend,
) -> Result<FormAnalysis, ParsingError> {
    FormExtractor::new().extract_via_backends(pdf_path, dump_backend, text_backend)
}
