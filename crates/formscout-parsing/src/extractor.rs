use std::path::Path;

use formscout_core::{
    BackendError, EnrichedField, ExtractedText, FieldDumpBackend, FieldNameParts, FieldRecord,
    FormAnalysis, FormSummary, TextBackend, TextElement,
};

use crate::config::ParsingConfig;
use crate::inference::LabelEngine;
use crate::{ParsingError, dump, field_name, summary, text};

/// A configurable form-field labelling pipeline.
///
/// Holds a [`ParsingConfig`] and exposes each pipeline step as a method.
/// The default constructor uses built-in defaults; use
/// [`FormExtractor::with_config`] to supply a custom threshold, vocabulary
/// or label dictionary.
pub struct FormExtractor {
    config: ParsingConfig,
}

impl Default for FormExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FormExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParsingConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    /// Parse the raw field dump into records (step 1).
    pub fn parse_dump(&self, dump_text: &str) -> Vec<FieldRecord> {
        dump::parse_field_dump(dump_text)
    }

    /// Split page text into classified lines (step 2).
    pub fn classify_text(&self, full_text: &str) -> Vec<TextElement> {
        text::classify_text_with_config(full_text, &self.config)
    }

    /// Decompose a single field name (step 3).
    pub fn decompose(&self, name: &str) -> FieldNameParts {
        field_name::parse_field_name(name)
    }

    /// Infer a label for every record against the classified text (steps 4–5).
    pub fn enrich(&self, records: &[FieldRecord], elements: &[TextElement]) -> Vec<EnrichedField> {
        LabelEngine::new(&self.config).infer_all(records, elements)
    }

    /// Aggregate counts for the parsed records.
    pub fn summarize(&self, records: &[FieldRecord]) -> FormSummary {
        summary::summarize(records)
    }

    /// Run the pipeline on an already-obtained dump and (optionally) text.
    ///
    /// With no text every field goes through the name-only fallbacks.
    pub fn analyze(&self, dump_text: &str, extracted: Option<&ExtractedText>) -> FormAnalysis {
        let records = self.parse_dump(dump_text);
        let elements = extracted
            .map(|t| self.classify_text(&t.full_text))
            .unwrap_or_default();

        tracing::debug!(
            fields = records.len(),
            lines = elements.len(),
            likely_labels = elements.iter().filter(|e| e.is_likely_label).count(),
            "running label inference"
        );

        FormAnalysis {
            summary: self.summarize(&records),
            fields: self.enrich(&records, &elements),
            page_count: extracted.map(|t| t.page_count).unwrap_or(0),
            text_available: extracted.is_some(),
        }
    }

    /// Run the full pipeline on a document using the given collaborators.
    ///
    /// A dump failure is fatal. A text failure is logged and replaced by an
    /// empty corpus, so the result still carries every field, unlabelled
    /// unless a name-only rule applies.
    pub fn extract_via_backends(
        &self,
        path: &Path,
        dump_backend: &dyn FieldDumpBackend,
        text_backend: &dyn TextBackend,
    ) -> Result<FormAnalysis, ParsingError> {
        let dump_text = dump_backend.dump_fields(path)?;
        let text_result = text_backend.extract_text(path);
        Ok(self.analyze_with_text_result(&dump_text, text_result))
    }

    /// Finish the pipeline once both collaborators have reported.
    pub fn analyze_with_text_result(
        &self,
        dump_text: &str,
        text_result: Result<ExtractedText, BackendError>,
    ) -> FormAnalysis {
        match text_result {
            Ok(extracted) => self.analyze(dump_text, Some(&extracted)),
            Err(e) => {
                tracing::warn!(error = %e, "text extraction failed, continuing without page text");
                self.analyze(dump_text, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingConfigBuilder;

    const DUMP: &str = "---\nFieldType: Text\nFieldName: Pt1Line1a_FamilyName[0]\n---\nFieldType: Button\nFieldName: CB_AppType[0]\nFieldStateOption: Off\nFieldStateOption: Y\n---\n";

    #[test]
    fn test_analyze_with_text() {
        let extracted = ExtractedText {
            full_text: "Family Name:\nSomething else".into(),
            page_count: 2,
        };
        let analysis = FormExtractor::new().analyze(DUMP, Some(&extracted));
        assert_eq!(analysis.fields.len(), 2);
        assert_eq!(analysis.page_count, 2);
        assert!(analysis.text_available);
        assert_eq!(analysis.fields[0].label.as_deref(), Some("Family Name:"));
        assert_eq!(analysis.summary.total_fields, 2);
    }

    #[test]
    fn test_analyze_without_text() {
        let analysis = FormExtractor::new().analyze(DUMP, None);
        assert!(!analysis.text_available);
        assert_eq!(analysis.page_count, 0);
        // Name-only rules still apply
        assert_eq!(analysis.fields[0].label.as_deref(), Some("Line 1a"));
        assert_eq!(analysis.fields[1].label.as_deref(), Some("AppType Selection"));
    }

    #[test]
    fn test_text_failure_is_recovered() {
        let analysis = FormExtractor::new().analyze_with_text_result(
            DUMP,
            Err(BackendError::TextExtractionFailed("corrupt".into())),
        );
        assert_eq!(analysis.fields.len(), 2);
        assert!(!analysis.text_available);
    }

    #[test]
    fn test_custom_threshold_changes_outcome() {
        let extracted = ExtractedText {
            full_text: "Family Name:".into(),
            page_count: 1,
        };
        let config = ParsingConfigBuilder::new()
            .label_threshold(0.9)
            .build()
            .unwrap();
        let analysis = FormExtractor::with_config(config).analyze(DUMP, Some(&extracted));
        // 2/3 of the words match, below 0.9
        assert_eq!(analysis.fields[0].label.as_deref(), Some("Line 1a"));
    }

    #[test]
    fn test_decompose_step() {
        let parts = FormExtractor::new().decompose("Pt1Line1a_FamilyName[0]");
        assert_eq!(parts.line.as_deref(), Some("1a"));
    }
}
