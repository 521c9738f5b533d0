use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use formscout_core::{BackendError, DumpFileBackend, FieldDumpBackend, TextBackend, TextFileBackend};
use formscout_parsing::{FormExtractor, ParsingError};
use formscout_pdftk::PdftkBackend;

// Re-export domain types for convenience
pub use formscout_core::{EnrichedField, FormAnalysis, FormSummary};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<BackendError> for IngestError {
    fn from(e: BackendError) -> Self {
        Self::Parsing(ParsingError::Backend(e))
    }
}

/// How to reach the two collaborators for a PDF.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// pdftk executable; `None` means `pdftk` on `PATH`.
    pub pdftk_command: Option<PathBuf>,
    pub footer_exclusion: f32,
    pub header_exclusion: f32,
}

/// Result of analysing one PDF.
#[derive(Debug, Clone)]
pub struct IngestedForm {
    pub analysis: FormAnalysis,
    pub file_size_kb: u64,
}

/// Dump, extract and label the form fields of a PDF.
///
/// The pdftk dump and the page-text extraction only read the file, so they
/// run side by side on blocking threads. A dump failure is returned; a text
/// failure degrades to name-only labelling.
pub async fn analyze_pdf(
    path: &Path,
    extractor: Arc<FormExtractor>,
    options: &IngestOptions,
) -> Result<IngestedForm, IngestError> {
    let dump_backend = match &options.pdftk_command {
        Some(cmd) => PdftkBackend::with_command(cmd),
        None => PdftkBackend::new(),
    };
    let text_backend = text_backend(options);

    let dump_path = path.to_path_buf();
    let text_path = path.to_path_buf();
    let (dump_result, text_result) = tokio::join!(
        tokio::task::spawn_blocking(move || dump_backend.dump_fields(&dump_path)),
        tokio::task::spawn_blocking(move || text_backend.extract_text(&text_path)),
    );

    let dump_text = dump_result??;
    let text_result = text_result
        .map_err(|e| BackendError::TextExtractionFailed(e.to_string()))
        .and_then(|r| r);

    let file_size_kb = formscout_pdftk::file_size_kb(path)?;
    let analysis = extractor.analyze_with_text_result(&dump_text, text_result);

    tracing::info!(
        path = %path.display(),
        fields = analysis.fields.len(),
        pages = analysis.page_count,
        "analysed form"
    );

    Ok(IngestedForm {
        analysis,
        file_size_kb,
    })
}

/// Run the pipeline on a saved field dump and, optionally, saved page text.
///
/// No external tool is involved.
pub fn analyze_saved_dump(
    dump_path: &Path,
    text_path: Option<&Path>,
    extractor: &FormExtractor,
) -> Result<FormAnalysis, IngestError> {
    let dump_backend = DumpFileBackend::new(dump_path);
    match text_path {
        Some(text_path) => {
            let text_backend = TextFileBackend::new(text_path);
            Ok(extractor.extract_via_backends(dump_path, &dump_backend, &text_backend)?)
        }
        None => {
            let dump_text = dump_backend.dump_fields(dump_path)?;
            Ok(extractor.analyze(&dump_text, None))
        }
    }
}

#[cfg(feature = "pdf")]
fn text_backend(options: &IngestOptions) -> Box<dyn TextBackend> {
    Box::new(
        formscout_pdf_mupdf::MupdfBackend::new()
            .with_footer_exclusion(options.footer_exclusion)
            .with_header_exclusion(options.header_exclusion),
    )
}

#[cfg(not(feature = "pdf"))]
fn text_backend(_options: &IngestOptions) -> Box<dyn TextBackend> {
    Box::new(NoTextSupport)
}

#[cfg(not(feature = "pdf"))]
struct NoTextSupport;

#[cfg(not(feature = "pdf"))]
impl TextBackend for NoTextSupport {
    fn extract_text(&self, _path: &Path) -> Result<formscout_core::ExtractedText, BackendError> {
        Err(BackendError::TextExtractionFailed(
            "PDF text support not compiled in (enable the `pdf` feature of formscout-ingest)"
                .into(),
        ))
    }
}
