use std::path::Path;

use mupdf::{Document, TextPageFlags};

use formscout_core::{BackendError, ExtractedText, TextBackend};

/// MuPDF-based implementation of [`TextBackend`].
///
/// Isolates the AGPL-3.0 mupdf dependency so the rest of the workspace
/// never links it directly.
///
/// Form captions often sit close to the page edge, so no header or footer
/// band is excluded unless configured.
#[derive(Default)]
pub struct MupdfBackend {
    /// Fraction of page height from bottom to exclude as footer (0.0–1.0).
    footer_exclusion_ratio: Option<f32>,
    /// Fraction of page height from top to exclude as header (0.0–1.0).
    header_exclusion_ratio: Option<f32>,
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer exclusion ratio. Pass `0.0` to disable.
    pub fn with_footer_exclusion(mut self, ratio: f32) -> Self {
        self.footer_exclusion_ratio = (ratio > 0.0).then_some(ratio.min(1.0));
        self
    }

    /// Set the header exclusion ratio. Pass `0.0` to disable.
    pub fn with_header_exclusion(mut self, ratio: f32) -> Self {
        self.header_exclusion_ratio = (ratio > 0.0).then_some(ratio.min(1.0));
        self
    }
}

fn text_error(e: impl std::fmt::Display) -> BackendError {
    BackendError::TextExtractionFailed(e.to_string())
}

impl TextBackend for MupdfBackend {
    fn extract_text(&self, path: &Path) -> Result<ExtractedText, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| text_error("invalid path encoding"))?;

        let document = Document::open(path_str).map_err(text_error)?;

        let mut pages_text = Vec::new();

        for page_result in document.pages().map_err(text_error)? {
            let page = page_result.map_err(text_error)?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(text_error)?;

            let page_bounds = page.bounds().map_err(text_error)?;
            let page_height = page_bounds.y1 - page_bounds.y0;

            let header_threshold = self
                .header_exclusion_ratio
                .map(|r| page_bounds.y0 + page_height * r);
            let footer_threshold = self
                .footer_exclusion_ratio
                .map(|r| page_bounds.y1 - page_height * r);

            let mut page_text = String::new();
            for block in text_page.blocks() {
                let block_bounds = block.bounds();

                if header_threshold.is_some_and(|t| block_bounds.y1 <= t) {
                    continue;
                }
                if footer_threshold.is_some_and(|t| block_bounds.y0 >= t) {
                    continue;
                }

                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);
        }

        tracing::debug!(path = %path.display(), pages = pages_text.len(), "extracted page text");

        Ok(ExtractedText {
            page_count: pages_text.len(),
            full_text: pages_text.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_exclusion_by_default() {
        let backend = MupdfBackend::new();
        assert_eq!(backend.footer_exclusion_ratio, None);
        assert_eq!(backend.header_exclusion_ratio, None);
    }

    #[test]
    fn test_exclusion_ratios() {
        let backend = MupdfBackend::new()
            .with_footer_exclusion(0.05)
            .with_header_exclusion(0.0);
        assert_eq!(backend.footer_exclusion_ratio, Some(0.05));
        assert_eq!(backend.header_exclusion_ratio, None);
    }

    #[test]
    fn test_missing_file_is_text_failure() {
        let err = MupdfBackend::new()
            .extract_text(Path::new("/nonexistent/form.pdf"))
            .unwrap_err();
        assert!(matches!(err, BackendError::TextExtractionFailed(_)));
    }
}
