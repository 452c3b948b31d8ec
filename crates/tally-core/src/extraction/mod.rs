pub mod fallback;
pub mod native;
pub mod pdftotext;
pub mod table;

use crate::config::ExtractionBackend;
use crate::error::TallyError;
use fallback::FallbackExtractor;
use native::NativeExtractor;
use pdftotext::PdftotextExtractor;

/// Text of a single PDF page, one entry per line.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

/// Rows of cell text detected on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub page_number: usize,
    /// Column titles as printed; empty when the table had no header row.
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Trait for table extraction backends.
pub trait TableExtractor {
    /// Extract every detected table from PDF bytes, in page order.
    fn extract(&self, pdf_bytes: &[u8]) -> Result<Vec<RawTable>, TallyError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Build the extractor for a configured backend.
pub fn for_backend(backend: ExtractionBackend) -> Box<dyn TableExtractor> {
    match backend {
        ExtractionBackend::Primary => Box::new(PdftotextExtractor::new()),
        ExtractionBackend::Fallback => Box::new(NativeExtractor::new()),
        ExtractionBackend::Auto => Box::new(FallbackExtractor::new(
            Box::new(PdftotextExtractor::new()),
            Box::new(NativeExtractor::new()),
        )),
    }
}

/// Split extracted text into pages on form feeds.
///
/// Trailing empty pages (pdftotext ends with a form feed) are dropped, but the
/// first page is always kept.
pub(crate) fn split_pages(text: &str) -> Vec<PageContent> {
    text.split('\x0c')
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            lines: page_text.lines().map(|l| l.to_string()).collect(),
        })
        .filter(|p| !p.lines.is_empty() || p.page_number == 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_on_form_feed() {
        let pages = split_pages("a\nb\x0cc\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines, vec!["a", "b"]);
        assert_eq!(pages[1].page_number, 2);
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(for_backend(ExtractionBackend::Primary).backend_name(), "pdftotext");
        assert_eq!(for_backend(ExtractionBackend::Fallback).backend_name(), "pdf-extract");
        assert_eq!(
            for_backend(ExtractionBackend::Auto).backend_name(),
            "auto (pdftotext, pdf-extract)"
        );
    }
}
