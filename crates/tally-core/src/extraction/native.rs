use crate::error::TallyError;
use crate::extraction::{split_pages, table, RawTable, TableExtractor};

/// Pure-Rust extraction backend built on the `pdf-extract` crate.
///
/// Needs no system packages. Column alignment is less faithful than
/// `pdftotext -layout`, so it serves as the fallback path.
pub struct NativeExtractor;

impl NativeExtractor {
    pub fn new() -> Self {
        NativeExtractor
    }
}

impl Default for NativeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for NativeExtractor {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<Vec<RawTable>, TallyError> {
        // pdf-extract panics on some malformed fonts; keep that inside this document.
        let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(pdf_bytes))
            .map_err(|_| TallyError::Extraction("pdf-extract panicked".into()))?
            .map_err(|e| TallyError::Extraction(format!("pdf-extract failed: {e}")))?;
        let pages = split_pages(&clean_text(&text));
        Ok(table::detect_tables(&pages))
    }

    fn backend_name(&self) -> &str {
        "pdf-extract"
    }
}

/// Drop NULs and byte-order marks that pdf-extract leaves in some fonts.
fn clean_text(text: &str) -> String {
    text.replace('\u{0}', "").replace('\u{FEFF}', "")
}
