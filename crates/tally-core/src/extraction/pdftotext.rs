use crate::error::TallyError;
use crate::extraction::{split_pages, table, RawTable, TableExtractor};
use std::io::Write;
use std::process::Command;

/// Table extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` so statement columns stay aligned by spaces.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    fn layout_text(&self, pdf_bytes: &[u8]) -> Result<String, TallyError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| TallyError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| TallyError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TallyError::PdftotextNotFound
                } else {
                    TallyError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(TallyError::PdftotextFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for PdftotextExtractor {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<Vec<RawTable>, TallyError> {
        let text = self.layout_text(pdf_bytes)?;
        let pages = split_pages(&text);
        Ok(table::detect_tables(&pages))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}
