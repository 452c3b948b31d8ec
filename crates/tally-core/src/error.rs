use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("no tables found (primary: {primary}; fallback: {fallback})")]
    ExtractionFailed { primary: String, fallback: String },

    #[error("no transaction tables found by the {backend} backend")]
    NoTables { backend: String },

    #[error("no transactions left after cleaning")]
    NoTransactions,

    #[error("failed to load config from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("unknown extraction backend '{0}'. Expected one of: auto, primary, fallback")]
    InvalidBackend(String),

    #[error("input directory '{0}' does not exist")]
    InputDirMissing(PathBuf),

    #[error("invalid category file: {0}")]
    CategoriesInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
