use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::TallyError;

/// Which extraction path to use for every document in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionBackend {
    /// pdftotext (poppler) only.
    Primary,
    /// Pure-Rust text extraction only.
    Fallback,
    /// Primary first, fallback when it errors or finds no tables.
    #[default]
    Auto,
}

impl fmt::Display for ExtractionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionBackend::Primary => write!(f, "primary"),
            ExtractionBackend::Fallback => write!(f, "fallback"),
            ExtractionBackend::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for ExtractionBackend {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" | "pdftotext" => Ok(ExtractionBackend::Primary),
            "fallback" | "native" => Ok(ExtractionBackend::Fallback),
            "auto" => Ok(ExtractionBackend::Auto),
            other => Err(TallyError::InvalidBackend(other.to_string())),
        }
    }
}

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Folder scanned for `*.pdf` statements.
    pub input_dir: PathBuf,
    /// Folder receiving `<name>.xlsx` and `<name>.csv`. Created if absent.
    pub output_dir: PathBuf,
    pub extraction_backend: ExtractionBackend,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            input_dir: PathBuf::from("statement_folder"),
            output_dir: PathBuf::from("processed_output"),
            extraction_backend: ExtractionBackend::Auto,
        }
    }
}

/// Load a config from a TOML file. Missing keys keep their defaults.
pub fn load_config(path: &Path) -> Result<ConvertConfig, TallyError> {
    let content = std::fs::read_to_string(path).map_err(|e| TallyError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a TOML string.
pub fn parse_config(toml_str: &str, source: &Path) -> Result<ConvertConfig, TallyError> {
    toml::from_str(toml_str).map_err(|e| TallyError::Config {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })
}
