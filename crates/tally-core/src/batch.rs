use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::ConvertConfig;
use crate::convert_pdf;
use crate::error::TallyError;
use crate::extraction::TableExtractor;
use crate::output::{output_base_name, write_outputs, OutputPaths};

/// What happened to one input document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutcome {
    pub source: PathBuf,
    #[serde(flatten)]
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    Converted {
        outputs: OutputPaths,
        records: usize,
        duplicates_removed: usize,
        skipped_rows: usize,
        warnings: Vec<String>,
    },
    Failed {
        error: String,
    },
}

/// Per-document results of a batch run, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub documents: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| matches!(d.status, DocumentStatus::Converted { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.documents.len() - self.converted()
    }
}

/// List the `.pdf` files (any case) directly inside `input_dir`, sorted by path.
pub fn discover_documents(input_dir: &Path) -> Result<Vec<PathBuf>, TallyError> {
    if !input_dir.is_dir() {
        return Err(TallyError::InputDirMissing(input_dir.to_path_buf()));
    }

    let mut documents = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

/// Convert one document and write its output pair into `output_dir`.
pub fn convert_document(
    path: &Path,
    extractor: &dyn TableExtractor,
    output_dir: &Path,
) -> Result<DocumentStatus, TallyError> {
    let pdf_bytes = std::fs::read(path)?;
    let statement = convert_pdf(&pdf_bytes, extractor)?;
    let outputs = write_outputs(&statement.table, &output_base_name(path), output_dir)?;

    Ok(DocumentStatus::Converted {
        outputs,
        records: statement.table.len(),
        duplicates_removed: statement.duplicates_removed,
        skipped_rows: statement.skipped_rows.len(),
        warnings: statement.warnings,
    })
}

/// Convert every statement in the configured input directory.
///
/// Documents are handled one at a time. A failing document is logged and
/// recorded in the report; the run continues with the next one. Only a
/// missing input directory or an uncreatable output directory fails the run.
pub fn run_batch(
    config: &ConvertConfig,
    extractor: &dyn TableExtractor,
) -> Result<BatchReport, TallyError> {
    let documents = discover_documents(&config.input_dir)?;
    std::fs::create_dir_all(&config.output_dir)?;

    if documents.is_empty() {
        tracing::warn!(dir = %config.input_dir.display(), "no PDF files found");
    } else {
        tracing::info!(
            count = documents.len(),
            backend = extractor.backend_name(),
            "converting statements"
        );
    }

    let mut report = BatchReport::default();
    for path in documents {
        let status = match convert_document(&path, extractor, &config.output_dir) {
            Ok(status) => {
                if let DocumentStatus::Converted { records, .. } = &status {
                    tracing::info!(file = %path.display(), records, "converted");
                }
                status
            }
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "conversion failed");
                DocumentStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        report.documents.push(DocumentOutcome {
            source: path,
            status,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_sorted_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.PDF", "a.pdf", "notes.txt", "c.pdf.bak"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("d.pdf")).unwrap();

        let found = discover_documents(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.PDF"]);
    }

    #[test]
    fn test_missing_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_documents(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, TallyError::InputDirMissing(_)));
    }

    #[test]
    fn test_report_counts() {
        let report = BatchReport {
            documents: vec![
                DocumentOutcome {
                    source: "a.pdf".into(),
                    status: DocumentStatus::Failed {
                        error: "boom".into(),
                    },
                },
                DocumentOutcome {
                    source: "b.pdf".into(),
                    status: DocumentStatus::Converted {
                        outputs: OutputPaths {
                            xlsx: "b.xlsx".into(),
                            csv: "b.csv".into(),
                        },
                        records: 3,
                        duplicates_removed: 0,
                        skipped_rows: 1,
                        warnings: vec![],
                    },
                },
            ],
        };
        assert_eq!(report.converted(), 1);
        assert_eq!(report.failed(), 1);
    }
}
