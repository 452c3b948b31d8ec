pub mod analysis;
pub mod batch;
pub mod categories;
pub mod config;
pub mod dedup;
pub mod error;
pub mod extraction;
pub mod model;
pub mod output;
pub mod parsing;

use dedup::dedup_records;
use error::TallyError;
use extraction::TableExtractor;
use model::{CleanedTable, ConvertedStatement};

/// Main API entry point: turn one statement PDF into a cleaned transaction table.
///
/// Runs extraction, row normalization and deduplication. Nothing is written to
/// disk; see [`output::write_outputs`] and [`batch::run_batch`] for that.
pub fn convert_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn TableExtractor,
) -> Result<ConvertedStatement, TallyError> {
    let tables = extractor.extract(pdf_bytes)?;
    if tables.is_empty() {
        return Err(TallyError::NoTables {
            backend: extractor.backend_name().to_string(),
        });
    }
    tracing::debug!(backend = extractor.backend_name(), tables = tables.len(), "tables extracted");

    let mut rows = parsing::normalize_tables(&tables);
    let duplicates_removed = dedup_records(&mut rows.records);
    if duplicates_removed > 0 {
        tracing::info!(duplicates_removed, "removed duplicate rows");
    }

    if rows.records.is_empty() {
        return Err(TallyError::NoTransactions);
    }

    Ok(ConvertedStatement {
        backend: extractor.backend_name().to_string(),
        tables: tables.len(),
        table: CleanedTable {
            records: rows.records,
        },
        duplicates_removed,
        skipped_rows: rows.skipped_rows,
        warnings: rows.warnings,
    })
}
