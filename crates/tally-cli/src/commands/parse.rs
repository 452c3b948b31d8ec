use std::path::PathBuf;
use tally_core::config::ExtractionBackend;
use tally_core::error::TallyError;
use tally_core::extraction::for_backend;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    backend: &str,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), TallyError> {
    let backend: ExtractionBackend = backend.parse()?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = for_backend(backend);
    let statement = tally_core::convert_pdf(&pdf_bytes, extractor.as_ref())?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&statement)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} transaction(s), written to {}",
                statement.table.len(),
                path.display()
            );
            for w in &statement.warnings {
                eprintln!("  warning: {w}");
            }
            if !statement.skipped_rows.is_empty() {
                eprintln!("  {} row(s) skipped", statement.skipped_rows.len());
            }
        }
        None => match output_format {
            "json" => output::json::print(&statement)?,
            _ => println!("{}", output::table::format_statement(&statement)),
        },
    }

    Ok(())
}
