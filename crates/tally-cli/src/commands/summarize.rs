use std::path::{Path, PathBuf};
use tally_core::analysis::{analyze, load_statements};
use tally_core::categories::builtin::default_categories;
use tally_core::categories::load_categories;
use tally_core::error::TallyError;
use tally_core::output::xlsx::write_analysis_report;

use crate::output;

pub fn run(
    dir: &Path,
    categories_file: Option<PathBuf>,
    top: usize,
    report_path: Option<PathBuf>,
    output_format: &str,
) -> Result<(), TallyError> {
    let categories = match categories_file {
        Some(path) => load_categories(&path)?,
        None => default_categories()?,
    };

    let statements = load_statements(dir)?;
    if statements.is_empty() {
        eprintln!("No CSV files found in {}", dir.display());
        return Ok(());
    }

    let report = analyze(&statements, &categories, top);

    if let Some(path) = &report_path {
        write_analysis_report(&report, &statements, &categories, path)?;
        eprintln!("Analysis report written to {}", path.display());
    }

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_analysis(&report),
    }
    Ok(())
}
