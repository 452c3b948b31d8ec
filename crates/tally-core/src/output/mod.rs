pub mod csv;
pub mod xlsx;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::TallyError;
use crate::model::CleanedTable;

/// Files written for one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub xlsx: PathBuf,
    pub csv: PathBuf,
}

/// Base name for the outputs of `X.pdf`: `X`.
pub fn output_base_name(pdf_path: &Path) -> String {
    pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement".to_string())
}

/// Write `<base_name>.xlsx` and `<base_name>.csv` into `output_dir`.
///
/// Existing files are overwritten.
pub fn write_outputs(
    table: &CleanedTable,
    base_name: &str,
    output_dir: &Path,
) -> Result<OutputPaths, TallyError> {
    let paths = OutputPaths {
        xlsx: output_dir.join(format!("{base_name}.xlsx")),
        csv: output_dir.join(format!("{base_name}.csv")),
    };

    xlsx::write_xlsx(table, &paths.xlsx)?;
    csv::write_csv(table, &paths.csv)?;

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_base_name() {
        assert_eq!(
            output_base_name(Path::new("in/Deposits-statement-1000073282-202508.pdf")),
            "Deposits-statement-1000073282-202508"
        );
        assert_eq!(output_base_name(Path::new("a.b.PDF")), "a.b");
    }

    #[test]
    fn test_write_outputs_names_files_after_source() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_outputs(&CleanedTable::default(), "aug", dir.path()).unwrap();
        assert_eq!(paths.xlsx, dir.path().join("aug.xlsx"));
        assert_eq!(paths.csv, dir.path().join("aug.csv"));
        assert!(paths.xlsx.is_file());
        assert!(paths.csv.is_file());
    }
}
