use std::path::PathBuf;
use tally_core::batch::run_batch;
use tally_core::config::{load_config, ConvertConfig};
use tally_core::error::TallyError;
use tally_core::extraction::for_backend;

use crate::output;

/// Run the batch conversion. Individual document failures are reported, not
/// returned; only setup errors end the command with a failure.
pub fn run(
    config_file: Option<PathBuf>,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    backend: Option<String>,
    output_format: &str,
) -> Result<(), TallyError> {
    let mut config = match config_file {
        Some(path) => load_config(&path)?,
        None => ConvertConfig::default(),
    };
    if let Some(dir) = input_dir {
        config.input_dir = dir;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if let Some(name) = backend {
        config.extraction_backend = name.parse()?;
    }

    let extractor = for_backend(config.extraction_backend);
    let report = run_batch(&config, extractor.as_ref())?;

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_batch(&report, &config.output_dir),
    }

    Ok(())
}
