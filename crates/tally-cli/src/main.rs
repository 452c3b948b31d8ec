mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Convert bank statement PDFs into XLSX and CSV transaction tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every PDF in the input folder into <name>.xlsx and <name>.csv
    Convert {
        /// TOML config file (input_dir, output_dir, extraction_backend)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Folder with statement PDFs (default: statement_folder)
        #[arg(long, value_name = "DIR")]
        input_dir: Option<PathBuf>,

        /// Folder for the converted files (default: processed_output)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Extraction backend: auto (default), primary or fallback
        #[arg(short, long, value_name = "NAME")]
        backend: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Extract and clean one statement without writing spreadsheets
    Parse {
        /// Path to statement PDF
        input_file: PathBuf,

        /// Extraction backend: auto (default), primary or fallback
        #[arg(short, long, default_value = "auto")]
        backend: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the cleaned statement to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Monthly, category and merchant summaries over converted CSV files
    Summarize {
        /// Folder with converted CSV files (<account>_YYYYMM.csv)
        dir: PathBuf,

        /// Custom JSON category file (default: built-in categories)
        #[arg(long, value_name = "FILE")]
        categories: Option<PathBuf>,

        /// Merchants listed per ranking
        #[arg(long, default_value_t = tally_core::analysis::DEFAULT_TOP_MERCHANTS)]
        top: usize,

        /// Also write a multi-sheet workbook (e.g. analysis_report.xlsx)
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List extraction backends and whether they can run here
    Backends,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            config,
            input_dir,
            output_dir,
            backend,
            output,
        } => commands::convert::run(config, input_dir, output_dir, backend, &output),
        Commands::Parse {
            input_file,
            backend,
            output,
            out,
        } => commands::parse::run(input_file, &backend, &output, out),
        Commands::Summarize {
            dir,
            categories,
            top,
            report,
            output,
        } => commands::summarize::run(&dir, categories, top, report, &output),
        Commands::Backends => commands::backends::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
