use tally_core::error::TallyError;
use tally_core::extraction::pdftotext::PdftotextExtractor;

pub fn run() -> Result<(), TallyError> {
    let pdftotext = if PdftotextExtractor::is_available() {
        "available"
    } else {
        "not found (install poppler-utils)"
    };

    println!("Extraction backends:\n");
    println!("  {:<10} {:<12} {}", "primary", "pdftotext", pdftotext);
    println!("  {:<10} {:<12} {}", "fallback", "pdf-extract", "built in");
    println!(
        "  {:<10} {:<12} {}",
        "auto", "", "primary, then fallback when it fails or finds no tables"
    );
    Ok(())
}
