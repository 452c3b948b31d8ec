use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::extraction::table::is_table_footer;
use crate::model::Amount;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(",
        r"\d{4}-\d{2}-\d{2}",
        r"|\d{1,2}[/.\-]\d{1,2}([/.\-]\d{2,4})?",
        r"|\d{1,2}[\s\-][a-z]{3,9}\.?([\s\-]\d{2,4})?",
        r"|[a-z]{3,9}\.?\s+\d{1,2}(,?\s+\d{4})?",
        r")$"
    ))
    .expect("date regex")
});

static TRANSACTION_DATE_NOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)transaction\s+date\s*:.*$").expect("note regex"));

static NOTE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*transaction\s+date\s*:").expect("note line regex"));

static CLOSING_BALANCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*closing\s+balance").expect("closing regex"));

/// Does a date cell look like a statement date?
///
/// Accepts `2024-01-05`, `05/01/2024`, `5.1.24`, `01 Aug 25`, `01-Aug-2025`,
/// `Aug 01, 2025` and `01 Aug`.
pub fn is_date_like(s: &str) -> bool {
    DATE_RE.is_match(s.trim())
}

/// Is this cell text page furniture rather than a transaction?
pub fn is_footer_text(s: &str) -> bool {
    is_table_footer(s) || CLOSING_BALANCE_RE.is_match(s)
}

/// Is this a `Transaction date: ...` annotation line?
pub fn is_transaction_date_note(s: &str) -> bool {
    NOTE_LINE_RE.is_match(s)
}

/// Trim a cell and collapse inner whitespace runs (including newlines).
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove `Transaction date: ...` annotations and tidy whitespace.
pub fn clean_description(s: &str) -> String {
    let stripped = TRANSACTION_DATE_NOTE_RE.replace_all(s, "");
    collapse_whitespace(&stripped)
}

/// Parse a money cell.
///
/// Handles formats like:
/// - "1,234.50" -> Parsed(1234.50)
/// - "RM 12.00" -> Parsed(12.00)
/// - "-50.00", "50.00-", "(50.00)" -> Parsed(-50.00)
/// - "", "-", "–" -> None (blank cell)
/// - anything else is kept verbatim as Unparsed
pub fn parse_amount(s: &str) -> Option<Amount> {
    let s = collapse_whitespace(s);

    if s.is_empty() || s == "-" || s == "–" || s == "—" {
        return None;
    }

    match parse_decimal(&s) {
        Some(v) => Some(Amount::Parsed(v)),
        None => Some(Amount::Unparsed(s)),
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let mut body = s.trim();
    let mut negative = false;

    if let Some(inner) = body.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
        negative = true;
        body = inner.trim();
    }
    if let Some(rest) = body.strip_suffix('-') {
        negative = true;
        body = rest.trim_end();
    }
    if let Some(rest) = body.strip_prefix('-') {
        negative = !negative;
        body = rest.trim_start();
    }

    let lower = body.to_lowercase();
    if lower.starts_with("rm") {
        body = body[2..].trim_start();
    }
    let body = body.trim_start_matches(['$', '€', '£']);

    let normalized: String = body.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if normalized.is_empty() || !normalized.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let value = Decimal::from_str(&normalized).ok()?;
    Some(if negative { -value } else { value })
}
