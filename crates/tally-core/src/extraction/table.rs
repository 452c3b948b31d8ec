use regex::Regex;
use std::sync::LazyLock;

use crate::extraction::{PageContent, RawTable};
use crate::parsing::values::is_date_like;

/// Reconstruct statement tables from layout-preserving text.
///
/// `pdftotext -layout` keeps columns aligned with spaces, so the header line
/// gives each column a character span and data lines are cut on gaps of two
/// or more spaces and matched against those spans.

static FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(page\s+\d+\s*(of|/)\s*\d+|important\s+notice)").expect("footer regex")
});

// Whole words only: "MANDATE", "UPDATE" and "AUTODEBIT" are transaction text.
static HEADER_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdate\b").expect("header date regex"));

static HEADER_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(withdrawals?|deposits?|balance|debits?|credits?|amount)\b")
        .expect("header amount regex")
});

/// A run of text between whitespace gaps, with its character columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Detect if a line looks like the statement's column header.
///
/// Needs the word `date`, an amount column title and at least three
/// segments. A line whose first segment is itself a date is a transaction.
pub fn is_table_header(line: &str) -> bool {
    let segments = split_segments(line);
    segments.len() >= 3
        && !is_date_like(&segments[0].text)
        && HEADER_DATE_RE.is_match(line)
        && HEADER_AMOUNT_RE.is_match(line)
}

/// Detect page furniture that ends a table.
pub fn is_table_footer(line: &str) -> bool {
    FOOTER_RE.is_match(line)
}

/// Split a line on gaps of 2+ whitespace characters.
///
/// Positions are counted in characters so non-ASCII descriptions keep their
/// alignment with the header.
pub fn split_segments(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut last_end = (0, 0);
    let mut space_count = 0;

    for (col, (byte, c)) in line.char_indices().enumerate() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some((start_byte, start_col)) = start.take() {
                    segments.push(Segment {
                        start: start_col,
                        end: last_end.1,
                        text: line[start_byte..last_end.0].to_string(),
                    });
                }
            }
        } else {
            if start.is_none() {
                start = Some((byte, col));
            }
            space_count = 0;
            last_end = (byte + c.len_utf8(), col + 1);
        }
    }

    if let Some((start_byte, start_col)) = start {
        segments.push(Segment {
            start: start_col,
            end: last_end.1,
            text: line[start_byte..last_end.0].to_string(),
        });
    }

    segments
}

/// Find the statement tables on every page.
///
/// A table starts at a header line and runs until a footer line or the end
/// of the page. Pages without a header contribute nothing.
pub fn detect_tables(pages: &[PageContent]) -> Vec<RawTable> {
    let mut tables = Vec::new();

    for page in pages {
        let mut current: Option<(Vec<Segment>, RawTable)> = None;

        for line in &page.lines {
            if is_table_header(line) {
                if let Some((_, table)) = current.take() {
                    push_non_empty(&mut tables, table);
                }
                let columns = split_segments(line);
                let header = columns.iter().map(|c| c.text.clone()).collect();
                current = Some((
                    columns,
                    RawTable {
                        page_number: page.page_number,
                        header,
                        rows: Vec::new(),
                    },
                ));
                continue;
            }

            if current.is_none() {
                continue;
            }

            if is_table_footer(line) {
                if let Some((_, table)) = current.take() {
                    push_non_empty(&mut tables, table);
                }
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }

            if let Some((columns, table)) = current.as_mut() {
                table.rows.push(assign_cells(columns, line));
            }
        }

        if let Some((_, table)) = current.take() {
            push_non_empty(&mut tables, table);
        }
    }

    tables
}

fn push_non_empty(tables: &mut Vec<RawTable>, table: RawTable) {
    if !table.rows.is_empty() {
        tables.push(table);
    }
}

/// Place each segment of `line` in the column it overlaps most (or sits
/// closest to). Segments sharing a column are joined with a space.
fn assign_cells(columns: &[Segment], line: &str) -> Vec<String> {
    let mut cells = vec![String::new(); columns.len()];

    for segment in split_segments(line) {
        let idx = nearest_column(columns, &segment);
        let cell = &mut cells[idx];
        if !cell.is_empty() {
            cell.push(' ');
        }
        cell.push_str(&segment.text);
    }

    cells
}

fn nearest_column(columns: &[Segment], segment: &Segment) -> usize {
    let mut best = 0;
    let mut best_score = i64::MIN;
    for (i, col) in columns.iter().enumerate() {
        // positive: overlap length, negative: distance between spans
        let score = segment.end.min(col.end) as i64 - segment.start.max(col.start) as i64;
        if score > best_score {
            best = i;
            best_score = score;
        }
    }
    best
}
