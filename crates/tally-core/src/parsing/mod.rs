pub mod columns;
pub mod normalize;
pub mod values;

use crate::extraction::RawTable;
use crate::model::{SkipReason, SkippedRow, TransactionRecord};
use columns::resolve_layout;
use normalize::{merge_continuation, RowCells};
use values::is_date_like;

/// Records rebuilt from a document's raw tables, before deduplication.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRows {
    pub records: Vec<TransactionRecord>,
    pub skipped_rows: Vec<SkippedRow>,
    pub warnings: Vec<String>,
}

struct PendingRecord {
    page_number: usize,
    record: TransactionRecord,
}

/// Merge the rows of all tables of one document into transaction records.
///
/// Rows are visited in extraction order across table and page boundaries, so
/// a continuation at the top of a page extends the last transaction of the
/// previous page.
pub fn normalize_tables(tables: &[RawTable]) -> NormalizedRows {
    let mut out = NormalizedRows::default();
    let mut pending: Vec<PendingRecord> = Vec::new();

    for (index, table) in tables.iter().enumerate() {
        let Some(layout) = resolve_layout(&table.header) else {
            let msg = format!(
                "Skipped table {} on page {}: no date/description columns in header [{}]",
                index + 1,
                table.page_number,
                table.header.join(", ")
            );
            tracing::warn!("{msg}");
            out.warnings.push(msg);
            continue;
        };

        for raw in &table.rows {
            let cells = RowCells::from_raw(raw, &layout);
            if cells.is_blank() {
                continue;
            }

            let skip_reason = if cells.is_header() {
                Some(SkipReason::Header)
            } else if cells.is_footer() {
                Some(SkipReason::Footer)
            } else if cells.is_continuation() && pending.is_empty() {
                Some(SkipReason::OrphanContinuation)
            } else {
                None
            };

            if let Some(reason) = skip_reason {
                tracing::debug!(page = table.page_number, %reason, row = %cells.raw_text, "row dropped");
                out.skipped_rows.push(SkippedRow {
                    page_number: table.page_number,
                    text: cells.raw_text,
                    reason,
                });
                continue;
            }

            if cells.is_continuation() {
                if let Some(last) = pending.last_mut() {
                    merge_continuation(&mut last.record, &cells);
                }
                continue;
            }

            if !is_date_like(&cells.date) {
                out.warnings.push(format!(
                    "Unrecognized date '{}' on page {} kept as-is",
                    cells.date, table.page_number
                ));
            }

            pending.push(PendingRecord {
                page_number: table.page_number,
                record: cells.into_record(),
            });
        }
    }

    for PendingRecord {
        page_number,
        record,
    } in pending
    {
        if record.description.is_empty() || !record.has_amount() {
            out.skipped_rows.push(SkippedRow {
                page_number,
                text: record
                    .cells()
                    .iter()
                    .filter(|c| !c.is_empty())
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("  "),
                reason: SkipReason::IncompleteRecord,
            });
        } else {
            out.records.push(record);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use rust_decimal_macros::dec;

    fn table(page_number: usize, header: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            page_number,
            header: header.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    const HEADER: &[&str] = &["Date", "Description", "Withdrawal", "Deposit", "Balance"];

    #[test]
    fn test_continuation_merges_into_previous() {
        let out = normalize_tables(&[table(
            1,
            &[],
            &[
                &["2024-01-05", "Grocery", "-50.00"],
                &["", "Store purchase", ""],
                &["2024-01-06", "Salary", "1000.00"],
            ],
        )]);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].description, "Grocery Store purchase");
        assert_eq!(out.records[0].withdrawal, Some(Amount::Parsed(dec!(-50.00))));
        assert_eq!(out.records[1].date, "2024-01-06");
        assert_eq!(out.records[1].description, "Salary");
        assert_eq!(out.records[1].withdrawal, Some(Amount::Parsed(dec!(1000.00))));
        assert!(out.skipped_rows.is_empty());
    }

    #[test]
    fn test_orphan_continuation_dropped() {
        let out = normalize_tables(&[table(
            1,
            HEADER,
            &[
                &["", "stray text", "", "", ""],
                &["01 Aug 25", "Coffee", "4.50", "", "95.50"],
            ],
        )]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].description, "Coffee");
        assert_eq!(out.skipped_rows.len(), 1);
        assert_eq!(out.skipped_rows[0].reason, SkipReason::OrphanContinuation);
    }

    #[test]
    fn test_continuation_crosses_page_boundary() {
        let out = normalize_tables(&[
            table(1, HEADER, &[&["31 Aug 25", "TRANSFER TO", "", "", ""]]),
            table(
                2,
                HEADER,
                &[
                    &["Date", "Description", "Withdrawal", "Deposit", "Balance"],
                    &["", "JOHN DOE", "100.00", "", "900.00"],
                ],
            ),
        ]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].description, "TRANSFER TO JOHN DOE");
        assert_eq!(out.records[0].balance, Some(Amount::Parsed(dec!(900.00))));
        assert_eq!(out.skipped_rows[0].reason, SkipReason::Header);
    }

    #[test]
    fn test_footer_rows_dropped() {
        let out = normalize_tables(&[table(
            1,
            HEADER,
            &[
                &["01 Aug 25", "Opening balance", "", "", "100.00"],
                &["Closing balance", "", "", "", "100.00"],
                &["", "", "", "", ""],
            ],
        )]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].description, "Opening balance");
        assert_eq!(out.skipped_rows.len(), 1);
        assert_eq!(out.skipped_rows[0].reason, SkipReason::Footer);
    }

    #[test]
    fn test_incomplete_record_reported() {
        let out = normalize_tables(&[table(
            3,
            HEADER,
            &[&["01 Aug 25", "No amounts here", "", "", ""]],
        )]);
        assert!(out.records.is_empty());
        assert_eq!(out.skipped_rows[0].reason, SkipReason::IncompleteRecord);
        assert_eq!(out.skipped_rows[0].page_number, 3);
        assert_eq!(out.skipped_rows[0].text, "01 Aug 25  No amounts here");
    }

    #[test]
    fn test_malformed_values_kept() {
        let out = normalize_tables(&[table(
            1,
            HEADER,
            &[&["Sometime", "Odd row", "n/a", "", "10.00"]],
        )]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].date, "Sometime");
        assert_eq!(out.records[0].withdrawal, Some(Amount::Unparsed("n/a".into())));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("Sometime"));
    }

    #[test]
    fn test_table_without_required_columns_skipped() {
        let out = normalize_tables(&[table(
            1,
            &["Amount", "Balance", "Note"],
            &[&["1.00", "2.00", "x"]],
        )]);
        assert!(out.records.is_empty());
        assert!(out.warnings[0].starts_with("Skipped table 1 on page 1"));
    }

    #[test]
    fn test_rows_containing_header_words_are_kept() {
        let out = normalize_tables(&[table(
            1,
            HEADER,
            &[
                &["01 Aug 25", "ACCOUNT UPDATE FEE", "1.00", "", "99.00"],
                &["02 Aug 25", "CONSOLIDATED DEPOSIT", "", "10.00", "109.00"],
                &["03 Aug 25", "AUTODEBIT MANDATE", "5.00", "", "104.00"],
            ],
        )]);
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.records[1].deposit, Some(Amount::Parsed(dec!(10.00))));
        assert!(out.skipped_rows.is_empty());
    }
}
