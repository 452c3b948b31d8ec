use std::io;
use std::path::Path;

use crate::error::TallyError;
use crate::model::{CleanedTable, Column, TransactionRecord};
use crate::parsing::values::parse_amount;

/// Write the table as comma-separated text with the fixed header.
pub fn write_csv(table: &CleanedTable, path: &Path) -> Result<(), TallyError> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_records(table, &mut wtr)?;
    Ok(())
}

/// Write header and rows to any CSV writer, then flush it.
pub fn write_records<W: io::Write>(
    table: &CleanedTable,
    wtr: &mut csv::Writer<W>,
) -> Result<(), TallyError> {
    wtr.write_record(Column::ALL.iter().map(|c| c.title()))?;
    for record in &table.records {
        wtr.write_record(record.cells())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a CSV produced by [`write_csv`] back into records.
///
/// Columns are located by header title; missing columns read as empty.
pub fn read_csv(path: &Path) -> Result<Vec<TransactionRecord>, TallyError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers = rdr.headers()?.clone();
    let position = |column: Column| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(column.title()))
    };
    let [date, description, withdrawal, deposit, balance] = Column::ALL.map(position);

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        records.push(TransactionRecord {
            date: field(&row, date).to_string(),
            description: field(&row, description).to_string(),
            withdrawal: parse_amount(field(&row, withdrawal)),
            deposit: parse_amount(field(&row, deposit)),
            balance: parse_amount(field(&row, balance)),
        });
    }

    Ok(records)
}

fn field(row: &csv::StringRecord, position: Option<usize>) -> &str {
    position.and_then(|p| row.get(p)).unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use rust_decimal_macros::dec;

    fn sample() -> CleanedTable {
        CleanedTable {
            records: vec![
                TransactionRecord {
                    date: "2024-01-05".into(),
                    description: "Grocery, Store purchase".into(),
                    withdrawal: Some(Amount::Parsed(dec!(-50.00))),
                    deposit: None,
                    balance: None,
                },
                TransactionRecord {
                    date: "2024-01-06".into(),
                    description: "Salary".into(),
                    withdrawal: None,
                    deposit: Some(Amount::Parsed(dec!(1000.00))),
                    balance: Some(Amount::Unparsed("n/a".into())),
                },
            ],
        }
    }

    #[test]
    fn test_written_text() {
        let mut wtr = csv::Writer::from_writer(vec![]);
        write_records(&sample(), &mut wtr).unwrap();
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            "Date,Description,Withdrawal,Deposit,Balance\n\
             2024-01-05,\"Grocery, Store purchase\",-50.00,,\n\
             2024-01-06,Salary,,1000.00,n/a\n"
        );
    }

    #[test]
    fn test_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.csv");
        write_csv(&sample(), &path).unwrap();
        assert_eq!(read_csv(&path).unwrap(), sample().records);
    }

    #[test]
    fn test_read_reordered_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.csv");
        std::fs::write(&path, "Description,Date,Deposit\nTea,01 Aug 25,3.00\n").unwrap();
        let records = read_csv(&path).unwrap();
        assert_eq!(records[0].description, "Tea");
        assert_eq!(records[0].date, "01 Aug 25");
        assert_eq!(records[0].deposit, Some(Amount::Parsed(dec!(3.00))));
        assert_eq!(records[0].withdrawal, None);
    }
}
