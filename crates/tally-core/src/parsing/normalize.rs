use crate::extraction::table::is_table_header;
use crate::model::{Column, TransactionRecord};
use crate::parsing::values::{
    clean_description, collapse_whitespace, is_footer_text, is_transaction_date_note,
    parse_amount,
};

const AMOUNT_COLUMNS: [Column; 3] = [Column::Withdrawal, Column::Deposit, Column::Balance];

/// One raw row with its cells sorted into output columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowCells {
    pub date: String,
    pub description: String,
    pub withdrawal: String,
    pub deposit: String,
    pub balance: String,
    /// Every non-empty cell of the raw row, mapped or not.
    pub raw_text: String,
}

impl RowCells {
    /// Sort a raw row into columns according to `layout`.
    ///
    /// Cells past the end of the layout, or under an unrecognized title, are
    /// ignored. Cells landing in the same column are joined with a space.
    pub fn from_raw(row: &[String], layout: &[Option<Column>]) -> RowCells {
        let mut cells = RowCells {
            raw_text: row
                .iter()
                .map(|c| collapse_whitespace(c))
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>()
                .join("  "),
            ..Default::default()
        };

        for (text, column) in row.iter().zip(layout) {
            let Some(column) = column else { continue };
            let text = collapse_whitespace(text);
            if text.is_empty() {
                continue;
            }
            let slot = cells.slot_mut(*column);
            if !slot.is_empty() {
                slot.push(' ');
            }
            slot.push_str(&text);
        }

        cells
    }

    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Date => &self.date,
            Column::Description => &self.description,
            Column::Withdrawal => &self.withdrawal,
            Column::Deposit => &self.deposit,
            Column::Balance => &self.balance,
        }
    }

    fn slot_mut(&mut self, column: Column) -> &mut String {
        match column {
            Column::Date => &mut self.date,
            Column::Description => &mut self.description,
            Column::Withdrawal => &mut self.withdrawal,
            Column::Deposit => &mut self.deposit,
            Column::Balance => &mut self.balance,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.raw_text.is_empty()
    }

    /// A column-title row repeated on a later page or inside a table.
    pub fn is_header(&self) -> bool {
        self.date.eq_ignore_ascii_case("date") || is_table_header(&self.raw_text)
    }

    pub fn is_footer(&self) -> bool {
        is_footer_text(&self.date) || (self.date.is_empty() && is_footer_text(&self.description))
    }

    pub fn is_continuation(&self) -> bool {
        self.date.is_empty()
    }

    /// Start a new record from a dated row.
    pub fn into_record(self) -> TransactionRecord {
        TransactionRecord {
            description: clean_description(&self.description),
            withdrawal: parse_amount(&self.withdrawal),
            deposit: parse_amount(&self.deposit),
            balance: parse_amount(&self.balance),
            date: self.date,
        }
    }
}

/// Fold a dateless row into the record it continues.
///
/// Description text is appended with a space. Amount cells fill their fields,
/// replacing earlier values: statements often print the amounts on the last
/// physical line of a transaction. `Transaction date:` notes only contribute
/// their amounts.
pub fn merge_continuation(record: &mut TransactionRecord, cells: &RowCells) {
    if !is_transaction_date_note(&cells.description) {
        let extra = clean_description(&cells.description);
        if !extra.is_empty() {
            if !record.description.is_empty() {
                record.description.push(' ');
            }
            record.description.push_str(&extra);
        }
    }

    for column in AMOUNT_COLUMNS {
        if let Some(amount) = parse_amount(cells.get(column)) {
            if let Some(slot) = record.amount_mut(column) {
                *slot = Some(amount);
            }
        }
    }
}
