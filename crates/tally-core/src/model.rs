use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output columns, in the fixed header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Date,
    Description,
    Withdrawal,
    Deposit,
    Balance,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Date,
        Column::Description,
        Column::Withdrawal,
        Column::Deposit,
        Column::Balance,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Description => "Description",
            Column::Withdrawal => "Withdrawal",
            Column::Deposit => "Deposit",
            Column::Balance => "Balance",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A money cell. Text that does not parse is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Parsed(Decimal),
    Unparsed(String),
}

impl Amount {
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Amount::Parsed(v) => Some(*v),
            Amount::Unparsed(_) => None,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Parsed(v) => write!(f, "{v}"),
            Amount::Unparsed(s) => f.write_str(s),
        }
    }
}

/// One logical transaction, possibly reassembled from several raw rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub description: String,
    pub withdrawal: Option<Amount>,
    pub deposit: Option<Amount>,
    pub balance: Option<Amount>,
}

impl TransactionRecord {
    pub fn amount(&self, column: Column) -> Option<&Amount> {
        match column {
            Column::Withdrawal => self.withdrawal.as_ref(),
            Column::Deposit => self.deposit.as_ref(),
            Column::Balance => self.balance.as_ref(),
            Column::Date | Column::Description => None,
        }
    }

    pub fn amount_mut(&mut self, column: Column) -> Option<&mut Option<Amount>> {
        match column {
            Column::Withdrawal => Some(&mut self.withdrawal),
            Column::Deposit => Some(&mut self.deposit),
            Column::Balance => Some(&mut self.balance),
            Column::Date | Column::Description => None,
        }
    }

    pub fn has_amount(&self) -> bool {
        self.withdrawal.is_some() || self.deposit.is_some() || self.balance.is_some()
    }

    /// Cell texts in header order; absent amounts are empty strings.
    pub fn cells(&self) -> [String; 5] {
        let text = |a: &Option<Amount>| a.as_ref().map(|v| v.to_string()).unwrap_or_default();
        [
            self.date.clone(),
            self.description.clone(),
            text(&self.withdrawal),
            text(&self.deposit),
            text(&self.balance),
        ]
    }
}

/// Final, deduplicated transactions of one document in page/row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedTable {
    pub records: Vec<TransactionRecord>,
}

impl CleanedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Header,
    Footer,
    OrphanContinuation,
    IncompleteRecord,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Header => write!(f, "repeated header"),
            SkipReason::Footer => write!(f, "page footer"),
            SkipReason::OrphanContinuation => write!(f, "continuation without a preceding transaction"),
            SkipReason::IncompleteRecord => write!(f, "missing description or amount"),
        }
    }
}

/// A raw row (or merged record) the normalizer dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub page_number: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// Result of running one document through extraction, normalization and dedup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertedStatement {
    pub backend: String,
    pub tables: usize,
    pub table: CleanedTable,
    pub duplicates_removed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rows: Vec<SkippedRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
