use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An ordered set of spending categories. The first matching category wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySetDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub categories: Vec<CategoryDef>,
}

/// A named category and the description keywords that select it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    /// Matched case-insensitively as substrings of the description.
    pub keywords: Vec<String>,
}

/// Totals for one category over a set of transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub transactions: usize,
    /// Sum of absolute withdrawal amounts.
    pub total_withdrawals: Decimal,
    pub total_deposits: Decimal,
    /// Total withdrawals divided by the transaction count.
    pub average_withdrawal: Decimal,
    /// Share of all withdrawals, in percent.
    pub percentage_of_total: Decimal,
}
