use crate::model::Column;

/// Positional layout used for tables that arrive without a header row.
pub const DEFAULT_LAYOUT: [Column; 5] = Column::ALL;

/// Map a printed column title to an output column.
///
/// Titles vary between statement generations ("Withdrawal (RM)", "Debit",
/// "Transaction Description"), so matching is by keyword, first hit wins.
pub fn column_for_title(title: &str) -> Option<Column> {
    let lower = title.trim().to_lowercase();
    if lower.contains("date") {
        Some(Column::Date)
    } else if ["description", "desc", "particulars", "details"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        Some(Column::Description)
    } else if ["withdrawal", "withdraw", "debit"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        Some(Column::Withdrawal)
    } else if lower.contains("deposit") || lower.contains("credit") {
        Some(Column::Deposit)
    } else if lower.contains("balance") {
        Some(Column::Balance)
    } else {
        None
    }
}

/// Resolve the role of every cell position of a table.
///
/// Returns `None` when the header lacks a date or description column; such a
/// table cannot be normalized.
pub fn resolve_layout(header: &[String]) -> Option<Vec<Option<Column>>> {
    if header.is_empty() {
        return Some(DEFAULT_LAYOUT.iter().copied().map(Some).collect());
    }

    let layout: Vec<Option<Column>> = header.iter().map(|h| column_for_title(h)).collect();
    let has = |c: Column| layout.contains(&Some(c));
    if has(Column::Date) && has(Column::Description) {
        Some(layout)
    } else {
        None
    }
}
