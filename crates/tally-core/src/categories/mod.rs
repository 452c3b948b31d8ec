pub mod builtin;
pub mod schema;

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::TallyError;
use crate::model::TransactionRecord;
use schema::{CategorySetDef, CategorySummary};

/// Category for descriptions no keyword matches.
pub const UNCATEGORIZED: &str = "Other";

/// Load a category set from a JSON file.
pub fn load_categories(path: &Path) -> Result<CategorySetDef, TallyError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TallyError::CategoriesInvalid(format!("{}: {}", path.display(), e))
    })?;
    parse_categories_str(&content)
}

/// Parse and validate a category set from a JSON string.
pub fn parse_categories_str(json: &str) -> Result<CategorySetDef, TallyError> {
    let set: CategorySetDef = serde_json::from_str(json)?;
    validate_categories(&set)?;
    Ok(set)
}

/// Validate that a category set is well-formed.
pub fn validate_categories(set: &CategorySetDef) -> Result<(), TallyError> {
    if set.categories.is_empty() {
        return Err(TallyError::CategoriesInvalid(
            "categories must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &set.categories {
        if category.name.trim().is_empty() {
            return Err(TallyError::CategoriesInvalid(
                "category name must not be empty".into(),
            ));
        }
        if category.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(TallyError::CategoriesInvalid(format!(
                "category '{}' has no keywords",
                category.name
            )));
        }
        if !seen.insert(category.name.as_str()) {
            return Err(TallyError::CategoriesInvalid(format!(
                "duplicate category '{}'",
                category.name
            )));
        }
    }

    Ok(())
}

/// First category with a keyword contained in `description`, else [`UNCATEGORIZED`].
pub fn categorize<'a>(description: &str, set: &'a CategorySetDef) -> &'a str {
    let upper = description.to_uppercase();
    set.categories
        .iter()
        .find(|c| {
            c.keywords
                .iter()
                .map(|k| k.trim())
                .any(|k| !k.is_empty() && upper.contains(&k.to_uppercase()))
        })
        .map(|c| c.name.as_str())
        .unwrap_or(UNCATEGORIZED)
}

pub(crate) fn is_balance_row(record: &TransactionRecord) -> bool {
    let lower = record.description.to_lowercase();
    lower.contains("opening balance") || lower.contains("closing balance")
}

/// Per-category counts and totals, largest spending first.
///
/// Opening and closing balance rows are not transactions and are left out.
/// Unparsed amounts count toward the transaction count only. Averages and
/// shares of total spending are rounded to cents.
pub fn summarize(records: &[TransactionRecord], set: &CategorySetDef) -> Vec<CategorySummary> {
    let mut by_category: BTreeMap<&str, CategorySummary> = BTreeMap::new();

    for record in records.iter().filter(|r| !is_balance_row(r)) {
        let name = categorize(&record.description, set);
        let entry = by_category.entry(name).or_insert_with(|| CategorySummary {
            category: name.to_string(),
            transactions: 0,
            total_withdrawals: Decimal::ZERO,
            total_deposits: Decimal::ZERO,
            average_withdrawal: Decimal::ZERO,
            percentage_of_total: Decimal::ZERO,
        });
        entry.transactions += 1;
        if let Some(v) = record.withdrawal.as_ref().and_then(|a| a.as_decimal()) {
            entry.total_withdrawals += v.abs();
        }
        if let Some(v) = record.deposit.as_ref().and_then(|a| a.as_decimal()) {
            entry.total_deposits += v;
        }
    }

    let mut summaries: Vec<CategorySummary> = by_category.into_values().collect();
    let total_spending: Decimal = summaries.iter().map(|s| s.total_withdrawals).sum();
    for s in &mut summaries {
        s.average_withdrawal = (s.total_withdrawals / Decimal::from(s.transactions)).round_dp(2);
        if !total_spending.is_zero() {
            s.percentage_of_total =
                (s.total_withdrawals / total_spending * Decimal::ONE_HUNDRED).round_dp(2);
        }
    }
    summaries.sort_by(|a, b| {
        b.total_withdrawals
            .cmp(&a.total_withdrawals)
            .then_with(|| a.category.cmp(&b.category))
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use builtin::default_categories;
    use rust_decimal_macros::dec;

    fn rec(description: &str, withdrawal: Option<Decimal>, deposit: Option<Decimal>) -> TransactionRecord {
        TransactionRecord {
            date: "01 Aug 25".into(),
            description: description.into(),
            withdrawal: withdrawal.map(Amount::Parsed),
            deposit: deposit.map(Amount::Parsed),
            balance: None,
        }
    }

    #[test]
    fn test_categorize_first_match_wins() {
        let set = default_categories().unwrap();
        assert_eq!(categorize("zus coffee putrajaya", &set), "Food & Dining");
        // "DUITNOWQR" is listed under Food & Dining before Transfers' "DUITNOW".
        assert_eq!(categorize("DUITNOWQR PAYMENT", &set), "Food & Dining");
        assert_eq!(categorize("DUITNOW TO ALI", &set), "Transfers");
        assert_eq!(categorize("Something else", &set), UNCATEGORIZED);
    }

    #[test]
    fn test_summarize_totals_and_order() {
        let set = default_categories().unwrap();
        let records = vec![
            rec("Opening balance", None, None),
            rec("GRAB-EC food", Some(dec!(-12.50)), None),
            rec("MRT top up", Some(dec!(20.00)), None),
            rec("COFFEE", Some(dec!(-7.50)), None),
            rec("Salary", None, Some(dec!(3000.00))),
            rec("Closing balance", None, None),
        ];
        let summary = summarize(&records, &set);
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].category, "Food & Dining");
        assert_eq!(summary[0].transactions, 2);
        assert_eq!(summary[0].total_withdrawals, dec!(20.00));
        assert_eq!(summary[1].category, "Transport");
        assert_eq!(summary[2].category, "Other");
        assert_eq!(summary[2].total_deposits, dec!(3000.00));
    }

    #[test]
    fn test_summarize_average_and_share() {
        let set = default_categories().unwrap();
        let records = vec![
            rec("GRAB-EC food", Some(dec!(10.00)), None),
            rec("COFFEE", Some(dec!(5.00)), None),
            rec("MRT top up", Some(dec!(15.00)), None),
            rec("Salary", None, Some(dec!(3000.00))),
        ];
        let summary = summarize(&records, &set);

        let food = &summary[0];
        assert_eq!(food.category, "Food & Dining");
        assert_eq!(food.average_withdrawal, dec!(7.50));
        assert_eq!(food.percentage_of_total, dec!(50.00));

        let transport = &summary[1];
        assert_eq!(transport.percentage_of_total, dec!(50.00));

        let other = &summary[2];
        assert_eq!(other.average_withdrawal, dec!(0));
        assert_eq!(other.percentage_of_total, dec!(0));
    }

    #[test]
    fn test_share_is_zero_without_spending() {
        let set = default_categories().unwrap();
        let summary = summarize(&[rec("Salary", None, Some(dec!(100)))], &set);
        assert_eq!(summary[0].percentage_of_total, Decimal::ZERO);
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let json = r#"{
            "name": "Bad",
            "categories": [
                { "name": "A", "keywords": ["x"] },
                { "name": "A", "keywords": ["y"] }
            ]
        }"#;
        assert!(matches!(
            parse_categories_str(json),
            Err(TallyError::CategoriesInvalid(_))
        ));
    }

    #[test]
    fn test_category_without_keywords_rejected() {
        let json = r#"{ "name": "Bad", "categories": [ { "name": "A", "keywords": [] } ] }"#;
        assert!(parse_categories_str(json).is_err());
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(parse_categories_str(r#"{ "name": "Bad", "categories": [] }"#).is_err());
    }
}
