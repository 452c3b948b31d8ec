use std::collections::HashSet;

use crate::model::TransactionRecord;

/// Drop exact duplicates, keeping the first occurrence in place.
///
/// Overlapping table detections around page breaks yield the same row twice.
/// Only records equal in every field count; amounts compare by value, so
/// `50.0` and `50.00` match. Returns the number of records removed.
pub fn dedup_records(records: &mut Vec<TransactionRecord>) -> usize {
    let before = records.len();
    let mut seen = HashSet::with_capacity(before);
    records.retain(|r| seen.insert(r.clone()));
    before - records.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use rust_decimal_macros::dec;

    fn rec(date: &str, description: &str, withdrawal: Option<Amount>) -> TransactionRecord {
        TransactionRecord {
            date: date.into(),
            description: description.into(),
            withdrawal,
            deposit: None,
            balance: Some(Amount::Parsed(dec!(100.00))),
        }
    }

    #[test]
    fn test_exact_duplicate_removed() {
        let a = rec("01 Aug 25", "Coffee", Some(Amount::Parsed(dec!(4.50))));
        let b = rec("02 Aug 25", "Tea", Some(Amount::Parsed(dec!(3.00))));
        let mut records = vec![a.clone(), b.clone(), a.clone()];
        assert_eq!(dedup_records(&mut records), 1);
        assert_eq!(records, vec![a, b]);
    }

    #[test]
    fn test_partial_match_kept() {
        let mut records = vec![
            rec("01 Aug 25", "Coffee", Some(Amount::Parsed(dec!(4.50)))),
            rec("01 Aug 25", "Coffee", Some(Amount::Parsed(dec!(5.50)))),
            rec("01 Aug 25", "Coffee", None),
        ];
        assert_eq!(dedup_records(&mut records), 0);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_equal_values_different_scale() {
        let mut records = vec![
            rec("01 Aug 25", "Coffee", Some(Amount::Parsed(dec!(4.5)))),
            rec("01 Aug 25", "Coffee", Some(Amount::Parsed(dec!(4.50)))),
        ];
        assert_eq!(dedup_records(&mut records), 1);
        assert_eq!(records[0].withdrawal, Some(Amount::Parsed(dec!(4.5))));
    }
}
