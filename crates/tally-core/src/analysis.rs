use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::categories::schema::{CategorySetDef, CategorySummary};
use crate::categories::{categorize, is_balance_row, summarize, UNCATEGORIZED};
use crate::error::TallyError;
use crate::model::{Amount, TransactionRecord};
use crate::output::csv::read_csv;
use crate::parsing::values::collapse_whitespace;

/// Merchants listed per ranking.
pub const DEFAULT_TOP_MERCHANTS: usize = 10;

/// Merchant name for descriptions with no text.
pub const UNKNOWN_MERCHANT: &str = "Unknown";

static PERIOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)_(\d{4})(\d{2})\.csv$").expect("period regex"));

const DATE_FORMATS: &[&str] = &["%d %b %y", "%d %b %Y", "%d-%b-%y", "%d-%b-%Y", "%Y-%m-%d", "%d/%m/%Y"];

/// Statement month, taken from an `<account>_YYYYMM.csv` file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// `August 2025` style label.
    pub fn name(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

/// Period encoded in a converted file's name, if any.
pub fn statement_period(file_name: &str) -> Option<Period> {
    let caps = PERIOD_RE.captures(file_name)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    (1..=12).contains(&month).then_some(Period { year, month })
}

/// Parse a statement date cell such as `05 Aug 25`.
pub fn parse_statement_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
}

/// The records of one converted CSV file.
#[derive(Debug, Clone)]
pub struct StatementTransactions {
    pub source: String,
    pub period: Option<Period>,
    pub records: Vec<TransactionRecord>,
}

/// Every `.csv` file in `dir` (any case), sorted by path.
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>, TallyError> {
    if !dir.is_dir() {
        return Err(TallyError::InputDirMissing(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every converted CSV in `dir` with its statement period.
pub fn load_statements(dir: &Path) -> Result<Vec<StatementTransactions>, TallyError> {
    let mut statements = Vec::new();
    for path in csv_files(dir)? {
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let period = statement_period(&source);
        if period.is_none() {
            tracing::warn!(file = %source, "no _YYYYMM period in file name; left out of the monthly summary");
        }
        let records = read_csv(&path)?;
        tracing::debug!(file = %source, records = records.len(), "loaded statement");
        statements.push(StatementTransactions {
            source,
            period,
            records,
        });
    }
    Ok(statements)
}

/// Withdrawals for one category within a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    pub withdrawals: Decimal,
}

/// Cash flow for one statement month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub total_withdrawals: Decimal,
    pub total_deposits: Decimal,
    /// Deposits minus withdrawals.
    pub net_cash_flow: Decimal,
    pub transactions: usize,
    /// Distinct dates with a withdrawal.
    pub days_with_spending: usize,
    pub avg_daily_spending: Decimal,
    /// One entry per category in the set, in set order. `Other` is not listed.
    pub categories: Vec<CategoryAmount>,
}

/// One row of a merchant ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantSummary {
    pub rank: usize,
    pub merchant: String,
    pub total_spending: Decimal,
    pub transactions: usize,
    pub total_deposits: Decimal,
}

/// Everything `tally summarize` reports over a folder of converted statements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub files: usize,
    pub transactions: usize,
    pub monthly: Vec<MonthlySummary>,
    pub categories: Vec<CategorySummary>,
    pub top_by_spending: Vec<MerchantSummary>,
    pub top_by_frequency: Vec<MerchantSummary>,
}

fn withdrawal(record: &TransactionRecord) -> Decimal {
    record
        .withdrawal
        .as_ref()
        .and_then(Amount::as_decimal)
        .map(|v| v.abs())
        .unwrap_or_default()
}

fn deposit(record: &TransactionRecord) -> Decimal {
    record
        .deposit
        .as_ref()
        .and_then(Amount::as_decimal)
        .unwrap_or_default()
}

/// Merchant part of a description: the text before the first ` - `.
pub fn merchant_name(description: &str) -> String {
    let head = description.split(" - ").next().unwrap_or_default();
    let merchant = collapse_whitespace(head);
    if merchant.is_empty() {
        UNKNOWN_MERCHANT.to_string()
    } else {
        merchant
    }
}

/// Per-month totals, oldest month first.
///
/// Records from files without a period are skipped. Balance rows are never
/// counted.
pub fn monthly_summary(
    statements: &[StatementTransactions],
    set: &CategorySetDef,
) -> Vec<MonthlySummary> {
    let mut by_period: BTreeMap<Period, Vec<&TransactionRecord>> = BTreeMap::new();
    for statement in statements {
        let Some(period) = statement.period else {
            continue;
        };
        by_period
            .entry(period)
            .or_default()
            .extend(statement.records.iter().filter(|r| !is_balance_row(r)));
    }

    by_period
        .into_iter()
        .map(|(period, records)| {
            let total_withdrawals: Decimal = records.iter().map(|r| withdrawal(r)).sum();
            let total_deposits: Decimal = records.iter().map(|r| deposit(r)).sum();

            let spending_days: BTreeSet<NaiveDate> = records
                .iter()
                .filter(|r| !withdrawal(r).is_zero())
                .filter_map(|r| parse_statement_date(&r.date))
                .collect();
            let days_with_spending = spending_days.len();
            let avg_daily_spending = if days_with_spending == 0 {
                Decimal::ZERO
            } else {
                (total_withdrawals / Decimal::from(days_with_spending)).round_dp(2)
            };

            let mut per_category: HashMap<&str, Decimal> = HashMap::new();
            for record in &records {
                *per_category
                    .entry(categorize(&record.description, set))
                    .or_default() += withdrawal(record);
            }
            let categories = set
                .categories
                .iter()
                .filter(|c| c.name != UNCATEGORIZED)
                .map(|c| CategoryAmount {
                    category: c.name.clone(),
                    withdrawals: per_category.get(c.name.as_str()).copied().unwrap_or_default(),
                })
                .collect();

            MonthlySummary {
                year: period.year,
                month: period.month,
                month_name: period.name(),
                total_withdrawals,
                total_deposits,
                net_cash_flow: total_deposits - total_withdrawals,
                transactions: records.len(),
                days_with_spending,
                avg_daily_spending,
                categories,
            }
        })
        .collect()
}

/// Top `n` merchants by total spending and by transaction count.
///
/// Ties rank by spending, then by name.
pub fn top_merchants(
    records: &[TransactionRecord],
    n: usize,
) -> (Vec<MerchantSummary>, Vec<MerchantSummary>) {
    let mut by_merchant: BTreeMap<String, MerchantSummary> = BTreeMap::new();
    for record in records.iter().filter(|r| !is_balance_row(r)) {
        let merchant = merchant_name(&record.description);
        let entry = by_merchant
            .entry(merchant.clone())
            .or_insert_with(|| MerchantSummary {
                rank: 0,
                merchant,
                total_spending: Decimal::ZERO,
                transactions: 0,
                total_deposits: Decimal::ZERO,
            });
        entry.transactions += 1;
        entry.total_spending += withdrawal(record);
        entry.total_deposits += deposit(record);
    }

    let mut merchants: Vec<MerchantSummary> = by_merchant.into_values().collect();

    merchants.sort_by(|a, b| {
        b.total_spending
            .cmp(&a.total_spending)
            .then_with(|| a.merchant.cmp(&b.merchant))
    });
    let by_spending = ranked(&merchants, n);

    merchants.sort_by(|a, b| {
        b.transactions
            .cmp(&a.transactions)
            .then_with(|| b.total_spending.cmp(&a.total_spending))
            .then_with(|| a.merchant.cmp(&b.merchant))
    });
    let by_frequency = ranked(&merchants, n);

    (by_spending, by_frequency)
}

fn ranked(sorted: &[MerchantSummary], n: usize) -> Vec<MerchantSummary> {
    sorted
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, m)| MerchantSummary {
            rank: i + 1,
            ..m.clone()
        })
        .collect()
}

/// Monthly, category and merchant summaries over a set of statements.
pub fn analyze(
    statements: &[StatementTransactions],
    set: &CategorySetDef,
    top_n: usize,
) -> AnalysisReport {
    let records: Vec<TransactionRecord> = statements
        .iter()
        .flat_map(|s| s.records.iter().cloned())
        .collect();
    let (top_by_spending, top_by_frequency) = top_merchants(&records, top_n);

    AnalysisReport {
        files: statements.len(),
        transactions: records.iter().filter(|r| !is_balance_row(r)).count(),
        monthly: monthly_summary(statements, set),
        categories: summarize(&records, set),
        top_by_spending,
        top_by_frequency,
    }
}
