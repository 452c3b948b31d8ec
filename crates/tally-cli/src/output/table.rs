use rust_decimal::Decimal;
use std::path::Path;
use tally_core::analysis::{AnalysisReport, MerchantSummary};
use tally_core::batch::{BatchReport, DocumentStatus};
use tally_core::categories::schema::CategorySummary;
use tally_core::model::{Column, ConvertedStatement};

const MAX_DESCRIPTION: usize = 48;

pub fn print_batch(report: &BatchReport, output_dir: &Path) {
    if report.documents.is_empty() {
        println!("No PDF files found.");
        return;
    }

    for doc in &report.documents {
        let name = doc
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| doc.source.display().to_string());

        match &doc.status {
            DocumentStatus::Converted {
                records,
                duplicates_removed,
                skipped_rows,
                warnings,
                ..
            } => {
                println!("  OK      {name}: {records} transaction(s)");
                if *duplicates_removed > 0 {
                    println!("          {duplicates_removed} duplicate row(s) removed");
                }
                if *skipped_rows > 0 {
                    println!("          {skipped_rows} row(s) skipped");
                }
                for w in warnings {
                    println!("          warning: {w}");
                }
            }
            DocumentStatus::Failed { error } => {
                println!("  FAILED  {name}: {error}");
            }
        }
    }

    println!(
        "\n{} converted, {} failed. Output in {}",
        report.converted(),
        report.failed(),
        output_dir.display()
    );
}

pub fn format_statement(statement: &ConvertedStatement) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Backend: {}  Tables: {}  Transactions: {}\n",
        statement.backend,
        statement.tables,
        statement.table.len()
    ));
    if statement.duplicates_removed > 0 {
        out.push_str(&format!(
            "Duplicates removed: {}\n",
            statement.duplicates_removed
        ));
    }
    out.push('\n');

    let rows: Vec<[String; 5]> = statement
        .table
        .records
        .iter()
        .map(|r| {
            let mut cells = r.cells();
            cells[1] = truncate(&cells[1], MAX_DESCRIPTION);
            cells
        })
        .collect();

    let mut widths = Column::ALL.map(|c| c.title().len());
    for cells in &rows {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let titles = Column::ALL.map(|c| c.title().to_string());
    out.push_str(&format_row(&titles, &widths));
    out.push_str(&format!(
        "  {}\n",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    ));
    for cells in &rows {
        out.push_str(&format_row(cells, &widths));
    }

    if !statement.skipped_rows.is_empty() {
        out.push_str(&format!(
            "\nSkipped rows ({}):\n",
            statement.skipped_rows.len()
        ));
        for row in &statement.skipped_rows {
            out.push_str(&format!(
                "  page {}: {} ({})\n",
                row.page_number, row.text, row.reason
            ));
        }
    }

    if !statement.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in &statement.warnings {
            out.push_str(&format!("  {w}\n"));
        }
    }

    out
}

/// Date and description left-aligned, amounts right-aligned.
fn format_row(cells: &[String; 5], widths: &[usize; 5]) -> String {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, w))| {
            if i < 2 {
                format!("{:<w$}", cell, w = *w)
            } else {
                format!("{:>w$}", cell, w = *w)
            }
        })
        .collect();
    format!("  {}\n", parts.join("  ").trim_end())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max - 3).collect();
        t.push_str("...");
        t
    }
}

pub fn print_analysis(report: &AnalysisReport) {
    println!(
        "{} transaction(s) from {} file(s)\n",
        report.transactions, report.files
    );

    if !report.monthly.is_empty() {
        println!("Monthly summary:\n");
        println!(
            "  {:<16}  {:>12}  {:>12}  {:>12}  {:>6}  {:>5}  {:>10}",
            "Month", "Withdrawals", "Deposits", "Net", "Count", "Days", "Per day"
        );
        for m in &report.monthly {
            println!(
                "  {:<16}  {:>12}  {:>12}  {:>12}  {:>6}  {:>5}  {:>10}",
                m.month_name,
                money(m.total_withdrawals),
                money(m.total_deposits),
                money(m.net_cash_flow),
                m.transactions,
                m.days_with_spending,
                money(m.avg_daily_spending)
            );
            let spent: Vec<String> = m
                .categories
                .iter()
                .filter(|c| !c.withdrawals.is_zero())
                .map(|c| format!("{} {}", c.category, money(c.withdrawals)))
                .collect();
            if !spent.is_empty() {
                println!("    {}", spent.join(", "));
            }
        }
        println!();
    }

    print_categories(&report.categories);

    print_merchants("Top merchants by spending", &report.top_by_spending);
    print_merchants("Top merchants by frequency", &report.top_by_frequency);
}

fn money(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

fn print_categories(summary: &[CategorySummary]) {
    println!("Spending by category:\n");

    let width = summary
        .iter()
        .map(|s| s.category.len())
        .max()
        .unwrap_or(8)
        .max("Category".len());

    println!(
        "  {:<width$}  {:>6}  {:>14}  {:>12}  {:>7}  {:>14}",
        "Category", "Count", "Withdrawals", "Average", "Share", "Deposits"
    );
    for s in summary {
        println!(
            "  {:<width$}  {:>6}  {:>14}  {:>12}  {:>6}%  {:>14}",
            s.category,
            s.transactions,
            money(s.total_withdrawals),
            money(s.average_withdrawal),
            s.percentage_of_total.round_dp(1).to_string(),
            money(s.total_deposits)
        );
    }
    println!();
}

fn print_merchants(title: &str, merchants: &[MerchantSummary]) {
    if merchants.is_empty() {
        return;
    }
    println!("{title}:\n");
    for m in merchants {
        println!(
            "  {:>2}. {:<40}  {:>12}  {:>4}x",
            m.rank,
            truncate(&m.merchant, 40),
            money(m.total_spending),
            m.transactions
        );
    }
    println!();
}
