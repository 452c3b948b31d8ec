use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet};
use std::path::Path;

use crate::analysis::{AnalysisReport, MerchantSummary, StatementTransactions};
use crate::categories::schema::CategorySetDef;
use crate::categories::{categorize, is_balance_row};
use crate::error::TallyError;
use crate::model::{Amount, CleanedTable, Column};

pub const SHEET_NAME: &str = "Transactions";

/// File name of the workbook written by `tally summarize --report`.
pub const ANALYSIS_REPORT_NAME: &str = "analysis_report.xlsx";

pub const ALL_TRANSACTIONS_SHEET: &str = "All Transactions";
pub const MONTHLY_SHEET: &str = "Monthly Summary";
pub const CATEGORY_SHEET: &str = "Category Summary";
pub const TOP_SPENDING_SHEET: &str = "Top Merchants (Spending)";
pub const TOP_FREQUENCY_SHEET: &str = "Top Merchants (Frequency)";

const AMOUNT_FORMAT: &str = "#,##0.00";

/// Workbook with a fixed creation time so identical input gives identical bytes.
fn new_workbook() -> Result<Workbook, TallyError> {
    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);
    Ok(workbook)
}

fn write_header(worksheet: &mut Worksheet, titles: &[&str], format: &Format) -> Result<(), TallyError> {
    for (col, title) in titles.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, format)?;
    }
    Ok(())
}

/// Write the table as a single-sheet workbook.
///
/// Parsed amounts become numeric cells; unparsed ones stay text.
pub fn write_xlsx(table: &CleanedTable, path: &Path) -> Result<(), TallyError> {
    let mut workbook = new_workbook()?;

    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format(AMOUNT_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    write_header(worksheet, &Column::ALL.map(|c| c.title()), &header_format)?;

    for (i, record) in table.records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &record.date)?;
        worksheet.write_string(row, 1, &record.description)?;
        for (col, column) in Column::ALL.iter().enumerate().skip(2) {
            if let Some(amount) = record.amount(*column) {
                write_amount(worksheet, row, col as u16, amount, &amount_format)?;
            }
        }
    }

    worksheet.set_column_width(0, 14)?;
    worksheet.set_column_width(1, 48)?;
    for col in 2..Column::ALL.len() as u16 {
        worksheet.set_column_width(col, 14)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_amount(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    amount: &Amount,
    format: &Format,
) -> Result<(), TallyError> {
    match amount {
        Amount::Parsed(value) => match value.to_f64() {
            Some(number) => {
                worksheet.write_number_with_format(row, col, number, format)?;
            }
            None => {
                worksheet.write_string(row, col, value.to_string())?;
            }
        },
        Amount::Unparsed(text) => {
            worksheet.write_string(row, col, text)?;
        }
    }
    Ok(())
}

fn write_decimal(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Decimal,
    format: &Format,
) -> Result<(), TallyError> {
    write_amount(worksheet, row, col, &Amount::Parsed(value), format)
}

/// Write the multi-sheet summary workbook behind `tally summarize --report`.
///
/// Sheets: every transaction with its category and period, the monthly
/// summary, the category summary and both merchant rankings.
pub fn write_analysis_report(
    report: &AnalysisReport,
    statements: &[StatementTransactions],
    set: &CategorySetDef,
    path: &Path,
) -> Result<(), TallyError> {
    let mut workbook = new_workbook()?;
    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format(AMOUNT_FORMAT);

    let sheet = workbook.add_worksheet();
    sheet.set_name(ALL_TRANSACTIONS_SHEET)?;
    write_header(
        sheet,
        &["Date", "Description", "Category", "Withdrawal", "Deposit", "Balance", "Year", "Month", "Source_File"],
        &header_format,
    )?;
    let mut row = 1u32;
    for statement in statements {
        for record in statement.records.iter().filter(|r| !is_balance_row(r)) {
            sheet.write_string(row, 0, &record.date)?;
            sheet.write_string(row, 1, &record.description)?;
            sheet.write_string(row, 2, categorize(&record.description, set))?;
            for (col, column) in [(3, Column::Withdrawal), (4, Column::Deposit), (5, Column::Balance)] {
                if let Some(amount) = record.amount(column) {
                    write_amount(sheet, row, col, amount, &amount_format)?;
                }
            }
            if let Some(period) = statement.period {
                sheet.write_number(row, 6, period.year)?;
                sheet.write_number(row, 7, period.month)?;
            }
            sheet.write_string(row, 8, &statement.source)?;
            row += 1;
        }
    }
    sheet.set_column_width(1, 48)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name(MONTHLY_SHEET)?;
    let mut titles: Vec<String> = [
        "Year",
        "Month",
        "Month_Name",
        "Total_Withdrawals",
        "Total_Deposits",
        "Net_Cash_Flow",
        "Number_of_Transactions",
        "Days_with_Spending",
        "Avg_Daily_Spending",
    ]
    .map(String::from)
    .to_vec();
    if let Some(first) = report.monthly.first() {
        titles.extend(first.categories.iter().map(|c| format!("Category_{}", c.category)));
    }
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    write_header(sheet, &titles, &header_format)?;
    for (i, month) in report.monthly.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, month.year)?;
        sheet.write_number(row, 1, month.month)?;
        sheet.write_string(row, 2, &month.month_name)?;
        write_decimal(sheet, row, 3, month.total_withdrawals, &amount_format)?;
        write_decimal(sheet, row, 4, month.total_deposits, &amount_format)?;
        write_decimal(sheet, row, 5, month.net_cash_flow, &amount_format)?;
        sheet.write_number(row, 6, month.transactions as f64)?;
        sheet.write_number(row, 7, month.days_with_spending as f64)?;
        write_decimal(sheet, row, 8, month.avg_daily_spending, &amount_format)?;
        for (j, category) in month.categories.iter().enumerate() {
            write_decimal(sheet, row, 9 + j as u16, category.withdrawals, &amount_format)?;
        }
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(CATEGORY_SHEET)?;
    write_header(
        sheet,
        &["Category", "Total_Spending", "Number_of_Transactions", "Avg_Transaction_Amount", "Percentage_of_Total"],
        &header_format,
    )?;
    for (i, category) in report.categories.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &category.category)?;
        write_decimal(sheet, row, 1, category.total_withdrawals, &amount_format)?;
        sheet.write_number(row, 2, category.transactions as f64)?;
        write_decimal(sheet, row, 3, category.average_withdrawal, &amount_format)?;
        write_decimal(sheet, row, 4, category.percentage_of_total, &amount_format)?;
    }
    sheet.set_column_width(0, 20)?;

    write_merchant_sheet(&mut workbook, TOP_SPENDING_SHEET, &report.top_by_spending, &header_format, &amount_format)?;
    write_merchant_sheet(&mut workbook, TOP_FREQUENCY_SHEET, &report.top_by_frequency, &header_format, &amount_format)?;

    workbook.save(path)?;
    Ok(())
}

fn write_merchant_sheet(
    workbook: &mut Workbook,
    name: &str,
    merchants: &[MerchantSummary],
    header_format: &Format,
    amount_format: &Format,
) -> Result<(), TallyError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;
    write_header(
        sheet,
        &["Rank", "Merchant", "Total_Spending", "Transaction_Count", "Total_Deposits"],
        header_format,
    )?;
    for (i, merchant) in merchants.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, merchant.rank as f64)?;
        sheet.write_string(row, 1, &merchant.merchant)?;
        write_decimal(sheet, row, 2, merchant.total_spending, amount_format)?;
        sheet.write_number(row, 3, merchant.transactions as f64)?;
        write_decimal(sheet, row, 4, merchant.total_deposits, amount_format)?;
    }
    sheet.set_column_width(1, 40)?;
    Ok(())
}
