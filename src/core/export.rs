//! Spreadsheet export: summary, income and expense blocks in one quoted CSV

use super::ledger::Ledger;
use super::money::{format_currency, plain_amount, Country, Currency};
use super::record::{Expense, Income};
use super::summary::{self, Summary};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use taxtrack_derive::SheetRow;

pub const SUMMARY_MARKER: &str = "=== SUMMARY ===";
pub const INCOME_MARKER: &str = "=== INCOME ===";
pub const EXPENSES_MARKER: &str = "=== EXPENSES ===";

/// Column metadata generated by `#[derive(SheetRow)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SheetColumn {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SheetRow)]
pub struct IncomeRow {
    /// Date the income was received (YYYY-MM-DD)
    #[serde(rename = "Date")]
    pub date: String,
    /// Client name or income source
    #[serde(rename = "Source/Client")]
    pub source: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Amount in the record's currency
    #[serde(rename = "Amount")]
    pub amount: String,
    /// Tax already deducted by the payer, 0 if none
    #[serde(rename = "Tax Withheld")]
    pub tax_withheld: String,
    /// USD or GBP
    #[serde(rename = "Currency")]
    pub currency: String,
    /// Tax year the record is filed under
    #[serde(rename = "Tax Year")]
    pub tax_year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SheetRow)]
pub struct ExpenseRow {
    /// Date the expense was paid (YYYY-MM-DD)
    #[serde(rename = "Date")]
    pub date: String,
    /// Schedule C (US) or self-employment (UK) category
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Amount in the record's currency
    #[serde(rename = "Amount")]
    pub amount: String,
    /// USD or GBP
    #[serde(rename = "Currency")]
    pub currency: String,
    /// Tax year the record is filed under
    #[serde(rename = "Tax Year")]
    pub tax_year: String,
}

impl From<&Income> for IncomeRow {
    fn from(income: &Income) -> Self {
        IncomeRow {
            date: income.date.format("%Y-%m-%d").to_string(),
            source: income.source.clone(),
            description: income.description.clone(),
            amount: plain_amount(income.amount),
            tax_withheld: income
                .tax_withheld
                .map_or_else(|| "0".to_string(), plain_amount),
            currency: income.currency.to_string(),
            tax_year: income.tax_year.clone(),
        }
    }
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        ExpenseRow {
            date: expense.date.format("%Y-%m-%d").to_string(),
            category: expense.category.clone(),
            description: expense.description.clone(),
            amount: plain_amount(expense.amount),
            currency: expense.currency.to_string(),
            tax_year: expense.tax_year.clone(),
        }
    }
}

/// The three tabular blocks of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetExport {
    pub country: Country,
    pub summary: Vec<Vec<String>>,
    pub income: Vec<Vec<String>>,
    pub expenses: Vec<Vec<String>>,
}

/// Build the export blocks for a country's records. Without a tax year,
/// every record filed under the country is exported.
pub fn generate_sheets(
    ledger: &Ledger,
    country: Country,
    tax_year: Option<&str>,
    export_date: NaiveDate,
) -> SheetExport {
    let mut income = vec![IncomeRow::sheet_header()];
    income.extend(
        summary::filter(&ledger.incomes, country, tax_year).map(|i| IncomeRow::from(i).sheet_cells()),
    );

    let mut expenses = vec![ExpenseRow::sheet_header()];
    expenses.extend(
        summary::filter(&ledger.expenses, country, tax_year)
            .map(|e| ExpenseRow::from(e).sheet_cells()),
    );

    let summary = summary_rows(
        &summary::summarize(ledger, country, tax_year),
        export_date,
    );

    SheetExport {
        country,
        summary,
        income,
        expenses,
    }
}

fn summary_rows(summary: &Summary, export_date: NaiveDate) -> Vec<Vec<String>> {
    let row = |label: &str, value: String| vec![label.to_string(), value];
    let mut rows = match summary {
        Summary::Us(us) => vec![
            row("Summary", "US Tax Data (Worldwide Income)".to_string()),
            row("USD Income", format_currency(us.usd.income, Currency::Usd)),
            row("GBP Income", format_currency(us.gbp.income, Currency::Gbp)),
            row("USD Expenses", format_currency(us.usd.expenses, Currency::Usd)),
            row("GBP Expenses", format_currency(us.gbp.expenses, Currency::Gbp)),
        ],
        Summary::Uk(uk) => vec![
            row("Summary", "UK Tax Data".to_string()),
            row("Total Income", format_currency(uk.totals.income, Currency::Gbp)),
            row("Total Expenses", format_currency(uk.totals.expenses, Currency::Gbp)),
            row("Net Income", format_currency(uk.net_income, Currency::Gbp)),
        ],
    };
    rows.push(row("Export Date", export_date.format("%Y-%m-%d").to_string()));
    rows
}

impl SheetExport {
    /// All blocks concatenated under their section markers
    pub fn combined(&self) -> Vec<Vec<String>> {
        let marker = |m: &str| vec![m.to_string()];
        let blank = || vec![String::new()];

        let mut rows = vec![marker(SUMMARY_MARKER)];
        rows.extend(self.summary.iter().cloned());
        rows.push(blank());
        rows.push(marker(INCOME_MARKER));
        rows.extend(self.income.iter().cloned());
        rows.push(blank());
        rows.push(marker(EXPENSES_MARKER));
        rows.extend(self.expenses.iter().cloned());
        rows
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        crate::utils::write_quoted_csv(self.combined(), writer)
    }

    pub fn to_csv(&self) -> anyhow::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }
}

/// `{COUNTRY}_tax_data_{YYYY-MM-DD}.csv`
pub fn export_filename(country: Country, date: NaiveDate) -> String {
    format!("{}_tax_data_{}.csv", country.code(), date.format("%Y-%m-%d"))
}
