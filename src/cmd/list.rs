//! List command - a country's records for a tax year, followed by its summary

use super::summary::print_summary;
use super::{year_heading, CountryArg, Session, YearArgs};
use crate::core::summary::filter;
use crate::core::{format_currency, summarize, Country, Expense, Income};
use crate::utils::write_csv;
use clap::Args;
use std::io;
use std::path::Path;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Country whose records to list
    #[arg(short, long, value_enum, ignore_case = true)]
    country: CountryArg,

    #[command(flatten)]
    year: YearArgs,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

/// Row for the records table output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
pub struct RecordRow {
    #[tabled(rename = "Type")]
    pub kind: String,

    #[tabled(rename = "Date")]
    pub date: String,

    #[tabled(rename = "Source / Category")]
    pub party: String,

    #[tabled(rename = "Description")]
    pub description: String,

    #[tabled(rename = "Amount")]
    pub amount: String,

    #[tabled(rename = "Withheld")]
    pub tax_withheld: String,

    #[tabled(rename = "Tax Year")]
    pub tax_year: String,

    #[tabled(rename = "Id")]
    pub id: String,
}

impl From<&Income> for RecordRow {
    fn from(income: &Income) -> Self {
        RecordRow {
            kind: "Income".to_string(),
            date: income.date.format("%Y-%m-%d").to_string(),
            party: income.source.clone(),
            description: income.description.clone(),
            amount: format_currency(income.amount, income.currency),
            tax_withheld: income
                .tax_withheld
                .map(|w| format_currency(w, income.currency))
                .unwrap_or_default(),
            tax_year: income.tax_year.clone(),
            id: income.id.clone(),
        }
    }
}

impl From<&Expense> for RecordRow {
    fn from(expense: &Expense) -> Self {
        RecordRow {
            kind: "Expense".to_string(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            party: expense.category.clone(),
            description: expense.description.clone(),
            amount: format_currency(expense.amount, expense.currency),
            tax_withheld: String::new(),
            tax_year: expense.tax_year.clone(),
            id: expense.id.clone(),
        }
    }
}

impl ListCommand {
    pub fn exec(&self, data: &Path) -> anyhow::Result<()> {
        let session = Session::open(data)?;
        let ledger = &session.book.ledger;
        let country: Country = self.country.into();
        let tax_year = self.year.resolve(country, &session.book.years)?;

        let rows: Vec<RecordRow> = filter(&ledger.incomes, country, tax_year.as_deref())
            .map(RecordRow::from)
            .chain(filter(&ledger.expenses, country, tax_year.as_deref()).map(RecordRow::from))
            .collect();

        if self.csv {
            return write_csv(&rows, io::stdout());
        }

        if rows.is_empty() {
            println!(
                "No {} records for {}",
                country,
                year_heading(tax_year.as_deref())
            );
        } else {
            let table = Table::new(&rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::new(4..6)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
        }

        print_summary(
            &summarize(ledger, country, tax_year.as_deref()),
            tax_year.as_deref(),
        );
        Ok(())
    }
}
