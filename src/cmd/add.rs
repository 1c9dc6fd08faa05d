//! Add commands - record income and expenses, allocating by currency

use super::{CountryArg, CurrencyArg, Session};
use crate::core::{categories, format_currency, ExpenseDraft, IncomeDraft};
use chrono::{NaiveDate, Utc};
use clap::Args;
use rust_decimal::Decimal;
use std::path::Path;

#[derive(Args, Debug)]
pub struct AddIncomeCommand {
    /// Amount received
    #[arg(short, long)]
    amount: Decimal,

    /// Currency of the payment. GBP is filed in the UK and the US, USD in the US only
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = CurrencyArg::Gbp)]
    currency: CurrencyArg,

    /// Client name or income source
    #[arg(short, long)]
    source: String,

    /// What the payment was for
    #[arg(short, long)]
    description: String,

    /// Date received (YYYY-MM-DD). Defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Tax already deducted by the payer
    #[arg(short = 'w', long)]
    tax_withheld: Option<Decimal>,

    /// File under this country only instead of allocating by currency
    #[arg(long, value_enum, ignore_case = true)]
    country: Option<CountryArg>,
}

impl AddIncomeCommand {
    pub fn exec(&self, data: &Path) -> anyhow::Result<()> {
        let mut session = Session::open(data)?;
        let draft = IncomeDraft {
            date: self.date.unwrap_or(session.today),
            amount: self.amount,
            tax_withheld: self.tax_withheld,
            currency: self.currency.into(),
            source: self.source.clone(),
            description: self.description.clone(),
        }
        .validate()?;

        let book = &mut session.book;
        let added = match self.country {
            Some(country) => vec![book
                .ledger
                .add_income(draft, country.into(), &book.years, Utc::now())?
                .clone()],
            None => book.ledger.record_income(&draft, &book.years, Utc::now()).to_vec(),
        };
        session.commit()?;

        for income in &added {
            println!(
                "Added income {} of {} to {} {}",
                income.id,
                format_currency(income.amount, income.currency),
                income.country,
                income.tax_year
            );
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddExpenseCommand {
    /// Amount paid
    #[arg(short, long)]
    amount: Decimal,

    /// Currency of the payment. GBP is filed in the UK and the US, USD in the US only
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = CurrencyArg::Gbp)]
    currency: CurrencyArg,

    /// Expense category (see `categories`)
    #[arg(short = 'k', long)]
    category: String,

    /// What the expense was for
    #[arg(short, long)]
    description: String,

    /// Date paid (YYYY-MM-DD). Defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Link to a copy of the receipt
    #[arg(long)]
    receipt_url: Option<String>,

    /// File under this country only instead of allocating by currency
    #[arg(long, value_enum, ignore_case = true)]
    country: Option<CountryArg>,
}

impl AddExpenseCommand {
    pub fn exec(&self, data: &Path) -> anyhow::Result<()> {
        let mut session = Session::open(data)?;
        let currency = self.currency.into();
        let allowed = match self.country {
            Some(country) => categories::for_country(country.into()),
            None => categories::for_currency(currency),
        };
        let draft = ExpenseDraft {
            date: self.date.unwrap_or(session.today),
            amount: self.amount,
            currency,
            category: categories::resolve(allowed, &self.category)?.to_string(),
            description: self.description.clone(),
            receipt_url: self.receipt_url.clone(),
        }
        .validate()?;

        let book = &mut session.book;
        let added = match self.country {
            Some(country) => vec![book
                .ledger
                .add_expense(draft, country.into(), &book.years, Utc::now())?
                .clone()],
            None => book.ledger.record_expense(&draft, &book.years, Utc::now()).to_vec(),
        };
        session.commit()?;

        for expense in &added {
            println!(
                "Added expense {} of {} to {} {}",
                expense.id,
                format_currency(expense.amount, expense.currency),
                expense.country,
                expense.tax_year
            );
        }
        Ok(())
    }
}
