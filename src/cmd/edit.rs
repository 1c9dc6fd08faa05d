//! Edit commands - replace the editable fields of a stored record

use super::{CurrencyArg, Session};
use crate::core::{categories, format_currency, LedgerError, RecordKind};
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use std::path::Path;

#[derive(Args, Debug)]
pub struct EditIncomeCommand {
    /// Id of the income to edit
    id: String,

    #[arg(short, long)]
    amount: Option<Decimal>,

    #[arg(short, long, value_enum, ignore_case = true)]
    currency: Option<CurrencyArg>,

    #[arg(short, long)]
    source: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    /// Date received (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Tax already deducted by the payer
    #[arg(short = 'w', long, conflicts_with = "clear_tax_withheld")]
    tax_withheld: Option<Decimal>,

    /// Remove the tax withheld amount
    #[arg(long)]
    clear_tax_withheld: bool,
}

impl EditIncomeCommand {
    pub fn exec(&self, data: &Path) -> anyhow::Result<()> {
        let mut session = Session::open(data)?;
        let ledger = &mut session.book.ledger;

        let mut draft = ledger
            .income(&self.id)
            .map(|income| income.draft())
            .ok_or_else(|| LedgerError::NotFound {
                kind: RecordKind::Income,
                id: self.id.clone(),
            })?;
        if let Some(amount) = self.amount {
            draft.amount = amount;
        }
        if let Some(currency) = self.currency {
            draft.currency = currency.into();
        }
        if let Some(source) = &self.source {
            draft.source = source.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(date) = self.date {
            draft.date = date;
        }
        if self.clear_tax_withheld {
            draft.tax_withheld = None;
        } else if self.tax_withheld.is_some() {
            draft.tax_withheld = self.tax_withheld;
        }

        let income = ledger.edit_income(&self.id, draft.validate()?)?.clone();
        session.commit()?;

        println!(
            "Updated income {} ({} {}): {} from {}",
            income.id,
            income.country,
            income.tax_year,
            format_currency(income.amount, income.currency),
            income.source
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct EditExpenseCommand {
    /// Id of the expense to edit
    id: String,

    #[arg(short, long)]
    amount: Option<Decimal>,

    #[arg(short, long, value_enum, ignore_case = true)]
    currency: Option<CurrencyArg>,

    /// Expense category for the record's currency (see `categories`)
    #[arg(short = 'k', long)]
    category: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    /// Date paid (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Link to a copy of the receipt
    #[arg(long, conflicts_with = "clear_receipt_url")]
    receipt_url: Option<String>,

    /// Remove the receipt link
    #[arg(long)]
    clear_receipt_url: bool,
}

impl EditExpenseCommand {
    pub fn exec(&self, data: &Path) -> anyhow::Result<()> {
        let mut session = Session::open(data)?;
        let ledger = &mut session.book.ledger;

        let mut draft = ledger
            .expense(&self.id)
            .map(|expense| expense.draft())
            .ok_or_else(|| LedgerError::NotFound {
                kind: RecordKind::Expense,
                id: self.id.clone(),
            })?;

        if let Some(amount) = self.amount {
            draft.amount = amount;
        }
        if let Some(currency) = self.currency {
            draft.currency = currency.into();
        }
        if let Some(category) = &self.category {
            let allowed = categories::for_currency(draft.currency);
            draft.category = categories::resolve(allowed, category)?.to_string();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(date) = self.date {
            draft.date = date;
        }
        if self.clear_receipt_url {
            draft.receipt_url = None;
        } else if self.receipt_url.is_some() {
            draft.receipt_url = self.receipt_url.clone();
        }

        let expense = ledger.edit_expense(&self.id, draft.validate()?)?.clone();
        session.commit()?;

        println!(
            "Updated expense {} ({} {}): {} for {}",
            expense.id,
            expense.country,
            expense.tax_year,
            format_currency(expense.amount, expense.currency),
            expense.category
        );
        Ok(())
    }
}
