use super::allocation::{allocate_expense, allocate_income, YearSelection};
use super::money::{Country, Currency};
use super::record::{Expense, ExpenseDraft, Income, IncomeDraft, Record, RecordKind};
use super::warnings::{self, RecordIssue};
use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no {kind} with id {id}")]
    NotFound { kind: RecordKind, id: String },
    #[error("{country} records must not be in {currency}")]
    CurrencyNotAccepted { country: Country, currency: Currency },
}

/// Every stored income and expense, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new(incomes: Vec<Income>, expenses: Vec<Expense>) -> Self {
        Ledger { incomes, expenses }
    }

    /// Unified entry: allocate the draft by currency and append the records
    pub fn record_income(
        &mut self,
        draft: &IncomeDraft,
        years: &YearSelection,
        now: DateTime<Utc>,
    ) -> &[Income] {
        let start = self.incomes.len();
        self.incomes.extend(allocate_income(draft, years, now));
        &self.incomes[start..]
    }

    /// Unified entry: allocate the draft by currency and append the records
    pub fn record_expense(
        &mut self,
        draft: &ExpenseDraft,
        years: &YearSelection,
        now: DateTime<Utc>,
    ) -> &[Expense] {
        let start = self.expenses.len();
        self.expenses.extend(allocate_expense(draft, years, now));
        &self.expenses[start..]
    }

    /// Direct entry: file a single income under one country's selected year
    pub fn add_income(
        &mut self,
        draft: IncomeDraft,
        country: Country,
        years: &YearSelection,
        now: DateTime<Utc>,
    ) -> Result<&Income, LedgerError> {
        ensure_accepted(country, draft.currency)?;
        let income = Income::from_draft(draft, country, years.get(country), now);
        log::debug!("Added income {} to {} {}", income.id, country, income.tax_year);
        self.incomes.push(income);
        Ok(&self.incomes[self.incomes.len() - 1])
    }

    /// Direct entry: file a single expense under one country's selected year
    pub fn add_expense(
        &mut self,
        draft: ExpenseDraft,
        country: Country,
        years: &YearSelection,
        now: DateTime<Utc>,
    ) -> Result<&Expense, LedgerError> {
        ensure_accepted(country, draft.currency)?;
        let expense = Expense::from_draft(draft, country, years.get(country), now);
        log::debug!("Added expense {} to {} {}", expense.id, country, expense.tax_year);
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    pub fn income(&self, id: &str) -> Option<&Income> {
        self.incomes.iter().find(|i| i.id == id)
    }

    pub fn expense(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Replace the editable fields of an income. The id, country and tax
    /// year of the stored record are kept.
    pub fn edit_income(&mut self, id: &str, draft: IncomeDraft) -> Result<&Income, LedgerError> {
        let income = find_mut(&mut self.incomes, id)?;
        ensure_accepted(income.country, draft.currency)?;
        income.apply(draft);
        log::debug!("Edited income {}", id);
        Ok(income)
    }

    /// Replace the editable fields of an expense. The id, country and tax
    /// year of the stored record are kept.
    pub fn edit_expense(
        &mut self,
        id: &str,
        draft: ExpenseDraft,
    ) -> Result<&Expense, LedgerError> {
        let expense = find_mut(&mut self.expenses, id)?;
        ensure_accepted(expense.country, draft.currency)?;
        expense.apply(draft);
        log::debug!("Edited expense {}", id);
        Ok(expense)
    }

    pub fn delete_income(&mut self, id: &str) -> Result<Income, LedgerError> {
        remove(&mut self.incomes, id)
    }

    pub fn delete_expense(&mut self, id: &str) -> Result<Expense, LedgerError> {
        remove(&mut self.expenses, id)
    }

    /// Invariant violations across all stored records
    pub fn issues(&self) -> Vec<RecordIssue> {
        let mut issues = warnings::check_all(&self.incomes);
        issues.extend(warnings::check_all(&self.expenses));
        issues
    }
}

fn ensure_accepted(country: Country, currency: Currency) -> Result<(), LedgerError> {
    if country.accepts(currency) {
        Ok(())
    } else {
        Err(LedgerError::CurrencyNotAccepted { country, currency })
    }
}

fn find_mut<'a, R: Record>(records: &'a mut [R], id: &str) -> Result<&'a mut R, LedgerError> {
    records
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or_else(|| LedgerError::NotFound {
            kind: R::KIND,
            id: id.to_string(),
        })
}

fn remove<R: Record>(records: &mut Vec<R>, id: &str) -> Result<R, LedgerError> {
    let index = records
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| LedgerError::NotFound {
            kind: R::KIND,
            id: id.to_string(),
        })?;
    log::debug!("Deleted {} {}", R::KIND, id);
    Ok(records.remove(index))
}
