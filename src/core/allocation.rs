//! Allocation of unified-entry transactions to jurisdictions.
//!
//! The US taxes worldwide income, so every transaction is filed there. The UK
//! filing only carries GBP transactions, so a GBP transaction is filed under
//! both countries while a USD transaction is filed under the US alone.

use super::money::{Country, Currency};
use super::record::{Expense, ExpenseDraft, Income, IncomeDraft};
use super::tax_year::current_tax_year;
use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The tax year currently selected for each country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct YearSelection {
    pub us: String,
    pub uk: String,
}

impl YearSelection {
    /// Select the tax years that `today` falls into
    pub fn current(today: NaiveDate) -> Self {
        YearSelection {
            us: current_tax_year(Country::Us, today),
            uk: current_tax_year(Country::Uk, today),
        }
    }

    pub fn get(&self, country: Country) -> &str {
        match country {
            Country::Us => &self.us,
            Country::Uk => &self.uk,
        }
    }

    pub fn set(&mut self, country: Country, year: impl Into<String>) {
        match country {
            Country::Us => self.us = year.into(),
            Country::Uk => self.uk = year.into(),
        }
    }
}

/// Countries a transaction in `currency` is filed under, UK first
pub fn jurisdictions(currency: Currency) -> &'static [Country] {
    match currency {
        Currency::Gbp => &[Country::Uk, Country::Us],
        Currency::Usd => &[Country::Us],
    }
}

/// Expand an income draft into one record per jurisdiction
pub fn allocate_income(
    draft: &IncomeDraft,
    years: &YearSelection,
    created_at: DateTime<Utc>,
) -> Vec<Income> {
    let incomes: Vec<_> = jurisdictions(draft.currency)
        .iter()
        .map(|&country| Income::from_draft(draft.clone(), country, years.get(country), created_at))
        .collect();
    log::debug!(
        "Allocated {} income {} to {}",
        draft.currency,
        draft.amount,
        describe(&incomes, |i| (i.country, i.tax_year.as_str()))
    );
    incomes
}

/// Expand an expense draft into one record per jurisdiction
pub fn allocate_expense(
    draft: &ExpenseDraft,
    years: &YearSelection,
    created_at: DateTime<Utc>,
) -> Vec<Expense> {
    let expenses: Vec<_> = jurisdictions(draft.currency)
        .iter()
        .map(|&country| {
            Expense::from_draft(draft.clone(), country, years.get(country), created_at)
        })
        .collect();
    log::debug!(
        "Allocated {} expense {} to {}",
        draft.currency,
        draft.amount,
        describe(&expenses, |e| (e.country, e.tax_year.as_str()))
    );
    expenses
}

fn describe<R>(records: &[R], key: impl Fn(&R) -> (Country, &str)) -> String {
    records
        .iter()
        .map(|r| {
            let (country, year) = key(r);
            format!("{country} {year}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}
