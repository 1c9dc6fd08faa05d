//! The persisted tracker state: records plus the selected tax years

use crate::core::{Country, Expense, Income, Ledger, TaxYear, YearSelection};
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const INCOMES_KEY: &str = "tax-incomes";
pub const EXPENSES_KEY: &str = "tax-expenses";
pub const SELECTED_US_YEAR_KEY: &str = "selected-tax-year-us";
pub const SELECTED_UK_YEAR_KEY: &str = "selected-tax-year-uk";

/// Layout of the data file, one entry per store key
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StoreDocument {
    #[serde(rename = "tax-incomes", default)]
    pub incomes: Vec<Income>,
    #[serde(rename = "tax-expenses", default)]
    pub expenses: Vec<Expense>,
    /// Selected US tax year, e.g. "2024"
    #[serde(rename = "selected-tax-year-us")]
    pub selected_us: Option<String>,
    /// Selected UK tax year, e.g. "2024-25"
    #[serde(rename = "selected-tax-year-uk")]
    pub selected_uk: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxBook {
    pub ledger: Ledger,
    pub years: YearSelection,
}

impl TaxBook {
    /// Load the book from a store. Missing keys fall back to an empty ledger
    /// and the tax years `today` falls into.
    pub fn load<S: KeyValueStore>(store: &S, today: NaiveDate) -> anyhow::Result<Self> {
        let current = YearSelection::current(today);
        let incomes = store.load(INCOMES_KEY, Vec::new())?;
        let expenses = store.load(EXPENSES_KEY, Vec::new())?;
        let years = YearSelection {
            us: store.load(SELECTED_US_YEAR_KEY, current.us)?,
            uk: store.load(SELECTED_UK_YEAR_KEY, current.uk)?,
        };
        Ok(TaxBook {
            ledger: Ledger::new(incomes, expenses),
            years,
        })
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> anyhow::Result<()> {
        store.save(INCOMES_KEY, &self.ledger.incomes)?;
        store.save(EXPENSES_KEY, &self.ledger.expenses)?;
        store.save(SELECTED_US_YEAR_KEY, &self.years.us)?;
        store.save(SELECTED_UK_YEAR_KEY, &self.years.uk)?;
        Ok(())
    }

    /// Change a country's selected tax year. The label must parse for the country.
    pub fn select_year(&mut self, country: Country, label: &str) -> anyhow::Result<TaxYear> {
        let year = TaxYear::parse(country, label)?;
        log::info!("Selected {} tax year {}", country, year);
        self.years.set(country, year.year.clone());
        Ok(year)
    }
}
