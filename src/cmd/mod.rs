pub mod add;
pub mod categories;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod schema;
pub mod summary;
pub mod validate;
pub mod years;

use crate::book::TaxBook;
use crate::core::{Country, Currency, TaxYear, YearSelection};
use crate::store::JsonFileStore;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use std::path::Path;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CountryArg {
    Us,
    Uk,
}

impl From<CountryArg> for Country {
    fn from(arg: CountryArg) -> Self {
        match arg {
            CountryArg::Us => Country::Us,
            CountryArg::Uk => Country::Uk,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CurrencyArg {
    Usd,
    #[default]
    Gbp,
}

impl From<CurrencyArg> for Currency {
    fn from(arg: CurrencyArg) -> Self {
        match arg {
            CurrencyArg::Usd => Currency::Usd,
            CurrencyArg::Gbp => Currency::Gbp,
        }
    }
}

/// Tax year selection shared by the read commands
#[derive(Args, Debug)]
pub struct YearArgs {
    /// Tax year to show (e.g. 2024 for US, 2024-25 for UK). Defaults to the selected year
    #[arg(short, long)]
    year: Option<String>,

    /// Include every tax year
    #[arg(long, conflicts_with = "year")]
    all_years: bool,
}

impl YearArgs {
    /// The tax year label to filter on, or `None` for all years
    pub fn resolve(&self, country: Country, selected: &YearSelection) -> anyhow::Result<Option<String>> {
        if self.all_years {
            return Ok(None);
        }
        let label = self.year.as_deref().unwrap_or(selected.get(country));
        Ok(Some(TaxYear::parse(country, label)?.year))
    }
}

/// The loaded book together with the store it came from
pub struct Session {
    store: JsonFileStore,
    pub book: TaxBook,
    pub today: NaiveDate,
}

impl Session {
    pub fn open(data: &Path) -> anyhow::Result<Self> {
        let today = chrono::Local::now().date_naive();
        let store = JsonFileStore::open(data)?;
        let book = TaxBook::load(&store, today)?;
        log::debug!(
            "Loaded {} incomes and {} expenses from {}",
            book.ledger.incomes.len(),
            book.ledger.expenses.len(),
            store.path().display()
        );
        Ok(Session { store, book, today })
    }

    /// Write the book back to the data file
    pub fn commit(mut self) -> anyhow::Result<()> {
        self.book.save(&mut self.store)?;
        self.store.flush()
    }
}

/// Label for the year filter in report headings
pub fn year_heading(year: Option<&str>) -> String {
    year.map_or("All Years".to_string(), str::to_string)
}
