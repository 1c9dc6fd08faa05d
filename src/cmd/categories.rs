use super::{CountryArg, CurrencyArg};
use crate::core::{categories, Country, Currency};
use clap::Args;

#[derive(Args, Debug)]
pub struct CategoriesCommand {
    /// Currency of the expense; picks the category list used on unified entry
    #[arg(short, long, value_enum, ignore_case = true, default_value_t)]
    currency: CurrencyArg,

    /// Show the list for a country's own expense form instead
    #[arg(long, value_enum, ignore_case = true)]
    country: Option<CountryArg>,
}

impl CategoriesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let list = match self.country {
            Some(country) => categories::for_country(Country::from(country)),
            None => categories::for_currency(Currency::from(self.currency)),
        };
        for category in list {
            println!("{}", category);
        }
        Ok(())
    }
}
