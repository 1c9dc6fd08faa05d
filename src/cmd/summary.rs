//! Summary command - per-country totals for a tax year

use super::{year_heading, CountryArg, Session, YearArgs};
use crate::core::{format_currency, summarize, Country, Currency, Summary, Totals};
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// Country to summarize
    #[arg(short, long, value_enum, ignore_case = true)]
    country: CountryArg,

    #[command(flatten)]
    year: YearArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl SummaryCommand {
    pub fn exec(&self, data: &Path) -> anyhow::Result<()> {
        let session = Session::open(data)?;
        let country: Country = self.country.into();
        let tax_year = self.year.resolve(country, &session.book.years)?;
        let summary = summarize(&session.book.ledger, country, tax_year.as_deref());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary, tax_year.as_deref());
        }
        Ok(())
    }
}

pub fn print_summary(summary: &Summary, year: Option<&str>) {
    let year_str = year_heading(year);

    println!();
    match summary {
        Summary::Us(us) => {
            println!("{} TAX SUMMARY ({}) - worldwide income", summary.country(), year_str);
            println!();
            for currency in [Currency::Usd, Currency::Gbp] {
                println!("{}", currency);
                print_totals(us.totals(currency), currency);
                println!();
            }
        }
        Summary::Uk(uk) => {
            println!("{} TAX SUMMARY ({})", summary.country(), year_str);
            println!();
            print_totals(&uk.totals, Currency::Gbp);
            println!(
                "  Net Income: {}",
                format_currency(uk.net_income, Currency::Gbp)
            );
            if uk.excluded > 0 {
                println!();
                println!(
                    "\u{26A0} {} record(s) not in GBP were left out. Run `validate` for details.",
                    uk.excluded
                );
            }
            println!();
        }
    }
}

fn print_totals(totals: &Totals, currency: Currency) {
    println!(
        "  Income: {} ({} record{}) | Tax Withheld: {}",
        format_currency(totals.income, currency),
        totals.income_count,
        plural(totals.income_count),
        format_currency(totals.tax_withheld, currency)
    );
    println!(
        "  Expenses: {} ({} record{})",
        format_currency(totals.expenses, currency),
        totals.expense_count,
        plural(totals.expense_count)
    );
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
