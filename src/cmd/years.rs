//! Tax year commands - list selectable years and change the selection

use super::{CountryArg, Session};
use crate::core::{current_tax_year, selectable_tax_years, Country};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct YearsCommand {
    /// Country whose tax years to list
    #[arg(short, long, value_enum, ignore_case = true)]
    country: CountryArg,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled, Serialize)]
struct YearRow {
    #[tabled(rename = "Tax Year")]
    year: String,
    #[tabled(rename = "Start")]
    start_date: String,
    #[tabled(rename = "End")]
    end_date: String,
    #[tabled(rename = "")]
    status: String,
}

impl YearsCommand {
    pub fn exec(&self, data: &Path) -> anyhow::Result<()> {
        let session = Session::open(data)?;
        let country: Country = self.country.into();
        let years = selectable_tax_years(country, session.today);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&years)?);
            return Ok(());
        }

        let current = current_tax_year(country, session.today);
        let selected = session.book.years.get(country);
        let rows: Vec<_> = years
            .into_iter()
            .map(|y| {
                let mut status = Vec::new();
                if y.year == current {
                    status.push("current");
                }
                if y.year == selected {
                    status.push("selected");
                }
                YearRow {
                    status: status.join(", "),
                    start_date: y.start_date.format("%Y-%m-%d").to_string(),
                    end_date: y.end_date.format("%Y-%m-%d").to_string(),
                    year: y.year,
                }
            })
            .collect();

        println!("{}", Table::new(&rows).with(Style::rounded()));
        if !rows.iter().any(|r| r.year == selected) {
            println!("Selected {} tax year: {}", country, selected);
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SelectYearCommand {
    /// Country whose selected tax year to change
    #[arg(short, long, value_enum, ignore_case = true)]
    country: CountryArg,

    /// Tax year label (e.g. 2024 for US, 2024-25 for UK)
    year: String,
}

impl SelectYearCommand {
    pub fn exec(&self, data: &Path) -> anyhow::Result<()> {
        let mut session = Session::open(data)?;
        let country: Country = self.country.into();
        let year = session.book.select_year(country, &self.year)?;

        if !selectable_tax_years(country, session.today).contains(&year) {
            log::warn!(
                "{} tax year {} is outside the usual selection range",
                country,
                year
            );
        }
        session.commit()?;

        println!(
            "Selected {} tax year {} ({} to {})",
            country, year, year.start_date, year.end_date
        );
        Ok(())
    }
}
