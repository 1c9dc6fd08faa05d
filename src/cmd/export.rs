//! Export command - write a country's records as a spreadsheet-friendly CSV

use super::{CountryArg, Session};
use crate::core::{export_filename, generate_sheets, Country, TaxYear};
use anyhow::Context;
use clap::Args;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Country whose records to export
    #[arg(short, long, value_enum, ignore_case = true)]
    country: CountryArg,

    /// Only export this tax year (default: every year)
    #[arg(short, long)]
    year: Option<String>,

    /// Directory to write the export file to
    #[arg(short, long, default_value = ".", conflicts_with = "stdout")]
    output: PathBuf,

    /// Write the CSV to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Open the written file with the default application
    #[arg(long, conflicts_with = "stdout")]
    open: bool,
}

impl ExportCommand {
    pub fn exec(&self, data: &Path) -> anyhow::Result<()> {
        let session = Session::open(data)?;
        let country: Country = self.country.into();
        let tax_year = self
            .year
            .as_deref()
            .map(|label| TaxYear::parse(country, label).map(|y| y.year))
            .transpose()?;

        let export = generate_sheets(
            &session.book.ledger,
            country,
            tax_year.as_deref(),
            session.today,
        );

        if self.stdout {
            return export.write_csv(io::stdout().lock());
        }

        let path = self.output.join(export_filename(export.country, session.today));
        fs::write(&path, export.to_csv()?)
            .with_context(|| format!("Failed to write export file {}", path.display()))?;
        log::info!("Wrote {}", path.display());
        println!(
            "Exported {} income and {} expense record(s) to {}",
            export.income.len() - 1,
            export.expenses.len() - 1,
            path.display()
        );

        if self.open {
            opener::open(&path)?;
        }
        Ok(())
    }
}
