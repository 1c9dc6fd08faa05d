//! Validate command - surface records that break the ledger invariants

use super::{CountryArg, Session};
use crate::core::{Country, RecordIssue};
use clap::Args;
use serde::Serialize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Only check records filed under this country
    #[arg(short, long, value_enum, ignore_case = true)]
    country: Option<CountryArg>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput<'a> {
    records_checked: usize,
    issue_count: usize,
    issues: &'a [RecordIssue],
}

impl ValidateCommand {
    pub fn exec(&self, data: &Path) -> anyhow::Result<()> {
        let session = Session::open(data)?;
        let ledger = &session.book.ledger;
        let country = self.country.map(Country::from);

        let issues: Vec<RecordIssue> = ledger
            .issues()
            .into_iter()
            .filter(|issue| country.is_none_or(|c| issue.country == c))
            .collect();
        let records_checked = ledger
            .incomes
            .iter()
            .map(|i| i.country)
            .chain(ledger.expenses.iter().map(|e| e.country))
            .filter(|c| country.is_none_or(|country| *c == country))
            .count();

        if self.json {
            let output = ValidationOutput {
                records_checked,
                issue_count: issues.len(),
                issues: &issues,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_text(&issues, records_checked, country);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }
}

fn print_text(issues: &[RecordIssue], records_checked: usize, country: Option<Country>) {
    let scope = country.map_or("ALL COUNTRIES".to_string(), |c| c.to_string());

    println!();
    println!("VALIDATION RESULTS ({}, {} records)", scope, records_checked);
    println!();

    if issues.is_empty() {
        println!("\u{2713} No issues found.");
        return;
    }

    println!("\u{26A0} {} issue(s) found:", issues.len());
    println!();
    for (i, issue) in issues.iter().enumerate() {
        println!(
            "  {}. [{}] {} {} {}",
            i + 1,
            issue.country,
            issue.date,
            issue.kind,
            issue.id
        );
        println!("     {}", issue.warning.message());
        println!();
    }
}
