use super::money::{Country, Currency};
use super::record::{Record, RecordKind};
use super::tax_year::TaxYear;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Invariant violations found in stored records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// Record is filed under a country that does not take its currency
    /// (a UK record in USD). Such records are left out of UK totals.
    CurrencyCountryMismatch { currency: Currency, country: Country },
    /// Record date lies outside the tax year it is filed under.
    DateOutsideTaxYear {
        tax_year: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    /// Tax year label does not parse for the record's country.
    InvalidTaxYear { tax_year: String },
}

impl Warning {
    pub fn message(&self) -> String {
        match self {
            Warning::CurrencyCountryMismatch { currency, country } => {
                format!("{country} records must not be in {currency}; excluded from {country} totals")
            }
            Warning::DateOutsideTaxYear {
                tax_year,
                start_date,
                end_date,
            } => format!("date is outside tax year {tax_year} ({start_date} to {end_date})"),
            Warning::InvalidTaxYear { tax_year } => {
                format!("tax year '{tax_year}' is not a valid label")
            }
        }
    }
}

/// A warning attached to the record it was raised for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecordIssue {
    pub kind: RecordKind,
    pub id: String,
    pub date: NaiveDate,
    pub country: Country,
    pub warning: Warning,
}

/// Check a single record against the ledger invariants
pub fn check<R: Record>(record: &R) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if !record.country().accepts(record.currency()) {
        warnings.push(Warning::CurrencyCountryMismatch {
            currency: record.currency(),
            country: record.country(),
        });
    }

    match TaxYear::parse(record.country(), record.tax_year()) {
        Ok(year) if !year.contains(record.date()) => {
            warnings.push(Warning::DateOutsideTaxYear {
                tax_year: year.year,
                start_date: year.start_date,
                end_date: year.end_date,
            })
        }
        Ok(_) => {}
        Err(_) => warnings.push(Warning::InvalidTaxYear {
            tax_year: record.tax_year().to_string(),
        }),
    }

    warnings
}

/// Check every record, tagging each warning with the record it came from
pub fn check_all<'a, R: Record + 'a>(
    records: impl IntoIterator<Item = &'a R>,
) -> Vec<RecordIssue> {
    records
        .into_iter()
        .flat_map(|record| {
            check(record).into_iter().map(move |warning| RecordIssue {
                kind: R::KIND,
                id: record.id().to_string(),
                date: record.date(),
                country: record.country(),
                warning,
            })
        })
        .collect()
}
