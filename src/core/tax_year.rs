use super::money::Country;
use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of selectable years offered ahead of the current calendar year
const YEARS_AHEAD: i32 = 1;
/// Number of selectable years offered before the current calendar year
const YEARS_BEHIND: i32 = 4;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaxYearError {
    #[error("invalid {country} tax year '{label}', expected {expected}")]
    InvalidLabel {
        country: Country,
        label: String,
        expected: &'static str,
    },
    #[error("UK tax year '{label}' must end in the year after it starts")]
    NonConsecutive { label: String },
}

/// A filing period for one country.
///
/// US tax years are calendar years labelled "2024". UK tax years run
/// 6 April to 5 April and are labelled by their start year, "2024-25".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct TaxYear {
    pub year: String,
    pub country: Country,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TaxYear {
    /// The tax year beginning in `start_year`
    pub fn starting(country: Country, start_year: i32) -> Self {
        match country {
            Country::Us => TaxYear {
                year: start_year.to_string(),
                country,
                start_date: ymd(start_year, 1, 1),
                end_date: ymd(start_year, 12, 31),
            },
            Country::Uk => TaxYear {
                year: format!("{}-{:02}", start_year, (start_year + 1).rem_euclid(100)),
                country,
                start_date: ymd(start_year, 4, 6),
                end_date: ymd(start_year + 1, 4, 5),
            },
        }
    }

    /// The tax year a date falls into
    pub fn for_date(country: Country, date: NaiveDate) -> Self {
        let year = date.year();
        let start_year = match country {
            Country::Us => year,
            // Before 6 April the date still belongs to the year that started last April
            Country::Uk if date < ymd(year, 4, 6) => year - 1,
            Country::Uk => year,
        };
        TaxYear::starting(country, start_year)
    }

    /// Parse a year label ("2024" for US, "2024-25" for UK)
    pub fn parse(country: Country, label: &str) -> Result<Self, TaxYearError> {
        let label = label.trim();
        let invalid = || TaxYearError::InvalidLabel {
            country,
            label: label.to_string(),
            expected: match country {
                Country::Us => "YYYY",
                Country::Uk => "YYYY-YY",
            },
        };

        let start_year = match country {
            Country::Us => parse_four_digit_year(label).ok_or_else(invalid)?,
            Country::Uk => {
                let (start, suffix) = label.split_once('-').ok_or_else(invalid)?;
                let start_year = parse_four_digit_year(start).ok_or_else(invalid)?;
                if suffix.len() != 2 || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                let suffix: i32 = suffix.parse().map_err(|_| invalid())?;
                if suffix != (start_year + 1) % 100 {
                    return Err(TaxYearError::NonConsecutive {
                        label: label.to_string(),
                    });
                }
                start_year
            }
        };

        Ok(TaxYear::starting(country, start_year))
    }

    /// Whether a date lies within this tax year (bounds inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.year)
    }
}

/// Label of the tax year that `today` falls into
pub fn current_tax_year(country: Country, today: NaiveDate) -> String {
    TaxYear::for_date(country, today).year
}

/// Selectable tax years, newest first: one year ahead of today's calendar
/// year down to four years behind it.
pub fn selectable_tax_years(country: Country, today: NaiveDate) -> Vec<TaxYear> {
    let current = today.year();
    ((current - YEARS_BEHIND)..=(current + YEARS_AHEAD))
        .rev()
        .map(|year| TaxYear::starting(country, year))
        .collect()
}

fn parse_four_digit_year(s: &str) -> Option<i32> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("tax year boundaries are valid calendar dates")
}
