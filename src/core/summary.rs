//! Per-country totals for a tax year

use super::ledger::Ledger;
use super::money::{Country, Currency};
use super::record::{Expense, Income, Record};
use rust_decimal::Decimal;
use serde::Serialize;

/// Income and expense totals in a single currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub tax_withheld: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
}

impl Totals {
    pub fn net(&self) -> Decimal {
        self.income.saturating_sub(self.expenses)
    }

    fn collect<'a>(
        incomes: impl Iterator<Item = &'a Income>,
        expenses: impl Iterator<Item = &'a Expense>,
    ) -> Self {
        let mut totals = Totals::default();
        for income in incomes {
            totals.income = totals.income.saturating_add(income.amount());
            totals.tax_withheld = totals
                .tax_withheld
                .saturating_add(income.tax_withheld().unwrap_or(Decimal::ZERO));
            totals.income_count += 1;
        }
        for expense in expenses {
            totals.expenses = totals.expenses.saturating_add(expense.amount());
            totals.expense_count += 1;
        }
        totals
    }
}

/// US totals, kept apart per currency since nothing is converted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsSummary {
    pub tax_year: Option<String>,
    pub usd: Totals,
    pub gbp: Totals,
}

impl UsSummary {
    pub fn totals(&self, currency: Currency) -> &Totals {
        match currency {
            Currency::Usd => &self.usd,
            Currency::Gbp => &self.gbp,
        }
    }
}

/// UK totals, all in GBP
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UkSummary {
    pub tax_year: Option<String>,
    pub totals: Totals,
    pub net_income: Decimal,
    /// UK records left out because they are not in GBP
    pub excluded: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "country")]
pub enum Summary {
    #[serde(rename = "US")]
    Us(UsSummary),
    #[serde(rename = "UK")]
    Uk(UkSummary),
}

impl Summary {
    pub fn country(&self) -> Country {
        match self {
            Summary::Us(_) => Country::Us,
            Summary::Uk(_) => Country::Uk,
        }
    }
}

/// Records filed under `country`, optionally limited to one tax year
pub fn filter<'a, R: Record>(
    records: &'a [R],
    country: Country,
    tax_year: Option<&'a str>,
) -> impl Iterator<Item = &'a R> + Clone + 'a {
    records
        .iter()
        .filter(move |r| r.country() == country && tax_year.is_none_or(|y| r.tax_year() == y))
}

/// Summarize a country's records. With no tax year, all of the country's
/// records are included.
pub fn summarize(ledger: &Ledger, country: Country, tax_year: Option<&str>) -> Summary {
    let incomes = filter(&ledger.incomes, country, tax_year);
    let expenses = filter(&ledger.expenses, country, tax_year);
    let year = tax_year.map(str::to_string);

    match country {
        Country::Us => {
            let in_currency = |c: Currency| {
                Totals::collect(
                    incomes.clone().filter(move |i| i.currency == c),
                    expenses.clone().filter(move |e| e.currency == c),
                )
            };
            Summary::Us(UsSummary {
                tax_year: year,
                usd: in_currency(Currency::Usd),
                gbp: in_currency(Currency::Gbp),
            })
        }
        Country::Uk => {
            let excluded = incomes.clone().filter(|i| i.currency != Currency::Gbp).count()
                + expenses.clone().filter(|e| e.currency != Currency::Gbp).count();
            if excluded > 0 {
                log::warn!(
                    "{} UK record(s) not in GBP left out of UK totals; run `validate` for details",
                    excluded
                );
            }
            let totals = Totals::collect(
                incomes.filter(|i| i.currency == Currency::Gbp),
                expenses.filter(|e| e.currency == Currency::Gbp),
            );
            Summary::Uk(UkSummary {
                tax_year: year,
                net_income: totals.net(),
                totals,
                excluded,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::allocation::YearSelection;
    use crate::core::record::{ExpenseDraft, IncomeDraft};
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn years(us: &str, uk: &str) -> YearSelection {
        YearSelection {
            us: us.to_string(),
            uk: uk.to_string(),
        }
    }

    fn add_income(ledger: &mut Ledger, currency: Currency, amount: Decimal, years: &YearSelection) {
        let draft = IncomeDraft {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            amount,
            tax_withheld: Some(amount / dec!(10)),
            currency,
            source: "Client".to_string(),
            description: "Work".to_string(),
        };
        ledger.record_income(&draft, years, Utc::now());
    }

    fn add_expense(ledger: &mut Ledger, currency: Currency, amount: Decimal, years: &YearSelection) {
        let draft = ExpenseDraft {
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            amount,
            currency,
            category: "Other".to_string(),
            description: "Stuff".to_string(),
            receipt_url: None,
        };
        ledger.record_expense(&draft, years, Utc::now());
    }

    fn sample() -> Ledger {
        let y = years("2024", "2024-25");
        let mut ledger = Ledger::default();
        add_income(&mut ledger, Currency::Gbp, dec!(500), &y);
        add_income(&mut ledger, Currency::Gbp, dec!(300), &y);
        add_income(&mut ledger, Currency::Usd, dec!(2000), &y);
        add_expense(&mut ledger, Currency::Gbp, dec!(100), &y);
        add_expense(&mut ledger, Currency::Usd, dec!(250), &y);
        ledger
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let y = years("2024", "2024-25");
        let mut ledger = Ledger::default();
        add_income(&mut ledger, Currency::Gbp, Decimal::MAX, &y);
        add_income(&mut ledger, Currency::Gbp, Decimal::MAX, &y);
        add_expense(&mut ledger, Currency::Gbp, Decimal::MAX, &y);
        add_expense(&mut ledger, Currency::Gbp, Decimal::MAX, &y);

        let Summary::Uk(uk) = summarize(&ledger, Country::Uk, None) else {
            panic!("expected UK summary");
        };
        assert_eq!(uk.totals.income, Decimal::MAX);
        assert_eq!(uk.totals.expenses, Decimal::MAX);
        assert_eq!(uk.totals.income_count, 2);
        assert_eq!(uk.net_income, Decimal::ZERO);

        let Summary::Us(us) = summarize(&ledger, Country::Us, None) else {
            panic!("expected US summary");
        };
        assert_eq!(us.gbp.income, Decimal::MAX);
    }

    #[test]
    fn uk_net_is_income_minus_expenses() {
        let Summary::Uk(uk) = summarize(&sample(), Country::Uk, Some("2024-25")) else {
            panic!("expected UK summary");
        };
        assert_eq!(uk.totals.income, dec!(800));
        assert_eq!(uk.totals.expenses, dec!(100));
        assert_eq!(uk.net_income, dec!(700));
        assert_eq!(uk.net_income, uk.totals.income - uk.totals.expenses);
        assert_eq!(uk.totals.income_count, 2);
        assert_eq!(uk.excluded, 0);
    }

    #[test]
    fn us_splits_by_currency() {
        let Summary::Us(us) = summarize(&sample(), Country::Us, Some("2024")) else {
            panic!("expected US summary");
        };
        assert_eq!(us.usd.income, dec!(2000));
        assert_eq!(us.usd.expenses, dec!(250));
        assert_eq!(us.usd.tax_withheld, dec!(200));
        assert_eq!(us.gbp.income, dec!(800));
        assert_eq!(us.gbp.expenses, dec!(100));
        assert_eq!(us.totals(Currency::Gbp).net(), dec!(700));
    }

    #[test]
    fn other_years_are_excluded() {
        let mut ledger = sample();
        add_income(&mut ledger, Currency::Gbp, dec!(999), &years("2023", "2023-24"));

        let Summary::Uk(uk) = summarize(&ledger, Country::Uk, Some("2024-25")) else {
            panic!("expected UK summary");
        };
        assert_eq!(uk.totals.income, dec!(800));

        let Summary::Uk(all) = summarize(&ledger, Country::Uk, None) else {
            panic!("expected UK summary");
        };
        assert_eq!(all.totals.income, dec!(1799));
        assert_eq!(all.tax_year, None);
    }

    #[test]
    fn empty_ledger_summarizes_to_zero() {
        let summary = summarize(&Ledger::default(), Country::Us, Some("2024"));
        let Summary::Us(us) = summary else {
            panic!("expected US summary");
        };
        assert_eq!(us.usd, Totals::default());
        assert_eq!(us.gbp, Totals::default());
    }

    #[test]
    fn non_gbp_uk_records_are_left_out() {
        let mut ledger = sample();
        ledger.incomes[0].currency = Currency::Usd;

        let Summary::Uk(uk) = summarize(&ledger, Country::Uk, Some("2024-25")) else {
            panic!("expected UK summary");
        };
        assert_eq!(uk.excluded, 1);
        assert_eq!(uk.totals.income, dec!(300));
        assert_eq!(uk.net_income, dec!(200));
    }

    #[test]
    fn summary_serializes_with_country_tag() {
        let summary = summarize(&sample(), Country::Uk, Some("2024-25"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["country"], "UK");
        assert_eq!(json["tax_year"], "2024-25");
        assert_eq!(summary.country(), Country::Uk);
    }
}
