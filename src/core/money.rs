use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency a transaction is denominated in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Gbp,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Gbp => "£",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Jurisdiction a record is filed under
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Us,
    Uk,
}

impl Country {
    pub fn code(self) -> &'static str {
        match self {
            Country::Us => "US",
            Country::Uk => "UK",
        }
    }

    /// Whether records in `currency` may be filed under this country.
    ///
    /// The US taxes worldwide income; the UK filing only carries GBP.
    pub fn accepts(self, currency: Currency) -> bool {
        match self {
            Country::Us => true,
            Country::Uk => currency == Currency::Gbp,
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Format an amount as a currency string, e.g. `$1,234.56` or `-£50.00`
pub fn format_currency(amount: Decimal, currency: Currency) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!(
        "{sign}{}{}.{fraction}",
        currency.symbol(),
        group_thousands(whole)
    )
}

/// Plain number without trailing zeros, as used in export detail rows
pub fn plain_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_with_symbol_and_two_decimals() {
        assert_eq!(format_currency(dec!(700), Currency::Gbp), "£700.00");
        assert_eq!(format_currency(dec!(12.5), Currency::Usd), "$12.50");
        assert_eq!(format_currency(dec!(0), Currency::Usd), "$0.00");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(dec!(1234.56), Currency::Usd), "$1,234.56");
        assert_eq!(format_currency(dec!(1234567), Currency::Gbp), "£1,234,567.00");
        assert_eq!(format_currency(dec!(100000), Currency::Gbp), "£100,000.00");
    }

    #[test]
    fn negative_amounts_lead_with_sign() {
        assert_eq!(format_currency(dec!(-50), Currency::Gbp), "-£50.00");
        assert_eq!(format_currency(dec!(-1500.5), Currency::Usd), "-$1,500.50");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(0.125), Currency::Gbp), "£0.13");
        assert_eq!(format_currency(dec!(-0.125), Currency::Gbp), "-£0.13");
        assert_eq!(format_currency(dec!(-0.001), Currency::Gbp), "£0.00");
    }

    #[test]
    fn plain_amount_drops_trailing_zeros() {
        assert_eq!(plain_amount(dec!(1000)), "1000");
        assert_eq!(plain_amount(dec!(1000.00)), "1000");
        assert_eq!(plain_amount(dec!(12.50)), "12.5");
    }

    #[test]
    fn uk_only_accepts_gbp() {
        assert!(Country::Uk.accepts(Currency::Gbp));
        assert!(!Country::Uk.accepts(Currency::Usd));
        assert!(Country::Us.accepts(Currency::Usd));
        assert!(Country::Us.accepts(Currency::Gbp));
    }

    #[test]
    fn serializes_as_uppercase_codes() {
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), "\"GBP\"");
        assert_eq!(serde_json::to_string(&Country::Uk).unwrap(), "\"UK\"");
        let country: Country = serde_json::from_str("\"US\"").unwrap();
        assert_eq!(country, Country::Us);
    }
}
