use super::money::{Country, Currency};
use super::record::DraftError;

/// US Schedule C expense categories
pub const US_EXPENSE_CATEGORIES: &[&str] = &[
    "Advertising",
    "Car and truck expenses",
    "Commissions and fees",
    "Contract labor",
    "Depreciation",
    "Employee benefit programs",
    "Insurance (other than health)",
    "Interest",
    "Legal and professional services",
    "Office expense",
    "Rent or lease",
    "Repairs and maintenance",
    "Supplies",
    "Taxes and licenses",
    "Travel and meals",
    "Utilities",
    "Wages",
    "Other expenses",
];

/// UK self-employment expense categories
pub const UK_EXPENSE_CATEGORIES: &[&str] = &[
    "Office costs (including working from home)",
    "Travel costs (business trips)",
    "Clothing expenses (uniforms, protective)",
    "Staff costs (salaries, benefits, subcontractors)",
    "Stock and raw materials",
    "Legal and financial costs",
    "Insurance",
    "Marketing and entertainment",
    "Training courses",
    "Equipment and machinery",
    "Professional fees",
    "Bank charges",
    "Other business expenses",
];

/// Categories offered for a country's own expense form
pub fn for_country(country: Country) -> &'static [&'static str] {
    match country {
        Country::Us => US_EXPENSE_CATEGORIES,
        Country::Uk => UK_EXPENSE_CATEGORIES,
    }
}

/// Categories offered on unified entry, chosen by the expense currency
pub fn for_currency(currency: Currency) -> &'static [&'static str] {
    match currency {
        Currency::Usd => US_EXPENSE_CATEGORIES,
        Currency::Gbp => UK_EXPENSE_CATEGORIES,
    }
}

/// Match user input against a category list, ignoring case.
/// Returns the canonical spelling.
pub fn resolve(
    categories: &'static [&'static str],
    input: &str,
) -> Result<&'static str, DraftError> {
    let input = input.trim();
    categories
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(input))
        .ok_or_else(|| DraftError::UnknownCategory(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_picks_category_set() {
        assert_eq!(for_currency(Currency::Gbp), UK_EXPENSE_CATEGORIES);
        assert_eq!(for_currency(Currency::Usd), US_EXPENSE_CATEGORIES);
        assert_eq!(for_country(Country::Uk), UK_EXPENSE_CATEGORIES);
    }

    #[test]
    fn resolve_ignores_case_and_whitespace() {
        assert_eq!(
            resolve(US_EXPENSE_CATEGORIES, "  office EXPENSE "),
            Ok("Office expense")
        );
    }

    #[test]
    fn resolve_rejects_other_countrys_category() {
        assert_eq!(
            resolve(UK_EXPENSE_CATEGORIES, "Office expense"),
            Err(DraftError::UnknownCategory("Office expense".to_string()))
        );
    }
}
