use super::money::{Country, Currency};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rejections raised while building a draft from user input
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must not be negative: {value}")]
    Negative { field: &'static str, value: Decimal },
    #[error("unknown expense category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum RecordKind {
    Income,
    Expense,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Income => f.write_str("income"),
            RecordKind::Expense => f.write_str("expense"),
        }
    }
}

/// Fields shared by stored incomes and expenses
pub trait Record {
    const KIND: RecordKind;

    fn id(&self) -> &str;
    fn date(&self) -> NaiveDate;
    fn amount(&self) -> Decimal;
    fn currency(&self) -> Currency;
    fn country(&self) -> Country;
    fn tax_year(&self) -> &str;

    fn tax_withheld(&self) -> Option<Decimal> {
        None
    }
}

/// A stored income record, filed under exactly one country and tax year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Income {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub amount: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<f64>")]
    pub tax_withheld: Option<Decimal>,
    pub currency: Currency,
    /// Client name or income source
    pub source: String,
    pub description: String,
    pub country: Country,
    pub tax_year: String,
    pub created_at: DateTime<Utc>,
}

/// A stored expense record, filed under exactly one country and tax year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub amount: Decimal,
    pub currency: Currency,
    pub category: String,
    pub description: String,
    pub country: Country,
    pub tax_year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The user-entered part of an income, before allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeDraft {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub tax_withheld: Option<Decimal>,
    pub currency: Currency,
    pub source: String,
    pub description: String,
}

/// The user-entered part of an expense, before allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub currency: Currency,
    pub category: String,
    pub description: String,
    pub receipt_url: Option<String>,
}

impl IncomeDraft {
    /// Trim text fields and reject missing or negative values
    pub fn validate(mut self) -> Result<Self, DraftError> {
        self.source = required("source", &self.source)?;
        self.description = required("description", &self.description)?;
        non_negative("amount", self.amount)?;
        if let Some(withheld) = self.tax_withheld {
            non_negative("tax withheld", withheld)?;
        }
        Ok(self)
    }
}

impl ExpenseDraft {
    /// Trim text fields and reject missing or negative values
    pub fn validate(mut self) -> Result<Self, DraftError> {
        self.category = required("category", &self.category)?;
        self.description = required("description", &self.description)?;
        non_negative("amount", self.amount)?;
        self.receipt_url = self
            .receipt_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        Ok(self)
    }
}

impl Income {
    pub fn from_draft(
        draft: IncomeDraft,
        country: Country,
        tax_year: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Income {
            id: new_id(),
            date: draft.date,
            amount: draft.amount,
            tax_withheld: draft.tax_withheld,
            currency: draft.currency,
            source: draft.source,
            description: draft.description,
            country,
            tax_year: tax_year.to_string(),
            created_at,
        }
    }

    /// The editable fields of this record
    pub fn draft(&self) -> IncomeDraft {
        IncomeDraft {
            date: self.date,
            amount: self.amount,
            tax_withheld: self.tax_withheld,
            currency: self.currency,
            source: self.source.clone(),
            description: self.description.clone(),
        }
    }

    /// Replace the editable fields, keeping id, country, tax year and creation time
    pub fn apply(&mut self, draft: IncomeDraft) {
        self.date = draft.date;
        self.amount = draft.amount;
        self.tax_withheld = draft.tax_withheld;
        self.currency = draft.currency;
        self.source = draft.source;
        self.description = draft.description;
    }
}

impl Expense {
    pub fn from_draft(
        draft: ExpenseDraft,
        country: Country,
        tax_year: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Expense {
            id: new_id(),
            date: draft.date,
            amount: draft.amount,
            currency: draft.currency,
            category: draft.category,
            description: draft.description,
            country,
            tax_year: tax_year.to_string(),
            receipt_url: draft.receipt_url,
            created_at,
        }
    }

    pub fn draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            date: self.date,
            amount: self.amount,
            currency: self.currency,
            category: self.category.clone(),
            description: self.description.clone(),
            receipt_url: self.receipt_url.clone(),
        }
    }

    /// Replace the editable fields, keeping id, country, tax year and creation time
    pub fn apply(&mut self, draft: ExpenseDraft) {
        self.date = draft.date;
        self.amount = draft.amount;
        self.currency = draft.currency;
        self.category = draft.category;
        self.description = draft.description;
        self.receipt_url = draft.receipt_url;
    }
}

impl Record for Income {
    const KIND: RecordKind = RecordKind::Income;

    fn id(&self) -> &str {
        &self.id
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
    fn currency(&self) -> Currency {
        self.currency
    }
    fn country(&self) -> Country {
        self.country
    }
    fn tax_year(&self) -> &str {
        &self.tax_year
    }
    fn tax_withheld(&self) -> Option<Decimal> {
        self.tax_withheld
    }
}

impl Record for Expense {
    const KIND: RecordKind = RecordKind::Expense;

    fn id(&self) -> &str {
        &self.id
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
    fn currency(&self) -> Currency {
        self.currency
    }
    fn country(&self) -> Country {
        self.country
    }
    fn tax_year(&self) -> &str {
        &self.tax_year
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn required(field: &'static str, value: &str) -> Result<String, DraftError> {
    let value = value.trim();
    if value.is_empty() {
        Err(DraftError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

fn non_negative(field: &'static str, value: Decimal) -> Result<(), DraftError> {
    if value < Decimal::ZERO {
        Err(DraftError::Negative { field, value })
    } else {
        Ok(())
    }
}
