pub mod allocation;
pub mod categories;
pub mod export;
pub mod ledger;
pub mod money;
pub mod record;
pub mod summary;
pub mod tax_year;
pub mod warnings;

// Flat public surface for domain types and functions.
pub use allocation::YearSelection;
pub use export::{export_filename, generate_sheets, ExpenseRow, IncomeRow, SheetColumn};
pub use ledger::{Ledger, LedgerError};
pub use money::{format_currency, Country, Currency};
pub use record::{Expense, ExpenseDraft, Income, IncomeDraft, RecordKind};
pub use summary::{summarize, Summary, Totals};
pub use tax_year::{current_tax_year, selectable_tax_years, TaxYear};
pub use warnings::RecordIssue;
