use super::Session;
use crate::core::format_currency;
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct DeleteCommand {
    /// Id of the income or expense to delete
    id: String,
}

impl DeleteCommand {
    pub fn exec(&self, data: &Path) -> anyhow::Result<()> {
        let mut session = Session::open(data)?;
        let ledger = &mut session.book.ledger;

        let deleted = if ledger.income(&self.id).is_some() {
            let income = ledger.delete_income(&self.id)?;
            format!(
                "income of {} from {} ({} {})",
                format_currency(income.amount, income.currency),
                income.source,
                income.country,
                income.tax_year
            )
        } else if ledger.expense(&self.id).is_some() {
            let expense = ledger.delete_expense(&self.id)?;
            format!(
                "expense of {} for {} ({} {})",
                format_currency(expense.amount, expense.currency),
                expense.category,
                expense.country,
                expense.tax_year
            )
        } else {
            anyhow::bail!("No income or expense with id {}", self.id);
        };
        session.commit()?;

        println!("Deleted {}", deleted);
        Ok(())
    }
}
