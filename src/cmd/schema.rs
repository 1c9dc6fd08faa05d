//! Schema command - print the data file and export formats

use crate::book::StoreDocument;
use crate::core::{ExpenseRow, IncomeRow, SheetColumn};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or sheet-columns
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the data file
    JsonSchema,
    /// Column descriptions for the income and expense sections of an export
    SheetColumns,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(StoreDocument);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::SheetColumns => {
                print_columns("Income", IncomeRow::sheet_columns());
                println!();
                print_columns("Expenses", ExpenseRow::sheet_columns());
            }
        }
        Ok(())
    }
}

fn print_columns(title: &str, columns: &[SheetColumn]) {
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    for column in columns {
        println!("{:14}  {}", column.name, column.description);
    }
}
