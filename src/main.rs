use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod book;
mod cmd;
mod core;
mod store;
mod utils;

#[derive(Parser, Debug)]
#[command(name = "taxtrack")]
#[command(version, about = "Track self-employment income and expenses for US and UK tax returns")]
struct Cli {
    /// JSON data file holding records and selected tax years
    #[arg(long, global = true, default_value = "taxtrack.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record income; GBP income is filed under both the UK and US selected years
    AddIncome(cmd::add::AddIncomeCommand),
    /// Record an expense; GBP expenses are filed under both the UK and US selected years
    AddExpense(cmd::add::AddExpenseCommand),
    /// Change an existing income record
    EditIncome(cmd::edit::EditIncomeCommand),
    /// Change an existing expense record
    EditExpense(cmd::edit::EditExpenseCommand),
    /// Delete an income or expense record by id
    Delete(cmd::delete::DeleteCommand),
    /// List a country's records for a tax year
    List(cmd::list::ListCommand),
    /// Show a country's totals for a tax year
    Summary(cmd::summary::SummaryCommand),
    /// Write a country's records to a spreadsheet CSV
    Export(cmd::export::ExportCommand),
    /// List the selectable tax years for a country
    Years(cmd::years::YearsCommand),
    /// Change a country's selected tax year
    SelectYear(cmd::years::SelectYearCommand),
    /// Print the expense categories
    Categories(cmd::categories::CategoriesCommand),
    /// Check stored records for invalid tax years and currencies
    Validate(cmd::validate::ValidateCommand),
    /// Print the data file or export formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let data = cli.data.as_path();
    match cli.command {
        Command::AddIncome(add) => add.exec(data),
        Command::AddExpense(add) => add.exec(data),
        Command::EditIncome(edit) => edit.exec(data),
        Command::EditExpense(edit) => edit.exec(data),
        Command::Delete(delete) => delete.exec(data),
        Command::List(list) => list.exec(data),
        Command::Summary(summary) => summary.exec(data),
        Command::Export(export) => export.exec(data),
        Command::Years(years) => years.exec(data),
        Command::SelectYear(select) => select.exec(data),
        Command::Categories(categories) => categories.exec(),
        Command::Validate(validate) => validate.exec(data),
        Command::Schema(schema) => schema.exec(),
    }
}
