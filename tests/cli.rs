//! E2E tests for recording, summarizing and exporting through the CLI

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn taxtrack(data: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_taxtrack"))
        .arg("--data")
        .arg(data)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Data file with the 2024 US year and 2024-25 UK year selected
fn book_for_2024() -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("taxtrack.json");
    for args in [["select-year", "--country", "us", "2024"], ["select-year", "--country", "uk", "2024-25"]] {
        let output = taxtrack(&data, &args);
        assert!(output.status.success(), "Command failed: {:?}", output);
    }
    (dir, data)
}

fn add_gbp_income(data: &Path, amount: &str) {
    let output = taxtrack(
        data,
        &[
            "add-income",
            "-a",
            amount,
            "-c",
            "gbp",
            "-s",
            "Acme Ltd",
            "-d",
            "Consulting",
            "--date",
            "2024-06-01",
        ],
    );
    assert!(output.status.success(), "Command failed: {:?}", output);
}

/// GBP income is filed under both countries
#[test]
fn gbp_income_is_recorded_for_both_countries() {
    let (_dir, data) = book_for_2024();
    add_gbp_income(&data, "1000");

    let output = taxtrack(&data, &["list", "--country", "uk"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let uk = stdout(&output);
    assert!(uk.contains("Acme Ltd"));
    assert!(uk.contains("2024-25"));
    assert!(uk.contains("£1,000.00"));

    let output = taxtrack(&data, &["list", "--country", "us"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let us = stdout(&output);
    assert!(us.contains("Acme Ltd"));
    assert!(us.contains("2024"));
    assert!(us.contains("£1,000.00"));
}

/// USD income stays out of the UK records
#[test]
fn usd_income_is_us_only() {
    let (_dir, data) = book_for_2024();
    let output = taxtrack(
        &data,
        &["add-income", "-a", "500", "-c", "usd", "-s", "Globex", "-d", "Retainer"],
    );
    assert!(output.status.success(), "Command failed: {:?}", output);

    let output = taxtrack(&data, &["summary", "--country", "us", "--json"]);
    let us: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(us["country"], "US");
    assert_eq!(us["usd"]["income_count"], 1);
    assert_eq!(us["gbp"]["income_count"], 0);

    let output = taxtrack(&data, &["summary", "--country", "uk", "--json"]);
    let uk: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(uk["country"], "UK");
    assert_eq!(uk["totals"]["income_count"], 0);
}

/// Export writes the three sections with the UK net income
#[test]
fn export_uk_to_stdout() {
    let (_dir, data) = book_for_2024();
    add_gbp_income(&data, "1000");
    let output = taxtrack(
        &data,
        &[
            "add-expense",
            "-a",
            "300",
            "-k",
            "office costs (including working from home)",
            "-d",
            "Desk",
            "--date",
            "2024-07-01",
        ],
    );
    assert!(output.status.success(), "Command failed: {:?}", output);

    let output = taxtrack(&data, &["export", "--country", "uk", "--stdout"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let csv = stdout(&output);

    assert!(csv.starts_with("\"=== SUMMARY ===\"\n"));
    assert!(csv.contains("\"=== INCOME ===\""));
    assert!(csv.contains("\"=== EXPENSES ===\""));
    assert!(csv.contains("\"Net Income\",\"£700.00\""));
    assert!(csv.contains(
        "\"2024-07-01\",\"Office costs (including working from home)\",\"Desk\",\"300\",\"GBP\",\"2024-25\""
    ));
}

/// Export to a directory uses the dated country filename
#[test]
fn export_writes_file() {
    let (dir, data) = book_for_2024();
    add_gbp_income(&data, "250");

    let output = taxtrack(
        &data,
        &["export", "--country", "us", "-o", dir.path().to_str().unwrap()],
    );
    assert!(output.status.success(), "Command failed: {:?}", output);

    let written: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with("US_tax_data_"))
        .collect();
    assert_eq!(written.len(), 1);

    let csv = std::fs::read_to_string(dir.path().join(&written[0])).unwrap();
    assert!(csv.contains("\"GBP Income\",\"£250.00\""));
}

/// Deleting a GBP record only removes the copy with that id
#[test]
fn delete_removes_one_record() {
    let (_dir, data) = book_for_2024();
    add_gbp_income(&data, "1000");

    let output = taxtrack(&data, &["list", "--country", "uk", "--csv"]);
    let listed = stdout(&output);
    let mut reader = csv::Reader::from_reader(listed.as_bytes());
    let id_column = reader
        .headers()
        .unwrap()
        .iter()
        .position(|h| h == "id")
        .unwrap();
    let id = reader.records().next().unwrap().unwrap()[id_column].to_string();

    let output = taxtrack(&data, &["delete", &id]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("Deleted income"));

    let output = taxtrack(&data, &["summary", "--country", "uk", "--json"]);
    let uk: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(uk["totals"]["income_count"], 0);

    let output = taxtrack(&data, &["summary", "--country", "us", "--json"]);
    let us: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(us["gbp"]["income_count"], 1);

    let output = taxtrack(&data, &["delete", &id]);
    assert!(!output.status.success());
}

#[test]
fn select_year_rejects_bad_label() {
    let (_dir, data) = book_for_2024();

    let output = taxtrack(&data, &["select-year", "--country", "uk", "2024"]);
    assert!(!output.status.success());

    let output = taxtrack(&data, &["select-year", "--country", "uk", "2024-26"]);
    assert!(!output.status.success());
}

#[test]
fn validate_clean_book() {
    let (_dir, data) = book_for_2024();
    add_gbp_income(&data, "1000");

    let output = taxtrack(&data, &["validate"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("No issues found"));
}

/// A USD record filed under the UK is reported and fails validation
#[test]
fn validate_flags_usd_in_uk() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("taxtrack.json");
    let document = serde_json::json!({
        "tax-incomes": [{
            "id": "bad-1",
            "date": "2024-06-01",
            "amount": 100,
            "currency": "USD",
            "source": "Globex",
            "description": "Retainer",
            "country": "UK",
            "tax_year": "2024-25",
            "created_at": "2024-06-01T00:00:00Z"
        }],
        "tax-expenses": [],
        "selected-tax-year-us": "2024",
        "selected-tax-year-uk": "2024-25"
    });
    std::fs::write(&data, document.to_string()).unwrap();

    let output = taxtrack(&data, &["validate", "--json"]);
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["issue_count"], 1);
    assert_eq!(report["issues"][0]["id"], "bad-1");
    assert_eq!(report["issues"][0]["warning"]["type"], "CurrencyCountryMismatch");

    let output = taxtrack(&data, &["summary", "--country", "uk", "--json"]);
    let uk: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(uk["excluded"], 1);
    assert_eq!(uk["totals"]["income_count"], 0);
}

/// Categories follow the currency on unified entry
#[test]
fn categories_by_currency() {
    let (_dir, data) = book_for_2024();

    let output = taxtrack(&data, &["categories", "-c", "usd"]);
    assert!(stdout(&output).contains("Car and truck expenses"));

    let output = taxtrack(&data, &["categories"]);
    assert!(stdout(&output).contains("Bank charges"));

    let output = taxtrack(
        &data,
        &["add-expense", "-a", "10", "-c", "usd", "-k", "Bank charges", "-d", "Fee"],
    );
    assert!(!output.status.success());
}

/// The US copy of a GBP expense keeps choosing from the GBP category list
#[test]
fn edit_us_copy_of_gbp_expense_category() {
    let (_dir, data) = book_for_2024();
    let output = taxtrack(
        &data,
        &["add-expense", "-a", "12", "-k", "Bank charges", "-d", "Account fee"],
    );
    assert!(output.status.success(), "Command failed: {:?}", output);

    let output = taxtrack(&data, &["list", "--country", "us", "--csv"]);
    let listed = stdout(&output);
    let mut reader = csv::Reader::from_reader(listed.as_bytes());
    let headers = reader.headers().unwrap().clone();
    let column = |name: &str| headers.iter().position(|h| h == name).unwrap();
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[column("party")], "Bank charges");
    let id = row[column("id")].to_string();

    let output = taxtrack(&data, &["edit-expense", &id, "-k", "professional fees"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("Professional fees"));

    let output = taxtrack(&data, &["edit-expense", &id, "-k", "Supplies"]);
    assert!(!output.status.success());
}
