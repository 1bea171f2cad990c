use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const GPAY_PAID: &str = "Paid to
Zomato Ltd
₹349.00
Completed
4 Oct 2025, 6:43 pm
UPI transaction ID
527812345678
To: ZOMATO LTD (zomato@hdfcbank)
From: JOHN DOE (HDFC Bank)";

const PHONEPE_RECEIVED: &str = "Received from
RAVI KUMAR
₹1,500
Credited to
State Bank of India
Transaction ID
T2510041843123456789
12 Oct 2025, 1:47 PM";

/// Command isolated from the user's real config directory.
fn upiscan(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("upiscan").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write_input(dir: &TempDir, name: &str, text: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn parse_file_prints_json() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "gpay.txt", GPAY_PAID);

    upiscan(dir.path())
        .args(["parse", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"merchant\": \"ZOMATO LTD\""))
        .stdout(predicate::str::contains("\"transactionId\": \"527812345678\""))
        .stdout(predicate::str::contains("\"suggestedCategory\": \"Food\""));
}

#[test]
fn parse_stdin_as_text() {
    let dir = TempDir::new().unwrap();

    upiscan(dir.path())
        .args(["parse", "-", "--format", "text"])
        .write_stdin(PHONEPE_RECEIVED)
        .assert()
        .success()
        .stdout(predicate::str::contains("Merchant: RAVI KUMAR"))
        .stdout(predicate::str::contains("Type:     received"));
}

#[test]
fn parse_csv_has_header() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "phonepe.txt", PHONEPE_RECEIVED);

    upiscan(dir.path())
        .args(["parse", &input, "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "merchant,amount,date,transaction_id,transaction_type,suggested_category",
        ))
        .stdout(predicate::str::contains("RAVI KUMAR,1500"));
}

#[test]
fn parse_unreadable_text_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "blank.txt", "thank you for using our app");

    upiscan(dir.path())
        .args(["parse", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No purchase found"));

    upiscan(dir.path())
        .args(["parse", &input, "--allow-empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("null"));
}

#[test]
fn parse_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    upiscan(dir.path())
        .args(["parse", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn sample_parses_builtin_text() {
    let dir = TempDir::new().unwrap();

    upiscan(dir.path())
        .arg("sample")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"merchant\": \"Example Store\""))
        .stdout(predicate::str::contains("\"date\": \"2025-08-10\""));
}

#[test]
fn ledger_add_list_and_totals() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("purchases.json");
    let ledger = ledger.to_string_lossy().into_owned();
    let gpay = write_input(&dir, "gpay.txt", GPAY_PAID);
    let phonepe = write_input(&dir, "phonepe.txt", PHONEPE_RECEIVED);

    upiscan(dir.path())
        .args(["ledger", "--ledger", &ledger, "add", &gpay])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added ZOMATO LTD"));

    upiscan(dir.path())
        .args(["ledger", "--ledger", &ledger, "add", &phonepe])
        .args(["--category", "Rent", "--amount", "1200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Rent]"));

    upiscan(dir.path())
        .args(["ledger", "--ledger", &ledger, "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"merchant\": \"RAVI KUMAR\""))
        .stdout(predicate::str::contains("\"category\": \"Food\""));

    upiscan(dir.path())
        .args(["ledger", "--ledger", &ledger, "totals", "--last", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent"))
        .stdout(predicate::str::contains("Food").not());

    upiscan(dir.path())
        .args(["ledger", "--ledger", &ledger, "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn ledger_add_rejects_bad_amount() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("purchases.json");
    let gpay = write_input(&dir, "gpay.txt", GPAY_PAID);

    upiscan(dir.path())
        .args(["ledger", "--ledger"])
        .arg(&ledger)
        .args(["add", &gpay, "--amount", "abc"])
        .assert()
        .failure();

    assert!(!ledger.exists());
}

#[test]
fn advice_builds_request_for_newest_purchase() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("purchases.json");
    let ledger = ledger.to_string_lossy().into_owned();
    let gpay = write_input(&dir, "gpay.txt", GPAY_PAID);

    upiscan(dir.path())
        .args(["ledger", "--ledger", &ledger, "add", &gpay])
        .assert()
        .success();

    upiscan(dir.path())
        .args(["advice", "--ledger", &ledger, "--prompt-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The user has purchase history: []"))
        .stdout(predicate::str::contains("ZOMATO LTD"));
}

#[test]
fn advice_reads_response_body() {
    let dir = TempDir::new().unwrap();

    upiscan(dir.path())
        .args(["advice", "--response", "-"])
        .write_stdin(r#"{"completion":"Cook at home twice a week."}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cook at home twice a week."));

    upiscan(dir.path())
        .args(["advice", "--response", "-"])
        .write_stdin("<html>bad gateway</html>")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to generate advice"));
}

#[test]
fn config_init_then_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let config = config.to_string_lossy().into_owned();

    upiscan(dir.path())
        .args(["--config", &config, "config", "init"])
        .assert()
        .success();

    upiscan(dir.path())
        .args(["--config", &config, "config", "set", "ledger.recent_limit", "5"])
        .assert()
        .success();

    upiscan(dir.path())
        .args(["--config", &config, "config", "get", "ledger.recent_limit"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5\n"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    write_input(&dir, "gpay.txt", GPAY_PAID);
    write_input(&dir, "phonepe.txt", PHONEPE_RECEIVED);
    write_input(&dir, "blank.txt", "thank you");
    let out = dir.path().join("out");
    let pattern = dir.path().join("*.txt");

    upiscan(dir.path())
        .arg("batch")
        .arg(pattern.to_string_lossy().as_ref())
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 1 failed"));

    assert!(out.join("gpay.json").exists());
    assert!(out.join("phonepe.json").exists());
    assert!(!out.join("blank.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,merchant,amount"));
    assert!(summary.contains("blank.txt,error"));
}
