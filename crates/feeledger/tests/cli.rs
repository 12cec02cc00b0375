use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn feeledger(dir: &Path) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("feeledger").into();
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    cmd
}

const SESSION_JSON: &str = r#"{
    "case": {
        "clientName": "Acme",
        "lienHolderName": "X Bank",
        "repoType": "Involuntary Repo"
    },
    "sources": [
        {
            "source": "My Summary",
            "entries": [
                {
                    "feeLabel": "Holding Fee",
                    "date": "2024-02-10",
                    "referenceSentence": "holding fee charged",
                    "amounts": [{"amount": "$50.00", "context": "holding fee charged"}]
                },
                {
                    "amounts": [{"amount": "$75.00", "context": "Key replacement billed $75"}]
                }
            ]
        },
        {
            "source": "Case Page",
            "entries": [
                {
                    "feeLabel": "holding fee",
                    "date": "2024-02-11",
                    "referenceSentence": "Holding Fee Charged",
                    "amounts": [{"amount": "$50.00", "context": "Holding Fee Charged"}]
                }
            ]
        }
    ]
}"#;

/// Write the session fixture and return its path.
fn session_file(dir: &Path) -> PathBuf {
    let path = dir.join("session.json");
    fs::write(&path, SESSION_JSON).unwrap();
    path
}

fn seed_matrix(dir: &Path, db: &str, lienholder: &str, amount: &str) {
    feeledger(dir)
        .args([
            "add-fee",
            "--db",
            db,
            "Acme",
            lienholder,
            "Involuntary Repo",
            amount,
        ])
        .assert()
        .success();
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    let mut cmd: Command = cargo_bin_cmd!("feeledger").into();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("feeledger"));
}

// --- Run ---

#[test]
fn run_writes_all_three_artifacts() {
    let tmp = TempDir::new().unwrap();
    session_file(tmp.path());

    feeledger(tmp.path())
        .args(["run", "--input", "session.json", "--out", "artifacts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("after dedup"));

    let out = tmp.path().join("artifacts");
    assert!(out.join("raw-entries.json").exists());
    assert!(out.join("fees.json").exists());
    assert!(out.join("report.json").exists());
}

#[test]
fn run_collapses_duplicates_and_routes_keys() {
    let tmp = TempDir::new().unwrap();
    session_file(tmp.path());

    feeledger(tmp.path())
        .args(["run", "--input", "session.json", "--out", "."])
        .assert()
        .success();

    let report = fs::read_to_string(tmp.path().join("report.json")).unwrap();
    assert!(report.contains("\"keys fee\""));
    assert!(report.contains("Keys Fee"));

    let fees = fs::read_to_string(tmp.path().join("fees.json")).unwrap();
    // The duplicate Holding Fee kept the My Summary copy.
    assert_eq!(fees.matches("Holding Fee").count(), 1);
    assert!(fees.contains("My Summary"));
}

#[test]
fn run_without_matrix_omits_database_fee() {
    let tmp = TempDir::new().unwrap();
    session_file(tmp.path());

    feeledger(tmp.path())
        .args(["run", "--input", "session.json", "--out", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Authoritative fee: none found"));

    let report = fs::read_to_string(tmp.path().join("report.json")).unwrap();
    assert!(!report.contains("databaseFee"));
}

#[test]
fn run_with_matrix_reports_database_fee_outside_buckets() {
    let tmp = TempDir::new().unwrap();
    session_file(tmp.path());
    seed_matrix(tmp.path(), "fees.db", "X Bank", "350.00");

    feeledger(tmp.path())
        .args([
            "run",
            "--input",
            "session.json",
            "--out",
            ".",
            "--db",
            "fees.db",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Authoritative fee: $350.00"));

    let report = fs::read_to_string(tmp.path().join("report.json")).unwrap();
    assert!(report.contains("databaseFee"));
    // Same bucket count as a run without the matrix.
    assert!(report.contains("\"holding fee\""));
    assert!(report.contains("\"keys fee\""));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let tmp = TempDir::new().unwrap();
    session_file(tmp.path());

    for out in ["first", "second"] {
        feeledger(tmp.path())
            .args(["run", "--input", "session.json", "--out", out])
            .assert()
            .success();
    }

    for name in ["raw-entries.json", "fees.json", "report.json"] {
        let first = fs::read(tmp.path().join("first").join(name)).unwrap();
        let second = fs::read(tmp.path().join("second").join(name)).unwrap();
        assert_eq!(first, second, "{name} differs between runs");
    }
}

#[test]
fn run_with_custom_taxonomy() {
    let tmp = TempDir::new().unwrap();
    session_file(tmp.path());
    fs::write(
        tmp.path().join("taxonomy.json"),
        r#"{"whitelist": ["Holding Fee"], "keysKeywords": []}"#,
    )
    .unwrap();

    feeledger(tmp.path())
        .args([
            "run",
            "--input",
            "session.json",
            "--out",
            ".",
            "--taxonomy",
            "taxonomy.json",
        ])
        .assert()
        .success();

    // Without keys keywords the key replacement mention stays in an
    // Other bucket instead of the reserved keys bucket.
    let report = fs::read_to_string(tmp.path().join("report.json")).unwrap();
    assert!(!report.contains("\"keys fee\""));
}

#[test]
fn missing_session_file_fails_with_context() {
    let tmp = TempDir::new().unwrap();

    feeledger(tmp.path())
        .args(["run", "--input", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

// --- Fee matrix ---

#[test]
fn add_fee_then_exact_lookup() {
    let tmp = TempDir::new().unwrap();
    seed_matrix(tmp.path(), "fees.db", "X Bank", "350.00");

    feeledger(tmp.path())
        .args(["lookup", "--db", "fees.db", "Acme", "X Bank", "Involuntary Repo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$350.00"))
        .stdout(predicate::str::contains("exact match"));
}

#[test]
fn lookup_falls_back_to_standard_lienholder() {
    let tmp = TempDir::new().unwrap();
    seed_matrix(tmp.path(), "fees.db", "Standard", "300.00");

    feeledger(tmp.path())
        .args(["lookup", "--db", "fees.db", "Acme", "Nowhere CU", "Involuntary Repo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$300.00"))
        .stdout(predicate::str::contains("Standard fallback"));
}

#[test]
fn lookup_absence_is_reported_not_fatal() {
    let tmp = TempDir::new().unwrap();
    seed_matrix(tmp.path(), "fees.db", "X Bank", "350.00");

    feeledger(tmp.path())
        .args(["lookup", "--db", "fees.db", "Nobody", "X Bank", "Involuntary Repo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching fee found"));
}
