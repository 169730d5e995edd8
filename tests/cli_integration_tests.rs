//! CLI Integration Tests
//!
//! Tests the CLI binary directly using assert_cmd to exercise main.rs code paths.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn tailorstock(data: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tailorstock").unwrap();
    cmd.env_remove("TAILORSTOCK_SIZES")
        .env_remove("TAILORSTOCK_LOW_STOCK")
        .env("TAILORSTOCK_DATA", data);
    cmd
}

fn add_garment(data: &Path, size: &str, stock: &str) {
    tailorstock(data)
        .args([
            "add",
            "--brand",
            "Acme",
            "--category",
            "Coat",
            "--model",
            "M1",
            "--size",
            size,
            "--price",
            "150",
            "--stock",
            stock,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Garment added"));
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("tailorstock").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tailorstock"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("tailorstock").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tailorstock"));
}

#[test]
fn test_import_help() {
    let mut cmd = Command::cargo_bin("tailorstock").unwrap();
    cmd.args(["import", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("size header row"));
}

// ═══════════════════════════════════════════════════════════════════════════
// WORKFLOW TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_add_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("inventory.yaml");

    add_garment(&data, "30", "2");
    add_garment(&data, "48", "1");

    tailorstock(&data)
        .args(["list", "--size", "48"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 garment(s) found"))
        .stdout(predicate::str::contains("Coat Acme M1"));
}

#[test]
fn test_export_then_import() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("inventory.yaml");
    let sheet = temp_dir.path().join("stock.xlsx");

    add_garment(&data, "30", "2");
    add_garment(&data, "48", "5");

    tailorstock(&data)
        .arg("export")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("Export Complete"));
    assert!(sheet.exists());

    let other = temp_dir.path().join("other.yaml");
    tailorstock(&other)
        .arg("import")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 garments imported"));

    tailorstock(&other)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 050 €"));
}

#[test]
fn test_import_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("inventory.yaml");

    tailorstock(&data)
        .args(["import", "does-not-exist.xlsx"])
        .assert()
        .failure();
}

#[test]
fn test_import_wrong_extension_fails() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("inventory.yaml");
    let csv = temp_dir.path().join("stock.csv");
    std::fs::write(&csv, "Marque,Type").unwrap();

    tailorstock(&data)
        .arg("import")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("xlsx"));
}

#[test]
fn test_alerts_with_threshold() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("inventory.yaml");

    add_garment(&data, "30", "0");
    add_garment(&data, "32", "9");

    tailorstock(&data)
        .args(["alerts", "--threshold", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Below threshold (3): 1"));
}

#[test]
fn test_delete_unknown_id_fails() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("inventory.yaml");

    tailorstock(&data)
        .args(["delete", "no-such-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NotFound"));
}

#[test]
fn test_custom_sizes_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("inventory.yaml");
    let sheet = temp_dir.path().join("stock.xlsx");

    add_garment(&data, "2", "4");

    tailorstock(&data)
        .env("TAILORSTOCK_SIZES", "1,2,3")
        .arg("export")
        .arg(&sheet)
        .assert()
        .success();

    let other = temp_dir.path().join("other.yaml");
    tailorstock(&other)
        .env("TAILORSTOCK_SIZES", "1,2,3")
        .arg("import")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 garments imported"));
}

#[test]
fn test_letter_sizes_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("inventory.yaml");
    let sheet = temp_dir.path().join("stock.xlsx");

    add_garment(&data, "M", "4");

    tailorstock(&data)
        .env("TAILORSTOCK_SIZES", "S,M,L")
        .arg("export")
        .arg(&sheet)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not numeric"));
    assert!(!sheet.exists());
}
