//! Integration tests for the idose binary.
//!
//! These exercise end-to-end behavior: tier derivation, the four
//! calculators, lenient input handling, config overrides, and summary
//! export.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("idose"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Inpatient insulin dosing calculator",
        ));
}

#[test]
fn test_initiate_end_to_end() {
    cli()
        .args([
            "initiate",
            "--weight",
            "70",
            "--age",
            "40",
            "--egfr",
            "90",
            "--eating",
            "--multiplier",
            "0.5",
            "--glucose",
            "200",
            "--target",
            "140",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Daily Dose (TDD): 35.0 units"))
        .stdout(predicate::str::contains("Basal Insulin: 17.5 units"))
        .stdout(predicate::str::contains(
            "Nutritional Insulin (per meal): 5.8 units",
        ))
        .stdout(predicate::str::contains(
            "Insulin Sensitivity Factor: 51 mg/dL/unit",
        ))
        .stdout(predicate::str::contains("Correction Dose: 1.2 units"));
}

#[test]
fn test_initiate_elderly_gets_low_tier_options() {
    cli()
        .args(["initiate", "--weight", "70", "--age", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dosing tier: low (multiplier options: 0.2, 0.25, 0.3 units/kg)",
        ));
}

#[test]
fn test_initiate_rejects_out_of_tier_multiplier() {
    // 0.5 units/kg is a standard-tier option; an elderly patient is low tier
    cli()
        .args([
            "initiate",
            "--weight",
            "70",
            "--age",
            "70",
            "--multiplier",
            "0.5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an option"));
}

#[test]
fn test_initiate_without_multiplier_is_unavailable() {
    cli()
        .args(["initiate", "--weight", "70", "--age", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Daily Dose (TDD): --"));
}

#[test]
fn test_initiate_malformed_numbers_do_not_crash() {
    cli()
        .args(["initiate", "--weight", "abc", "--age", "forty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Daily Dose (TDD): --"));
}

#[test]
fn test_convert_single_risk_factor() {
    cli()
        .args([
            "convert",
            "--home-basal",
            "20",
            "--home-bolus",
            "20",
            "--age",
            "70",
            "--egfr",
            "90",
            "--eating",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adjusted TDD: 32.0 units"))
        .stdout(predicate::str::contains("Basal Insulin: 16.0 units"))
        .stdout(predicate::str::contains(
            "Nutritional Insulin (per meal): 5.3 units",
        ))
        .stdout(predicate::str::contains("Risk Factors: 1"))
        .stdout(predicate::str::contains("Reduction Applied: 20%"));
}

#[test]
fn test_convert_two_risk_factors_deeper_cut() {
    cli()
        .args([
            "convert",
            "--home-basal",
            "20",
            "--home-bolus",
            "20",
            "--age",
            "70",
            "--recent-hypoglycemia",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adjusted TDD: 28.0 units"))
        .stdout(predicate::str::contains("Reduction Applied: 30%"));
}

#[test]
fn test_adjust_hypoglycemia_overrides_other_flags() {
    let output = cli()
        .args([
            "adjust",
            "--basal",
            "20",
            "--breakfast",
            "8",
            "--lunch",
            "10",
            "--dinner",
            "12",
            "--fasting-high",
            "--post-meal-high",
            "--any-hypoglycemia",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("New Basal: 16.0 units"))
        .stdout(predicate::str::contains("New Breakfast Bolus: 6.4 units"))
        .stdout(predicate::str::contains("New Lunch Bolus: 8.0 units"))
        .stdout(predicate::str::contains("New Dinner Bolus: 9.6 units"))
        .stdout(predicate::str::contains("reduce all insulin"))
        .get_output()
        .stdout
        .clone();

    // The hypoglycemia override replaces per-pattern recommendations
    let stdout = String::from_utf8_lossy(&output);
    assert_eq!(stdout.matches("Recommendation:").count(), 1);
}

#[test]
fn test_adjust_fasting_high_raises_basal() {
    cli()
        .args([
            "adjust",
            "--basal",
            "20",
            "--breakfast",
            "8",
            "--lunch",
            "10",
            "--dinner",
            "12",
            "--fasting-high",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("New Basal: 23.0 units"))
        .stdout(predicate::str::contains("increase basal insulin by 15%"));
}

#[test]
fn test_correct_hold_below_threshold() {
    cli()
        .args(["correct", "--tdd", "45", "--glucose", "95"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hold Correction: yes"))
        .stdout(predicate::str::contains("Correction Dose (rounded): 0 units"));
}

#[test]
fn test_correct_rounds_to_actionable_dose() {
    cli()
        .args(["correct", "--tdd", "45", "--glucose", "200", "--target", "140"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Insulin Sensitivity Factor: 40 mg/dL/unit",
        ))
        .stdout(predicate::str::contains("Correction Dose (exact): 1.5 units"))
        .stdout(predicate::str::contains("Correction Dose (rounded): 2 units"));
}

#[test]
fn test_correct_without_tdd_is_unavailable() {
    cli()
        .args(["correct", "--glucose", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correction Dose (rounded): --"));
}

#[test]
fn test_export_writes_summary_document() {
    let temp_dir = TempDir::new().unwrap();
    let summary_path = temp_dir.path().join("summary.txt");

    cli()
        .args(["correct", "--tdd", "45", "--glucose", "200"])
        .arg("--export")
        .arg(&summary_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary written to"));

    let content = fs::read_to_string(&summary_path).expect("summary file");
    assert!(content.starts_with("Insulin Calculator Summary - Correction Dose Calculator"));
    assert!(content.contains("Generated: "));
    assert!(content.contains("Calculated Values:"));
    assert!(content.contains("Correction Dose (rounded): 2 units"));
    assert!(content.contains("ADA 2025 Guidelines"));
}

#[test]
fn test_config_override_changes_hold_threshold() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[correction]\nhold_below_mg_dl = 90.0\n").unwrap();

    // 95 mg/dL is above the lowered threshold, so the dose is not held
    cli()
        .args(["correct", "--tdd", "45", "--glucose", "95"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hold Correction: no"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[conversion]\nlow_risk_factor = 1.5\n").unwrap();

    cli()
        .args(["correct", "--tdd", "45", "--glucose", "200"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure();
}
