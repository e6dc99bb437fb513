use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, TempDir};

/// The binary with an empty home directory, so no user config leaks in.
fn ehv(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ehv").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("EHV_LOG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn faults_filtered_by_severity() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["faults", "--severity", "High"])
        .assert()
        .success()
        .stdout(predicate::str::contains("F001"))
        .stdout(predicate::str::contains("F003"))
        .stdout(predicate::str::contains("F008"))
        .stdout(predicate::str::contains("F002").not())
        .stdout(predicate::str::contains("Showing 1 to 3 of 3 (page 1 of 1)"));
}

#[test]
fn faults_page_request_is_clamped() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["faults", "--page", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 6 to 8 of 8 (page 2 of 2)"));
}

#[test]
fn faults_with_no_match_show_empty_state() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["faults", "--query", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results match the current filters."))
        .stdout(predicate::str::contains("TIMESTAMP").not());
}

#[test]
fn faults_last_day_window() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["faults", "--range", "1d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 to 3 of 3"));
}

#[test]
fn faults_json_output_parses() {
    let home = tempdir().unwrap();
    let output = ehv(&home)
        .args(["faults", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["page"]["total_items"], 8);
    assert_eq!(doc["page"]["items"].as_array().unwrap().len(), 5);
    assert_eq!(doc["counts"]["total"], 8);
    assert!(doc["selected"].is_null());
}

#[test]
fn selection_cleared_when_filter_hides_it() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["faults", "--select", "F002", "--severity", "High"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fault F002").not());
}

#[test]
fn selection_kept_with_persist_policy() {
    let home = tempdir().unwrap();
    let config = home.path().join("dash.toml");
    fs::write(&config, "[views]\nselection_policy = \"persist\"\n").unwrap();

    ehv(&home)
        .arg("--config")
        .arg(&config)
        .args(["faults", "--select", "F002", "--severity", "High"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fault F002"));
}

#[test]
fn unknown_fault_selection_fails() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["faults", "--select", "F999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("F999"));
}

#[test]
fn invalid_config_is_rejected() {
    let home = tempdir().unwrap();
    let config = home.path().join("dash.toml");
    fs::write(&config, "[views]\nfault_page_size = 0\n").unwrap();

    ehv(&home)
        .arg("--config")
        .arg(&config)
        .arg("faults")
        .assert()
        .failure();
}

#[test]
fn substations_by_region() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["substations", "--region", "eastern"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kolkata 400/220 kV"))
        .stdout(predicate::str::contains("Bhubaneswar East 220 kV"))
        .stdout(predicate::str::contains("3 substations found"))
        .stdout(predicate::str::contains("Regional distribution"));
}

#[test]
fn lines_in_maintenance() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["lines", "--status", "maintenance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9-10"))
        .stdout(predicate::str::contains("Showing 1 to 1 of 1"));
}

#[test]
fn maintenance_without_asset_falls_back() {
    let home = tempdir().unwrap();
    ehv(&home)
        .arg("maintenance")
        .assert()
        .success()
        .stdout(predicate::str::contains("No Asset Data"))
        .stdout(predicate::str::contains("Back to Asset Health (/asset-health)"));
}

#[test]
fn maintenance_for_asset() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["maintenance", "--asset", "XFMR_400_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("400/220 kV Transformer 1"))
        .stdout(predicate::str::contains("Rajesh Kumar"))
        .stdout(predicate::str::contains("₹15,000"))
        .stdout(predicate::str::contains("Showing 1 to 4 of 4"));
}

#[test]
fn maintenance_scheduled_only() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["maintenance", "--asset", "XFMR_400_1", "--status", "scheduled"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scheduled Maintenance"))
        .stdout(predicate::str::contains("Rajesh Kumar").not());
}

#[test]
fn stats_group_by_severity() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["stats", "faults", "--by", "severity", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 8"));
}

#[test]
fn stats_unknown_field_fails() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["stats", "faults", "--by", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bogus"));
}

#[test]
fn route_to_substation() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["route", "/substation/1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kolkata"))
        .stdout(predicate::str::contains("Substation Details"));
}

#[test]
fn route_to_unknown_substation() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["route", "/substation/99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Substation Not Found"))
        .stdout(predicate::str::contains("Back to Grid Map"));
}

#[test]
fn route_to_non_numeric_substation() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["route", "/substation/abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Substation Details"))
        .stdout(predicate::str::contains("Back to Grid Map (/grid-map)"))
        .stdout(predicate::str::contains("404").not());
}

#[test]
fn route_to_unknown_page() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["route", "/nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("404 - Page Not Found"))
        .stdout(predicate::str::contains("Return to Home (/)"));
}

#[test]
fn route_to_asset_page_without_payload() {
    let home = tempdir().unwrap();
    ehv(&home)
        .args(["route", "/asset-details"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Layout:"))
        .stdout(predicate::str::contains("No Asset Data"));
}
