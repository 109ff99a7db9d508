//! Integration tests for the `adst` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand
//! through the actual binary, including JSON output, rules files and error exits.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn us_rules_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/us_rules.json")
}

fn invalid_rules_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid_rules.json")
}

fn adst() -> Command {
    Command::cargo_bin("adst").unwrap()
}

/// Helper: run with --json and parse stdout.
fn json_output(args: &[&str]) -> serde_json::Value {
    let output = adst().args(args).arg("--json").output().unwrap();
    assert!(output.status.success(), "adst {:?} failed", args);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// break / make / dotw
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn break_epoch() {
    adst()
        .args(["break", "0"])
        .assert()
        .success()
        .stdout("1970-01-01T00:00:00 Thu\n");
}

#[test]
fn break_json_has_calendar_fields() {
    let v = json_output(&["break", "1772935200"]);
    assert_eq!(v["year"], 2026);
    assert_eq!(v["month"], 3);
    assert_eq!(v["day"], 8);
    assert_eq!(v["hour"], 2);
    assert_eq!(v["weekday"], 0);
}

#[test]
fn break_rejects_negative_counter() {
    adst().args(["break", "--", "-1"]).assert().failure();
}

#[test]
fn make_known_instant() {
    adst()
        .args(["make", "2026-03-08T02:00:00"])
        .assert()
        .success()
        .stdout("1772935200\n");
}

#[test]
fn make_json() {
    let v = json_output(&["make", "1970-01-02T00:00:00"]);
    assert_eq!(v["seconds"], 86400);
}

#[test]
fn make_rejects_impossible_date() {
    adst()
        .args(["make", "2026-02-30T00:00:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date/time"));
}

#[test]
fn make_rejects_date_before_epoch() {
    adst()
        .args(["make", "1969-12-31T23:59:59"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Out of range"));
}

#[test]
fn dotw_sunday() {
    adst()
        .args(["dotw", "2026-03-08"])
        .assert()
        .success()
        .stdout("0 Sun\n");
}

#[test]
fn dotw_json() {
    let v = json_output(&["dotw", "2000-01-01"]);
    assert_eq!(v["weekday"], 6);
    assert_eq!(v["name"], "Sat");
}

// ─────────────────────────────────────────────────────────────────────────────
// transitions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn transitions_default_preset_is_us() {
    adst()
        .args(["transitions", "2026"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-03-08T02:00:00 Sun (1772935200)"))
        .stdout(predicate::str::contains("2026-11-01T01:00:00 Sun (1793494800)"))
        .stdout(predicate::str::contains("DST spans New Year").not());
}

#[test]
fn transitions_southern_preset_wraps() {
    adst()
        .args(["transitions", "2026", "--preset", "au"])
        .assert()
        .success()
        .stdout(predicate::str::contains("start:  2026-10-04T02:00:00"))
        .stdout(predicate::str::contains("end:    2026-04-05T02:00:00"))
        .stdout(predicate::str::contains("DST spans New Year"));
}

#[test]
fn transitions_from_rules_file() {
    adst()
        .args(["transitions", "2027", "--rules", us_rules_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2027-03-14T02:00:00"))
        .stdout(predicate::str::contains("2027-11-07T02:00:00"));
}

#[test]
fn transitions_json() {
    let v = json_output(&["transitions", "2026", "--preset", "eu"]);
    assert_eq!(v["year"], 2026);
    assert_eq!(v["start"]["day"], 29);
    assert_eq!(v["end"]["day"], 25);
}

#[test]
fn transitions_unknown_preset() {
    adst()
        .args(["transitions", "2026", "--preset", "mars"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset: 'mars'"));
}

#[test]
fn transitions_missing_rules_file() {
    adst()
        .args(["transitions", "2026", "--rules", "/nonexistent/rules.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read rules file"));
}

#[test]
fn transitions_invalid_rules_file() {
    adst()
        .args(["transitions", "2026", "--rules", invalid_rules_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid DST rule: month = 13"));
}

#[test]
fn transitions_year_outside_clock() {
    adst()
        .args(["transitions", "1960"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the clock range"));
}

// ─────────────────────────────────────────────────────────────────────────────
// offset
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn offset_in_summer() {
    adst()
        .args(["offset", "2026-07-04T12:00:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode:   Auto"))
        .stdout(predicate::str::contains("offset: 1"))
        .stdout(predicate::str::contains("2026-07-04T13:00:00 Sat"));
}

#[test]
fn offset_in_winter() {
    adst()
        .args(["offset", "2026-01-15T12:00:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offset: 0"))
        .stdout(predicate::str::contains("2026-01-15T12:00:00"));
}

#[test]
fn offset_mode_off_and_on() {
    adst()
        .args(["offset", "2026-07-04T12:00:00", "--mode", "off"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offset: 0"));

    adst()
        .args(["offset", "2026-01-15T12:00:00", "--mode", "on"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offset: 1"));
}

#[test]
fn offset_json() {
    let v = json_output(&["offset", "2026-07-04T23:30:00", "--preset", "us"]);
    assert_eq!(v["mode"], "Auto");
    assert_eq!(v["offset"], 1);
    assert_eq!(v["standard"]["hour"], 23);
    assert_eq!(v["local"]["day"], 5);
    assert_eq!(v["local"]["hour"], 0);
}

#[test]
fn offset_at_start_instant() {
    adst()
        .args(["offset", "2026-03-08T02:00:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offset: 1"));

    adst()
        .args(["offset", "2026-03-08T01:59:59"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offset: 0"));
}

#[test]
fn offset_unknown_mode() {
    adst()
        .args(["offset", "2026-07-04T12:00:00", "--mode", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --mode"));
}

// ─────────────────────────────────────────────────────────────────────────────
// presets / general
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn presets_lists_all_names() {
    adst()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("us"))
        .stdout(predicate::str::contains("last Sun Sep 02:00"))
        .stdout(predicate::str::contains("New Zealand"));
}

#[test]
fn presets_json() {
    let v = json_output(&["presets"]);
    let list = v.as_array().expect("presets JSON is an array");
    assert_eq!(list.len(), 5);
    assert_eq!(list[0]["name"], "us");
    assert_eq!(list[0]["rules"]["start"]["week"], 2);
}

#[test]
fn verbose_logs_rule_resolution() {
    adst()
        .args(["-v", "transitions", "2026"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("resolved DST for 2026"));
}

#[test]
fn no_subcommand_shows_usage() {
    adst()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
