//! Integration tests for the `bookwise` binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the seeded store
//! end-to-end: slot queries, booking, conflicts, cancellation, and
//! date-level blocks, with the JSON snapshot persisted in a temp directory.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// 2026-03-16 is a Monday; the seeded schedule opens it 09:00-17:00.
const MONDAY: &str = "2026-03-16";

fn bookwise(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bookwise").unwrap();
    cmd.arg("--store").arg(store);
    cmd
}

/// Fresh temp dir with a seeded store file. Service #2 is the 60-minute
/// Strategy Session.
fn seeded_store(dir: &TempDir) -> PathBuf {
    let store = dir.path().join("store.json");
    bookwise(&store).arg("init").assert().success();
    store
}

#[test]
fn init_seeds_services_and_schedule() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    bookwise(&store)
        .arg("services")
        .assert()
        .success()
        .stdout(predicate::str::contains("Strategy Session"))
        .stdout(predicate::str::contains("Initial Consultation"));

    bookwise(&store)
        .arg("schedule")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon"))
        .stdout(predicate::str::contains("09:00–17:00"));
}

#[test]
fn slots_for_open_monday_start_and_end_inside_open_hours() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    bookwise(&store)
        .args(["slots", "--date", MONDAY, "--service", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:00–10:00  available"))
        .stdout(predicate::str::contains("16:00–17:00  available"))
        // 16:30 + 60min would spill past closing and is never emitted.
        .stdout(predicate::str::contains("16:30").not());
}

#[test]
fn slots_json_output_is_a_full_slot_array() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    let output = bookwise(&store)
        .args(["slots", "--date", MONDAY, "--service", "2", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let slots: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let slots = slots.as_array().unwrap();
    // 09:00..16:00 starts at a 30-minute step.
    assert_eq!(slots.len(), 15);
    assert_eq!(slots[0]["available"], serde_json::Value::Bool(true));
}

#[test]
fn booking_marks_overlapping_slots_unavailable() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    bookwise(&store)
        .args([
            "book", "--service", "2", "--date", MONDAY, "--start", "10:00",
            "--name", "Alice Johnson", "--email", "alice@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("confirmed"));

    bookwise(&store)
        .args(["slots", "--date", MONDAY, "--service", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:30–10:30  booked"))
        .stdout(predicate::str::contains("10:00–11:00  booked"))
        .stdout(predicate::str::contains("11:00–12:00  available"));
}

#[test]
fn rebooking_a_taken_interval_fails_with_conflict() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    bookwise(&store)
        .args([
            "book", "--service", "2", "--date", MONDAY, "--start", "10:00",
            "--name", "Alice Johnson", "--email", "alice@example.com",
        ])
        .assert()
        .success();

    // Overlapping attempt: terminal failure, nothing written.
    bookwise(&store)
        .args([
            "book", "--service", "2", "--date", MONDAY, "--start", "10:30",
            "--name", "Bob Smith", "--email", "bob@example.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already booked"));

    bookwise(&store)
        .args(["bookings", "--date", MONDAY])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Johnson"))
        .stdout(predicate::str::contains("Bob Smith").not());
}

#[test]
fn cancelling_releases_the_slot() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    bookwise(&store)
        .args([
            "book", "--service", "2", "--date", MONDAY, "--start", "10:00",
            "--name", "Alice Johnson", "--email", "alice@example.com",
        ])
        .assert()
        .success();

    bookwise(&store).args(["cancel", "1"]).assert().success();

    bookwise(&store)
        .args(["slots", "--date", MONDAY, "--service", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10:00–11:00  available"));

    // Cancelled is terminal: completing it is rejected.
    bookwise(&store)
        .args(["complete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid status transition"));
}

#[test]
fn blocked_date_yields_no_slots() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    bookwise(&store)
        .args(["block", MONDAY, "--reason", "Public holiday"])
        .assert()
        .success();

    bookwise(&store)
        .args(["slots", "--date", MONDAY, "--service", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No slots"));

    bookwise(&store).args(["unblock", MONDAY]).assert().success();

    bookwise(&store)
        .args(["slots", "--date", MONDAY, "--service", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:00–10:00  available"));
}

#[test]
fn closed_sunday_yields_no_slots() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    // The seeded Sunday entry exists but is inactive.
    bookwise(&store)
        .args(["slots", "--date", "2026-03-15", "--service", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No slots"));
}

#[test]
fn deactivated_service_cannot_be_queried_or_booked() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    bookwise(&store)
        .args(["deactivate-service", "2"])
        .assert()
        .success();

    bookwise(&store)
        .args(["slots", "--date", MONDAY, "--service", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found or inactive"));
}

#[test]
fn missing_store_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("fresh.json");

    // No init: no services registered yet.
    bookwise(&store)
        .args(["slots", "--date", MONDAY, "--service", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found or inactive"));
}
