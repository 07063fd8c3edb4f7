//! Tests for the half-open overlap predicate.
//!
//! This predicate is the only definition of "conflict" in the system, so its
//! edge cases (especially adjacency) are pinned down exhaustively here.

use bookwise_engine::overlaps;
use chrono::NaiveTime;

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

#[test]
fn partial_overlap_detected() {
    // [09:00,10:00) vs [09:30,10:30)
    assert!(overlaps(t("09:00"), t("10:00"), t("09:30"), t("10:30")));
    // Symmetric
    assert!(overlaps(t("09:30"), t("10:30"), t("09:00"), t("10:00")));
}

#[test]
fn containment_is_overlap() {
    // [09:00,12:00) contains [10:00,11:00)
    assert!(overlaps(t("09:00"), t("12:00"), t("10:00"), t("11:00")));
    assert!(overlaps(t("10:00"), t("11:00"), t("09:00"), t("12:00")));
}

#[test]
fn identical_intervals_overlap() {
    assert!(overlaps(t("09:00"), t("10:00"), t("09:00"), t("10:00")));
}

#[test]
fn adjacent_intervals_do_not_overlap() {
    // One ends exactly when the other starts: half-open, not a conflict.
    assert!(!overlaps(t("09:00"), t("10:00"), t("10:00"), t("11:00")));
    assert!(!overlaps(t("10:00"), t("11:00"), t("09:00"), t("10:00")));
}

#[test]
fn disjoint_intervals_do_not_overlap() {
    assert!(!overlaps(t("09:00"), t("10:00"), t("11:00"), t("12:00")));
}

#[test]
fn shared_start_overlaps() {
    // Same start instant, different lengths.
    assert!(overlaps(t("09:00"), t("09:30"), t("09:00"), t("10:00")));
}
