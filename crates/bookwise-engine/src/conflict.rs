//! The overlap predicate.
//!
//! This is the single definition of "conflict" in the system. Both advisory
//! slot marking ([`crate::slots`]) and the authoritative commit-time check
//! ([`crate::engine::Engine::create_booking`]) call this exact rule, so what
//! a slot query shows as available is consistent with what a booking commit
//! will accept.

use chrono::NaiveTime;

use crate::types::Booking;

/// Whether two half-open intervals `[a_start, a_end)` and `[b_start, b_end)`
/// overlap: `a_start < b_end && b_start < a_end`.
///
/// Adjacent intervals, where one ends exactly when the other starts, do NOT
/// overlap.
pub fn overlaps(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whether the candidate interval `[start, end)` conflicts with an existing
/// booking's interval.
pub fn conflicts_with(start: NaiveTime, end: NaiveTime, booking: &Booking) -> bool {
    overlaps(start, end, booking.start, booking.end)
}
