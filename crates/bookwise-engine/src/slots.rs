//! Candidate slot generation.
//!
//! Maps (weekly entry, blocked flag, existing bookings, service duration) to
//! an ordered list of fixed-step candidate windows, each flagged available or
//! not. Pure and deterministic: identical inputs always yield identical
//! output. A closed day, a blocked date, or a fully booked day is a valid
//! empty result, not an error.

use chrono::{NaiveTime, Timelike};
use tracing::debug;

use crate::conflict;
use crate::types::{Booking, BookingStatus, TimeSlot, WeeklyScheduleEntry};

/// Candidate start times step forward in fixed 30-minute increments.
pub const SLOT_STEP_MINUTES: u32 = 30;

fn minutes_from_midnight(t: NaiveTime) -> u32 {
    t.num_seconds_from_midnight() / 60
}

fn time_from_minutes(m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(m / 60, m % 60, 0)
}

/// Generate the candidate slots for one day.
///
/// - No entry, or an inactive entry, yields an empty sequence (closed day).
/// - `date_blocked` forces an empty sequence regardless of the entry.
/// - Candidates start at `entry.open` and step by [`SLOT_STEP_MINUTES`]; a
///   candidate `[t, t + duration)` is emitted only while `t + duration`
///   still fits inside `entry.close`, so the last slot never spills past
///   closing. A duration longer than the whole window yields nothing.
/// - A candidate is unavailable iff it overlaps any non-cancelled booking
///   under the half-open rule in [`crate::conflict`].
///
/// The result is sorted ascending by start time.
pub fn generate_slots(
    entry: Option<&WeeklyScheduleEntry>,
    date_blocked: bool,
    bookings: &[Booking],
    duration_minutes: u32,
) -> Vec<TimeSlot> {
    let Some(entry) = entry else {
        return Vec::new();
    };
    if !entry.active || date_blocked || duration_minutes == 0 {
        return Vec::new();
    }

    let open = minutes_from_midnight(entry.open);
    let close = minutes_from_midnight(entry.close);

    let mut slots = Vec::new();
    let mut t = open;
    while t + duration_minutes <= close {
        let (Some(start), Some(end)) = (time_from_minutes(t), time_from_minutes(t + duration_minutes))
        else {
            break;
        };

        let booked = bookings
            .iter()
            .filter(|b| b.status != BookingStatus::Cancelled)
            .any(|b| conflict::conflicts_with(start, end, b));

        slots.push(TimeSlot {
            start,
            end,
            available: !booked,
        });

        t += SLOT_STEP_MINUTES;
    }

    debug!(
        day = %entry.day,
        duration_minutes,
        total = slots.len(),
        available = slots.iter().filter(|s| s.available).count(),
        "generated candidate slots"
    );

    slots
}
