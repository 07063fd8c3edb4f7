//! Domain types shared by the engine and its store contracts.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Store-assigned service identifier.
pub type ServiceId = i64;
/// Store-assigned booking identifier.
pub type BookingId = i64;

/// A bookable service. The engine reads only `duration_minutes` and
/// `active`; the remaining fields are operator/display data owned by the
/// admin subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub description: Option<String>,
    /// Appointment length in minutes. Always positive.
    pub duration_minutes: u32,
    /// Price in cents.
    pub price_cents: i64,
    pub active: bool,
}

/// Recurring open hours for one day of the week. At most one entry per
/// weekday; `open < close` is enforced on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyScheduleEntry {
    pub day: Weekday,
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub active: bool,
}

/// A calendar-date override forcing zero availability, regardless of the
/// weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedDate {
    pub date: NaiveDate,
    pub reason: Option<String>,
}

/// Booking lifecycle state.
///
/// `Confirmed` is the only initial state. `Cancelled` and `Completed` are
/// terminal: no transition out of either is accepted. A cancelled booking
/// releases its interval — queries filter it out by status rather than
/// deleting the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    /// The full transition table: `confirmed -> completed` and
    /// `confirmed -> cancelled`. Everything else, including self-transitions,
    /// is rejected.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Confirmed, BookingStatus::Completed)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// Client contact details. Opaque to the engine; carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// A committed reservation over the half-open interval `[start, end)` on
/// `date`. `end` is computed once at creation (`start + service duration`)
/// and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub status: BookingStatus,
    pub client: ClientInfo,
}

/// A candidate appointment window within a day's open hours. Derived on
/// every query; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub available: bool,
}
