//! Error types for engine operations.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::types::{BookingId, BookingStatus, ServiceId};

#[derive(Error, Debug)]
pub enum EngineError {
    /// The requested service does not exist or is inactive. Not retryable
    /// without choosing another service.
    #[error("service {0} not found or inactive")]
    ServiceUnavailable(ServiceId),

    /// An overlapping non-cancelled booking was found at commit time. The
    /// caller must re-query availability and resubmit a different interval.
    #[error("slot {start}-{end} on {date} is already booked")]
    SlotConflict {
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },

    /// The booking id does not exist in the store.
    #[error("booking {0} not found")]
    BookingNotFound(BookingId),

    /// Rejected status change. `cancelled` and `completed` are terminal.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Rejected weekly schedule write (e.g. open time not before close time).
    #[error("invalid schedule entry: {0}")]
    InvalidSchedule(String),

    /// Rejected service definition (e.g. zero duration).
    #[error("invalid service: {0}")]
    InvalidService(String),

    /// The booking's computed end time would cross midnight.
    #[error("start {start} plus {duration_minutes} minutes does not fit in the day")]
    InvalidStartTime {
        start: NaiveTime,
        duration_minutes: u32,
    },

    /// Infrastructure failure from a backing store. Opaque; never retried
    /// inside the engine.
    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
