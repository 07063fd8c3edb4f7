//! Store contracts the engine is written against.
//!
//! The engine never touches a database or global state directly; it receives
//! these capabilities by injection, so its logic runs identically over the
//! in-memory store used in tests and the CLI ([`crate::memory::MemoryStore`])
//! or any persistent implementation. Infrastructure failures surface as
//! [`EngineError::Store`](crate::EngineError::Store) and are never retried
//! inside the engine.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{
    BlockedDate, Booking, BookingId, BookingStatus, ClientInfo, Service, ServiceId,
    WeeklyScheduleEntry,
};

/// Request to register a new service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: u32,
    pub price_cents: i64,
}

/// Request to insert a booking. `end` is precomputed by the engine as
/// `start + service duration`; the store assigns the id and the initial
/// `confirmed` status.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub client: ClientInfo,
}

/// Optional filters for the admin booking listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingQuery {
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
}

/// Read/write access to the service catalog.
pub trait ServiceCatalog: Send + Sync {
    /// The service, only if it exists AND is active.
    fn active_service(&self, id: ServiceId) -> Result<Option<Service>>;

    /// The service regardless of its active flag.
    fn service(&self, id: ServiceId) -> Result<Option<Service>>;

    /// Registers a service. Rejects `duration_minutes == 0`.
    fn add_service(&self, service: NewService) -> Result<Service>;

    /// Soft delete: clears the active flag, keeping history intact.
    fn deactivate_service(&self, id: ServiceId) -> Result<Service>;

    /// Services ordered by name.
    fn list_services(&self, include_inactive: bool) -> Result<Vec<Service>>;
}

/// Read/write access to the weekly schedule and blocked dates.
pub trait ScheduleStore: Send + Sync {
    fn weekly_entry(&self, day: Weekday) -> Result<Option<WeeklyScheduleEntry>>;

    /// Upsert the entry for its weekday. Rejects `open >= close`.
    fn set_weekly_entry(&self, entry: WeeklyScheduleEntry) -> Result<()>;

    /// All entries, ordered Sunday through Saturday.
    fn weekly_schedule(&self) -> Result<Vec<WeeklyScheduleEntry>>;

    fn is_date_blocked(&self, date: NaiveDate) -> Result<bool>;

    /// Returns false when the date was already blocked.
    fn block_date(&self, date: NaiveDate, reason: Option<String>) -> Result<bool>;

    /// Returns false when the date was not blocked.
    fn unblock_date(&self, date: NaiveDate) -> Result<bool>;

    /// Blocked dates ordered by date.
    fn blocked_dates(&self) -> Result<Vec<BlockedDate>>;
}

/// Read/write access to reservations.
pub trait BookingStore: Send + Sync {
    /// Non-cancelled bookings for the date, ordered by start time.
    fn bookings_for_date(&self, date: NaiveDate) -> Result<Vec<Booking>>;

    /// Atomically check-then-insert.
    ///
    /// The store evaluates `conflicts` against every live non-cancelled
    /// booking on `record.date` and inserts only when none matches,
    /// returning [`EngineError::SlotConflict`](crate::EngineError::SlotConflict)
    /// otherwise with nothing written. The predicate evaluation and the
    /// insert MUST be indivisible with respect to any other call for the
    /// same date; implementations hold a lock scoped at least to the date
    /// across both steps. This is the only write path allowed to create
    /// bookings.
    fn insert_booking_atomic(
        &self,
        record: NewBooking,
        conflicts: &dyn Fn(&Booking) -> bool,
    ) -> Result<Booking>;

    fn booking(&self, id: BookingId) -> Result<Option<Booking>>;

    /// Raw status write. The transition table lives above this, in
    /// [`Engine::update_booking_status`](crate::Engine::update_booking_status).
    fn update_booking_status(&self, id: BookingId, status: BookingStatus) -> Result<Booking>;

    /// Filtered listing, ordered by date descending then start ascending.
    fn list_bookings(&self, query: &BookingQuery) -> Result<Vec<Booking>>;
}
