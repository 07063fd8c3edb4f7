//! # bookwise-engine
//!
//! Availability and conflict engine for appointment booking: turns a
//! recurring weekly schedule, date-level blocks, and a service duration into
//! discrete candidate slots, and guarantees that two concurrent reservation
//! attempts for overlapping times cannot both succeed.
//!
//! All times are wall-clock in one fixed operating timezone. Slot queries
//! are advisory snapshots; the booking transaction re-derives conflict state
//! inside the store's atomic check-then-insert, so a stale slot query can
//! never cause a double booking. The global invariant the crate protects:
//! for any date, the half-open `[start, end)` intervals of non-cancelled
//! bookings are pairwise disjoint.
//!
//! ## Modules
//!
//! - [`slots`] — weekly schedule + blocks + bookings → candidate slot list
//! - [`conflict`] — the single half-open overlap predicate
//! - [`engine`] — slot queries and the atomic booking transaction
//! - [`store`] — injected store contracts the engine is written against
//! - [`memory`] — in-memory store (test fake and CLI backing store)
//! - [`types`] — domain types
//! - [`error`] — error taxonomy

pub mod conflict;
pub mod engine;
pub mod error;
pub mod memory;
pub mod slots;
pub mod store;
pub mod types;

pub use conflict::overlaps;
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use memory::{MemoryStore, StoreSnapshot};
pub use slots::{generate_slots, SLOT_STEP_MINUTES};
pub use store::{
    BookingQuery, BookingStore, NewBooking, NewService, ScheduleStore, ServiceCatalog,
};
pub use types::{
    BlockedDate, Booking, BookingId, BookingStatus, ClientInfo, Service, ServiceId, TimeSlot,
    WeeklyScheduleEntry,
};
