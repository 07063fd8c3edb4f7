//! The engine facade: advisory slot queries and the authoritative booking
//! transaction, over injected store capabilities.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use tracing::{info, warn};

use crate::conflict;
use crate::error::{EngineError, Result};
use crate::slots;
use crate::store::{BookingStore, NewBooking, ScheduleStore, ServiceCatalog};
use crate::types::{Booking, BookingId, BookingStatus, ClientInfo, ServiceId, TimeSlot};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Availability and conflict engine over a single injected store.
///
/// [`generate_slots`](Engine::generate_slots) is a pure read and may run
/// fully concurrently; its result is an advisory snapshot.
/// [`create_booking`](Engine::create_booking) is the only path that creates
/// reservations and re-derives conflict state inside the store's atomic
/// check-then-insert, so a stale slot query can never cause a double
/// booking.
pub struct Engine<S> {
    store: S,
}

impl<S> Engine<S>
where
    S: ServiceCatalog + ScheduleStore + BookingStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Candidate slots for one date and service, in ascending start order.
    ///
    /// A closed day, a blocked date, or a fully booked day yields an empty
    /// (or fully unavailable) sequence, not an error. The result is
    /// deterministic for identical store state.
    ///
    /// # Errors
    /// [`EngineError::ServiceUnavailable`] when the service is missing or
    /// inactive.
    pub fn generate_slots(&self, date: NaiveDate, service_id: ServiceId) -> Result<Vec<TimeSlot>> {
        let service = self
            .store
            .active_service(service_id)?
            .ok_or(EngineError::ServiceUnavailable(service_id))?;

        let entry = self.store.weekly_entry(date.weekday())?;
        let blocked = self.store.is_date_blocked(date)?;
        let bookings = self.store.bookings_for_date(date)?;

        Ok(slots::generate_slots(
            entry.as_ref(),
            blocked,
            &bookings,
            service.duration_minutes,
        ))
    }

    /// Atomically create a confirmed booking, or fail with no side effects.
    ///
    /// The conflict check runs inside the store's atomic check-then-insert
    /// against the live non-cancelled set for the date, using the same
    /// half-open predicate as slot generation. It is mandatory even when the
    /// caller consulted [`generate_slots`](Engine::generate_slots) moments
    /// earlier: another request may have committed in between. A
    /// [`EngineError::SlotConflict`] is terminal for this request; the engine
    /// never retries, the caller must re-query and pick another interval.
    pub fn create_booking(
        &self,
        service_id: ServiceId,
        date: NaiveDate,
        start: NaiveTime,
        client: ClientInfo,
    ) -> Result<Booking> {
        let service = self
            .store
            .active_service(service_id)?
            .ok_or(EngineError::ServiceUnavailable(service_id))?;

        // A zero-width [start, start) interval would conflict with nothing
        // and be invisible to slot queries; the store rejects such services
        // on registration, but snapshot data is not trusted here.
        if service.duration_minutes == 0 {
            return Err(EngineError::InvalidService(
                "duration must be positive".to_string(),
            ));
        }

        // end = start + duration, computed once here and never recomputed.
        let end_minutes = (start.num_seconds_from_midnight() / 60)
            .checked_add(service.duration_minutes)
            .filter(|&m| m < MINUTES_PER_DAY)
            .ok_or(EngineError::InvalidStartTime {
                start,
                duration_minutes: service.duration_minutes,
            })?;
        let end = NaiveTime::from_hms_opt(end_minutes / 60, end_minutes % 60, 0).ok_or(
            EngineError::InvalidStartTime {
                start,
                duration_minutes: service.duration_minutes,
            },
        )?;

        let record = NewBooking {
            service_id,
            date,
            start,
            end,
            client,
        };

        let result = self
            .store
            .insert_booking_atomic(record, &|existing: &Booking| {
                conflict::conflicts_with(start, end, existing)
            });

        match &result {
            Ok(booking) => {
                info!(id = booking.id, %date, %start, %end, service_id, "booking confirmed");
            }
            Err(EngineError::SlotConflict { .. }) => {
                warn!(%date, %start, %end, service_id, "booking rejected: slot conflict");
            }
            Err(_) => {}
        }

        result
    }

    /// Apply a status change through the enforced transition table.
    ///
    /// Only `confirmed -> completed` and `confirmed -> cancelled` are
    /// accepted; `cancelled` and `completed` are terminal. Cancelling
    /// releases the interval: subsequent slot queries and conflict checks
    /// treat the booking as if it never existed.
    pub fn update_booking_status(&self, id: BookingId, next: BookingStatus) -> Result<Booking> {
        let booking = self
            .store
            .booking(id)?
            .ok_or(EngineError::BookingNotFound(id))?;

        if !booking.status.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                from: booking.status,
                to: next,
            });
        }

        let updated = self.store.update_booking_status(id, next)?;
        info!(id, from = %booking.status, to = %next, "booking status updated");
        Ok(updated)
    }

    pub fn cancel_booking(&self, id: BookingId) -> Result<Booking> {
        self.update_booking_status(id, BookingStatus::Cancelled)
    }

    pub fn complete_booking(&self, id: BookingId) -> Result<Booking> {
        self.update_booking_status(id, BookingStatus::Completed)
    }
}
