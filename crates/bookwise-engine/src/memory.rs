//! In-memory store backing the engine.
//!
//! Serves two roles: the test fake for the store contracts, and the CLI's
//! working store (persisted between runs via [`StoreSnapshot`]). Bookings are
//! kept in a [`DashMap`] keyed by date; `insert_booking_atomic` performs its
//! check-then-insert while holding the date entry's write guard, which
//! serializes writers for the same date (and shard) while leaving reads and
//! other dates concurrent.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{NaiveDate, Weekday};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::store::{BookingQuery, BookingStore, NewBooking, NewService, ScheduleStore, ServiceCatalog};
use crate::types::{
    BlockedDate, Booking, BookingId, BookingStatus, Service, ServiceId, WeeklyScheduleEntry,
};

/// Serializable snapshot of the whole store state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub services: Vec<Service>,
    pub schedule: Vec<WeeklyScheduleEntry>,
    pub blocked_dates: Vec<BlockedDate>,
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    services: DashMap<ServiceId, Service>,
    schedule: DashMap<Weekday, WeeklyScheduleEntry>,
    blocked: DashMap<NaiveDate, BlockedDate>,
    bookings: DashMap<NaiveDate, Vec<Booking>>,
    next_service_id: AtomicI64,
    next_booking_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_service_id: AtomicI64::new(1),
            next_booking_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// Rebuild a store from a snapshot. Id counters resume past the highest
    /// id present.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let store = Self::new();

        let mut max_service_id = 0;
        for service in snapshot.services {
            max_service_id = max_service_id.max(service.id);
            store.services.insert(service.id, service);
        }
        store
            .next_service_id
            .store(max_service_id + 1, Ordering::SeqCst);

        for entry in snapshot.schedule {
            store.schedule.insert(entry.day, entry);
        }
        for blocked in snapshot.blocked_dates {
            store.blocked.insert(blocked.date, blocked);
        }

        let mut max_booking_id = 0;
        for booking in snapshot.bookings {
            max_booking_id = max_booking_id.max(booking.id);
            store.bookings.entry(booking.date).or_default().push(booking);
        }
        store
            .next_booking_id
            .store(max_booking_id + 1, Ordering::SeqCst);

        store
    }

    /// Capture the current state, with every collection in a stable order.
    pub fn snapshot(&self) -> StoreSnapshot {
        let mut services: Vec<Service> = self.services.iter().map(|s| s.value().clone()).collect();
        services.sort_by_key(|s| s.id);

        let mut schedule: Vec<WeeklyScheduleEntry> =
            self.schedule.iter().map(|e| *e.value()).collect();
        schedule.sort_by_key(|e| e.day.num_days_from_sunday());

        let mut blocked_dates: Vec<BlockedDate> =
            self.blocked.iter().map(|b| b.value().clone()).collect();
        blocked_dates.sort_by_key(|b| b.date);

        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .flat_map(|day| day.value().clone())
            .collect();
        bookings.sort_by_key(|b| (b.date, b.start, b.id));

        StoreSnapshot {
            services,
            schedule,
            blocked_dates,
            bookings,
        }
    }
}

impl ServiceCatalog for MemoryStore {
    fn active_service(&self, id: ServiceId) -> Result<Option<Service>> {
        Ok(self
            .services
            .get(&id)
            .filter(|s| s.active)
            .map(|s| s.value().clone()))
    }

    fn service(&self, id: ServiceId) -> Result<Option<Service>> {
        Ok(self.services.get(&id).map(|s| s.value().clone()))
    }

    fn add_service(&self, service: NewService) -> Result<Service> {
        if service.duration_minutes == 0 {
            return Err(EngineError::InvalidService(
                "duration must be positive".to_string(),
            ));
        }
        let id = self.next_service_id.fetch_add(1, Ordering::SeqCst);
        let service = Service {
            id,
            name: service.name,
            description: service.description,
            duration_minutes: service.duration_minutes,
            price_cents: service.price_cents,
            active: true,
        };
        self.services.insert(id, service.clone());
        Ok(service)
    }

    fn deactivate_service(&self, id: ServiceId) -> Result<Service> {
        let mut service = self
            .services
            .get_mut(&id)
            .ok_or(EngineError::ServiceUnavailable(id))?;
        service.active = false;
        Ok(service.value().clone())
    }

    fn list_services(&self, include_inactive: bool) -> Result<Vec<Service>> {
        let mut services: Vec<Service> = self
            .services
            .iter()
            .filter(|s| include_inactive || s.active)
            .map(|s| s.value().clone())
            .collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }
}

impl ScheduleStore for MemoryStore {
    fn weekly_entry(&self, day: Weekday) -> Result<Option<WeeklyScheduleEntry>> {
        Ok(self.schedule.get(&day).map(|e| *e.value()))
    }

    fn set_weekly_entry(&self, entry: WeeklyScheduleEntry) -> Result<()> {
        if entry.open >= entry.close {
            return Err(EngineError::InvalidSchedule(format!(
                "open {} must be before close {}",
                entry.open, entry.close
            )));
        }
        self.schedule.insert(entry.day, entry);
        Ok(())
    }

    fn weekly_schedule(&self) -> Result<Vec<WeeklyScheduleEntry>> {
        let mut entries: Vec<WeeklyScheduleEntry> =
            self.schedule.iter().map(|e| *e.value()).collect();
        entries.sort_by_key(|e| e.day.num_days_from_sunday());
        Ok(entries)
    }

    fn is_date_blocked(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.blocked.contains_key(&date))
    }

    fn block_date(&self, date: NaiveDate, reason: Option<String>) -> Result<bool> {
        if self.blocked.contains_key(&date) {
            return Ok(false);
        }
        self.blocked.insert(date, BlockedDate { date, reason });
        Ok(true)
    }

    fn unblock_date(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.blocked.remove(&date).is_some())
    }

    fn blocked_dates(&self) -> Result<Vec<BlockedDate>> {
        let mut dates: Vec<BlockedDate> = self.blocked.iter().map(|b| b.value().clone()).collect();
        dates.sort_by_key(|b| b.date);
        Ok(dates)
    }
}

impl BookingStore for MemoryStore {
    fn bookings_for_date(&self, date: NaiveDate) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .get(&date)
            .map(|day| {
                day.iter()
                    .filter(|b| b.status != BookingStatus::Cancelled)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        bookings.sort_by_key(|b| b.start);
        Ok(bookings)
    }

    fn insert_booking_atomic(
        &self,
        record: NewBooking,
        conflicts: &dyn Fn(&Booking) -> bool,
    ) -> Result<Booking> {
        // The entry guard holds the shard's write lock for the whole
        // check-then-insert, so no other writer for this date can interleave
        // between the predicate evaluation and the push.
        let mut day = self.bookings.entry(record.date).or_default();

        if day
            .iter()
            .filter(|b| b.status != BookingStatus::Cancelled)
            .any(|b| conflicts(b))
        {
            return Err(EngineError::SlotConflict {
                date: record.date,
                start: record.start,
                end: record.end,
            });
        }

        let id = self.next_booking_id.fetch_add(1, Ordering::SeqCst);
        let booking = Booking {
            id,
            service_id: record.service_id,
            date: record.date,
            start: record.start,
            end: record.end,
            status: BookingStatus::Confirmed,
            client: record.client,
        };
        day.push(booking.clone());
        Ok(booking)
    }

    fn booking(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self
            .bookings
            .iter()
            .find_map(|day| day.iter().find(|b| b.id == id).cloned()))
    }

    fn update_booking_status(&self, id: BookingId, status: BookingStatus) -> Result<Booking> {
        for mut day in self.bookings.iter_mut() {
            if let Some(booking) = day.iter_mut().find(|b| b.id == id) {
                booking.status = status;
                return Ok(booking.clone());
            }
        }
        Err(EngineError::BookingNotFound(id))
    }

    fn list_bookings(&self, query: &BookingQuery) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .flat_map(|day| day.value().clone())
            .filter(|b| {
                query.date.is_none_or(|d| b.date == d)
                    && query.from.is_none_or(|d| b.date >= d)
                    && query.to.is_none_or(|d| b.date <= d)
                    && query.status.is_none_or(|s| b.status == s)
            })
            .collect();
        // Newest day first, then chronological within the day.
        bookings.sort_by(|a, b| b.date.cmp(&a.date).then(a.start.cmp(&b.start)));
        Ok(bookings)
    }
}
