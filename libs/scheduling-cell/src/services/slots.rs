use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::directory::DepartmentDirectory;
use crate::models::{BookingRecord, CapacityInfo, DepartmentConfig, TimeSlot};

/// Slot-capacity and suggestion engine. Every query recomputes from the
/// injected directory and the caller's booking snapshot; there is no cache
/// and no mutable state, so concurrent callers always see identical,
/// independent results.
///
/// The caller is trusted to pass bookings already filtered to one
/// department; the engine only filters by calendar day.
#[derive(Debug, Clone)]
pub struct SlotManager {
    directory: Arc<DepartmentDirectory>,
}

impl SlotManager {
    pub fn new(directory: Arc<DepartmentDirectory>) -> Self {
        Self { directory }
    }

    pub fn department_config(&self, department_id: &str) -> Option<&DepartmentConfig> {
        self.directory.get(department_id)
    }

    pub fn departments(&self) -> &[DepartmentConfig] {
        self.directory.all()
    }

    /// Derive the full slot grid for one department day. Slots inside the
    /// lunch window are skipped without consuming an ordinal, and a trailing
    /// slot that would overrun closing time is dropped rather than shrunk.
    /// Unknown departments yield an empty grid.
    pub fn generate_time_slots(&self, department_id: &str, date: NaiveDate) -> Vec<TimeSlot> {
        let Some(config) = self.directory.get(department_id) else {
            debug!("Unknown department {}, generating no slots", department_id);
            return Vec::new();
        };

        let hours = &config.working_hours;
        let service_time = Duration::minutes(config.service_time_minutes as i64);

        let mut slots = Vec::new();
        let mut cursor = hours.start;
        let mut ordinal = 1;

        while cursor < hours.end {
            if let Some((lunch_start, lunch_end)) = hours.lunch_window() {
                if cursor >= lunch_start && cursor < lunch_end {
                    cursor = lunch_end;
                    continue;
                }
            }

            // overflowing_add_signed reports a wrap past midnight, which a
            // plain NaiveTime addition would silently fold back into the
            // working window.
            let (slot_end, wrapped) = cursor.overflowing_add_signed(service_time);
            if wrapped != 0 || slot_end > hours.end {
                break;
            }

            slots.push(TimeSlot {
                id: format!("{}-{}-{:03}", config.id, date, ordinal),
                start_time: cursor,
                end_time: slot_end,
                capacity: 1,
                booked: 0,
                available: true,
            });

            cursor = slot_end;
            ordinal += 1;
        }

        slots
    }

    /// Join the slot grid against the booking snapshot for `date`. Bookings
    /// are tallied by their raw `time_slot` string against each slot's
    /// start label, so a formatting drift in stored data leaves the slot
    /// reported as unbooked.
    pub fn get_available_slots(
        &self,
        department_id: &str,
        date: NaiveDate,
        bookings: &[BookingRecord],
    ) -> Vec<TimeSlot> {
        let mut slots = self.generate_time_slots(department_id, date);
        if slots.is_empty() {
            return slots;
        }

        let mut tally: HashMap<&str, i32> = HashMap::new();
        for booking in bookings {
            if booking.falls_on(date) {
                *tally.entry(booking.time_slot.as_str()).or_insert(0) += 1;
            }
        }

        for slot in &mut slots {
            slot.booked = tally
                .get(slot.start_label().as_str())
                .copied()
                .unwrap_or(0);
            slot.available = slot.booked < slot.capacity;
        }

        debug!(
            "Resolved {} slots for department {} on {}",
            slots.len(),
            department_id,
            date
        );
        slots
    }

    /// Earliest open slots, capped at the department's `slots_per_booking`.
    pub fn get_suggested_slots(
        &self,
        department_id: &str,
        date: NaiveDate,
        bookings: &[BookingRecord],
    ) -> Vec<TimeSlot> {
        let Some(config) = self.directory.get(department_id) else {
            return Vec::new();
        };

        self.get_available_slots(department_id, date, bookings)
            .into_iter()
            .filter(|slot| slot.available)
            .take(config.slots_per_booking)
            .collect()
    }

    /// Whether the slot starting at the exact `HH:MM` label `time_slot` is
    /// still open. Time strings that match no generated slot are never
    /// available.
    pub fn is_slot_available(
        &self,
        department_id: &str,
        date: NaiveDate,
        time_slot: &str,
        bookings: &[BookingRecord],
    ) -> bool {
        self.get_available_slots(department_id, date, bookings)
            .iter()
            .find(|slot| slot.start_label() == time_slot)
            .map(|slot| slot.available)
            .unwrap_or(false)
    }

    /// Coarse queue estimate: total booked work for the day, in minutes.
    /// Does not account for slots already elapsed or a service in progress.
    pub fn calculate_wait_time(
        &self,
        department_id: &str,
        date: NaiveDate,
        bookings: &[BookingRecord],
    ) -> i64 {
        let Some(config) = self.directory.get(department_id) else {
            return 0;
        };

        let booked: i64 = self
            .get_available_slots(department_id, date, bookings)
            .iter()
            .map(|slot| slot.booked as i64)
            .sum();

        booked * config.service_time_minutes as i64
    }

    pub fn get_capacity_info(
        &self,
        department_id: &str,
        date: NaiveDate,
        bookings: &[BookingRecord],
    ) -> CapacityInfo {
        let slots = self.get_available_slots(department_id, date, bookings);

        let total_capacity = slots.len() as i32;
        let booked: i32 = slots.iter().map(|slot| slot.booked).sum();
        let percentage = if total_capacity == 0 {
            0
        } else {
            (booked as f64 / total_capacity as f64 * 100.0).round() as i32
        };

        CapacityInfo {
            total_capacity,
            booked,
            available: total_capacity - booked,
            percentage,
        }
    }
}
