use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::BookingRecord;

/// Read side of the external persistence collaborator. Handlers fetch a
/// department's full booking snapshot (any date) through this seam; the
/// engine filters by calendar day itself. The booking write path, and with
/// it any double-booking race, lives entirely behind the real store.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn bookings_for_department(&self, department_id: &str) -> Result<Vec<BookingRecord>>;
}

/// Stand-in store keyed by department id, used by the binary and the tests.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    bookings: RwLock<HashMap<String, Vec<BookingRecord>>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, department_id: &str, booking: BookingRecord) {
        debug!(
            "Recording booking {} for department {} on {}",
            booking.id, department_id, booking.appointment_date
        );
        self.bookings
            .write()
            .await
            .entry(department_id.to_string())
            .or_default()
            .push(booking);
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn bookings_for_department(&self, department_id: &str) -> Result<Vec<BookingRecord>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(department_id).cloned().unwrap_or_default())
    }
}
