pub mod bookings;
pub mod slots;

pub use bookings::{BookingStore, InMemoryBookingStore};
pub use slots::SlotManager;
