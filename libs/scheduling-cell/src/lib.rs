pub mod directory;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export the engine surface for external use
pub use directory::DepartmentDirectory;
pub use error::DepartmentDirectoryError;
pub use models::{
    BookingRecord, CapacityInfo, DepartmentAvailabilityResponse, DepartmentConfig, TimeSlot,
    WorkingHours,
};
pub use services::{BookingStore, InMemoryBookingStore, SlotManager};
