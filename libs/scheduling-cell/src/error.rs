use chrono::NaiveTime;
use thiserror::Error;

/// Rejections raised while building a `DepartmentDirectory`. The engine
/// itself is total; only the configuration table can be malformed, and that
/// surfaces at startup.
#[derive(Error, Debug)]
pub enum DepartmentDirectoryError {
    #[error("department {department}: working hours start {start} must be before end {end}")]
    InvalidWorkingHours {
        department: String,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("department {department}: lunch break must set both start and end")]
    PartialLunchBreak { department: String },

    #[error("department {department}: lunch break {start}-{end} must be ordered and lie within working hours")]
    LunchOutsideWorkingHours {
        department: String,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("department {department}: service time must be positive, got {minutes}")]
    InvalidServiceTime { department: String, minutes: i32 },

    #[error("duplicate department id: {0}")]
    DuplicateDepartment(String),
}
