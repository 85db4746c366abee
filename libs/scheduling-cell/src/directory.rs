use std::collections::HashSet;

use chrono::NaiveTime;

use crate::error::DepartmentDirectoryError;
use crate::models::{DepartmentConfig, WorkingHours};

/// Immutable table of department configurations, built once at startup and
/// injected into the slot engine. Replaces the hidden module-level constant
/// the booking pages used to read.
#[derive(Debug, Clone)]
pub struct DepartmentDirectory {
    departments: Vec<DepartmentConfig>,
}

impl DepartmentDirectory {
    /// Validates every entry before accepting the table. Lunch windows must
    /// set both endpoints and lie within the working window; table authors
    /// should also keep lunch boundaries aligned to the slot grid, or the
    /// slot before lunch will run into it.
    pub fn new(departments: Vec<DepartmentConfig>) -> Result<Self, DepartmentDirectoryError> {
        let mut seen = HashSet::new();

        for config in &departments {
            if !seen.insert(config.id.clone()) {
                return Err(DepartmentDirectoryError::DuplicateDepartment(
                    config.id.clone(),
                ));
            }

            let hours = &config.working_hours;
            if hours.start >= hours.end {
                return Err(DepartmentDirectoryError::InvalidWorkingHours {
                    department: config.id.clone(),
                    start: hours.start,
                    end: hours.end,
                });
            }

            match (hours.lunch_start, hours.lunch_end) {
                (None, None) => {}
                (Some(lunch_start), Some(lunch_end)) => {
                    if lunch_start >= lunch_end
                        || lunch_start < hours.start
                        || lunch_end > hours.end
                    {
                        return Err(DepartmentDirectoryError::LunchOutsideWorkingHours {
                            department: config.id.clone(),
                            start: lunch_start,
                            end: lunch_end,
                        });
                    }
                }
                _ => {
                    return Err(DepartmentDirectoryError::PartialLunchBreak {
                        department: config.id.clone(),
                    });
                }
            }

            if config.service_time_minutes <= 0 {
                return Err(DepartmentDirectoryError::InvalidServiceTime {
                    department: config.id.clone(),
                    minutes: config.service_time_minutes,
                });
            }
        }

        Ok(Self { departments })
    }

    /// The built-in civic department table.
    pub fn with_defaults() -> Self {
        Self::new(default_departments()).expect("built-in department table is valid")
    }

    pub fn get(&self, department_id: &str) -> Option<&DepartmentConfig> {
        self.departments
            .iter()
            .find(|config| config.id == department_id)
    }

    pub fn all(&self) -> &[DepartmentConfig] {
        &self.departments
    }
}

fn default_departments() -> Vec<DepartmentConfig> {
    vec![
        DepartmentConfig {
            id: "revenue".to_string(),
            name: "Revenue & Land Records".to_string(),
            working_hours: WorkingHours::with_lunch_break(
                wall_clock(9, 0),
                wall_clock(17, 0),
                wall_clock(13, 0),
                wall_clock(14, 0),
            ),
            service_time_minutes: 20,
            max_daily_capacity: 60,
            slots_per_booking: 3,
        },
        DepartmentConfig {
            id: "transport".to_string(),
            name: "Transport & Driving Licences".to_string(),
            working_hours: WorkingHours::with_lunch_break(
                wall_clock(8, 0),
                wall_clock(20, 0),
                wall_clock(13, 0),
                wall_clock(14, 0),
            ),
            service_time_minutes: 30,
            max_daily_capacity: 80,
            slots_per_booking: 3,
        },
        DepartmentConfig {
            id: "municipal".to_string(),
            name: "Municipal Services".to_string(),
            working_hours: WorkingHours::with_lunch_break(
                wall_clock(9, 30),
                wall_clock(16, 30),
                wall_clock(12, 30),
                wall_clock(13, 30),
            ),
            service_time_minutes: 15,
            max_daily_capacity: 100,
            slots_per_booking: 5,
        },
        DepartmentConfig {
            id: "health".to_string(),
            name: "Public Health & Sanitation".to_string(),
            working_hours: WorkingHours::new(wall_clock(8, 0), wall_clock(14, 0)),
            service_time_minutes: 15,
            max_daily_capacity: 90,
            slots_per_booking: 4,
        },
        DepartmentConfig {
            id: "welfare".to_string(),
            name: "Social Welfare & Pensions".to_string(),
            working_hours: WorkingHours::with_lunch_break(
                wall_clock(10, 0),
                wall_clock(16, 0),
                wall_clock(13, 0),
                wall_clock(14, 0),
            ),
            service_time_minutes: 30,
            max_daily_capacity: 40,
            slots_per_booking: 3,
        },
    ]
}

fn wall_clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid wall-clock time")
}
