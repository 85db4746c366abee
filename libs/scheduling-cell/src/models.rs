use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Daily working window of a department counter. All times are wall-clock
/// in the department's local zone; nothing here is date-qualified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub lunch_start: Option<NaiveTime>,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub lunch_end: Option<NaiveTime>,
}

impl WorkingHours {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            lunch_start: None,
            lunch_end: None,
        }
    }

    pub fn with_lunch_break(
        start: NaiveTime,
        end: NaiveTime,
        lunch_start: NaiveTime,
        lunch_end: NaiveTime,
    ) -> Self {
        Self {
            start,
            end,
            lunch_start: Some(lunch_start),
            lunch_end: Some(lunch_end),
        }
    }

    pub fn lunch_window(&self) -> Option<(NaiveTime, NaiveTime)> {
        match (self.lunch_start, self.lunch_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentConfig {
    pub id: String,
    pub name: String,
    pub working_hours: WorkingHours,
    /// Duration of one citizen service, and therefore of one slot.
    pub service_time_minutes: i32,
    /// Informational daily ceiling shown to admins; slot generation does
    /// not enforce it.
    pub max_daily_capacity: i32,
    /// How many open slots to surface to a citizen on the booking page.
    pub slots_per_booking: usize,
}

/// One bookable slot, recomputed per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub capacity: i32,
    pub booked: i32,
    pub available: bool,
}

impl TimeSlot {
    /// The `HH:MM` label bookings are matched against.
    pub fn start_label(&self) -> String {
        self.start_time.format(HHMM_FORMAT).to_string()
    }
}

/// Snapshot of a booking row as handed over by the persistence layer.
///
/// `appointment_date` and `time_slot` stay raw strings on purpose: the
/// engine matches `time_slot` against generated start labels by exact
/// string equality (no normalization, so `"8:00"` never matches
/// `"08:00"`), and treats an unparsable `appointment_date` as belonging to
/// no date at all rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: Uuid,
    pub appointment_date: String,
    pub time_slot: String,
}

impl BookingRecord {
    pub fn new(appointment_date: impl Into<String>, time_slot: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            appointment_date: appointment_date.into(),
            time_slot: time_slot.into(),
        }
    }

    /// Calendar-day comparison: the civil date written in the stored string
    /// decides, ignoring time-of-day and any same-day offset.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        parse_calendar_day(&self.appointment_date) == Some(date)
    }
}

fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Aggregate occupancy of a department's day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityInfo {
    pub total_capacity: i32,
    pub booked: i32,
    pub available: i32,
    pub percentage: i32,
}

// DTO for the booking-page response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentAvailabilityResponse {
    pub department_config: DepartmentConfig,
    pub suggested_slots: Vec<TimeSlot>,
    pub capacity_info: CapacityInfo,
}

pub(crate) const HHMM_FORMAT: &str = "%H:%M";

/// Serde adapter keeping wall-clock times as `HH:MM` on the wire.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::HHMM_FORMAT;

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(HHMM_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, HHMM_FORMAT).map_err(serde::de::Error::custom)
    }
}

pub mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::HHMM_FORMAT;

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => serializer.serialize_some(&time.format(HHMM_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|value| {
            NaiveTime::parse_from_str(&value, HHMM_FORMAT).map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
