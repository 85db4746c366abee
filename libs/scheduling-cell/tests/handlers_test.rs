use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Path, Query, State};
use chrono::{NaiveDate, NaiveTime};

use scheduling_cell::handlers::{
    check_slot_availability, get_available_slots, get_capacity_info, get_department,
    get_suggested_slots, get_wait_time, list_departments, AppState, SlotCheckQuery, SlotQuery,
};
use scheduling_cell::{
    BookingRecord, DepartmentDirectory, InMemoryBookingStore, SlotManager,
};
use shared_models::error::AppError;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid test date")
}

fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid test time")
}

fn create_test_state() -> (Arc<AppState>, Arc<InMemoryBookingStore>) {
    let directory = Arc::new(DepartmentDirectory::with_defaults());
    let store = Arc::new(InMemoryBookingStore::new());
    let state = Arc::new(AppState {
        slots: SlotManager::new(directory),
        bookings: store.clone(),
    });
    (state, store)
}

#[tokio::test]
async fn list_departments_returns_the_whole_table() {
    let (state, _) = create_test_state();

    let response = list_departments(State(state))
        .await
        .expect("listing departments should succeed");

    assert_eq!(response.0["total"], 5);
    assert_eq!(response.0["departments"][0]["id"], "revenue");
}

#[tokio::test]
async fn get_department_serializes_the_config_contract() {
    let (state, _) = create_test_state();

    let response = get_department(State(state), Path("transport".to_string()))
        .await
        .expect("known department should resolve");

    let config = &response.0["departmentConfig"];
    assert_eq!(config["id"], "transport");
    assert_eq!(config["workingHours"]["start"], "08:00");
    assert_eq!(config["workingHours"]["lunchStart"], "13:00");
    assert_eq!(config["serviceTimeMinutes"], 30);
}

#[tokio::test]
async fn get_department_rejects_unknown_ids() {
    let (state, _) = create_test_state();

    let result = get_department(State(state), Path("archives".to_string())).await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn available_slots_envelope_carries_the_resolved_grid() {
    let (state, store) = create_test_state();
    store
        .record("transport", BookingRecord::new("2025-03-10", "08:00"))
        .await;

    let response = get_available_slots(
        State(state),
        Path("transport".to_string()),
        Query(SlotQuery { date: test_date() }),
    )
    .await
    .expect("slot resolution should succeed");

    assert_eq!(response.0["totalSlots"], 22);
    assert_eq!(response.0["availableSlots"][0]["startTime"], "08:00");
    assert_eq!(response.0["availableSlots"][0]["booked"], 1);
    assert_eq!(response.0["availableSlots"][0]["available"], false);
    assert_eq!(response.0["availableSlots"][1]["available"], true);
}

#[tokio::test]
async fn suggested_slots_returns_the_booking_page_composite() {
    let (state, store) = create_test_state();
    store
        .record("transport", BookingRecord::new("2025-03-10", "08:00"))
        .await;

    let response = get_suggested_slots(
        State(state),
        Path("transport".to_string()),
        Query(SlotQuery { date: test_date() }),
    )
    .await
    .expect("suggestion query should succeed");

    let body = response.0;
    assert_eq!(body.department_config.id, "transport");
    assert_eq!(body.suggested_slots.len(), 3);
    assert_eq!(body.suggested_slots[0].start_time, t(8, 30));
    assert!(body.suggested_slots.iter().all(|slot| slot.available));
    assert_eq!(body.capacity_info.total_capacity, 22);
    assert_eq!(body.capacity_info.booked, 1);
    assert_eq!(body.capacity_info.available, 21);
}

#[tokio::test]
async fn suggested_slots_rejects_unknown_departments() {
    let (state, _) = create_test_state();

    let result = get_suggested_slots(
        State(state),
        Path("archives".to_string()),
        Query(SlotQuery { date: test_date() }),
    )
    .await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn bookings_in_other_departments_do_not_affect_the_tally() {
    let (state, store) = create_test_state();
    store
        .record("revenue", BookingRecord::new("2025-03-10", "08:00"))
        .await;

    let response = get_available_slots(
        State(state),
        Path("transport".to_string()),
        Query(SlotQuery { date: test_date() }),
    )
    .await
    .expect("slot resolution should succeed");

    assert_eq!(response.0["availableSlots"][0]["booked"], 0);
    assert_eq!(response.0["availableSlots"][0]["available"], true);
}

#[tokio::test]
async fn slot_availability_endpoint_checks_one_label() {
    let (state, store) = create_test_state();
    store
        .record("transport", BookingRecord::new("2025-03-10", "09:00"))
        .await;

    let booked = check_slot_availability(
        State(state.clone()),
        Path("transport".to_string()),
        Query(SlotCheckQuery {
            date: test_date(),
            time_slot: "09:00".to_string(),
        }),
    )
    .await
    .expect("availability check should succeed");

    assert_eq!(booked.0["available"], false);
    assert_eq!(booked.0["timeSlot"], "09:00");

    let open = check_slot_availability(
        State(state),
        Path("transport".to_string()),
        Query(SlotCheckQuery {
            date: test_date(),
            time_slot: "09:30".to_string(),
        }),
    )
    .await
    .expect("availability check should succeed");

    assert_eq!(open.0["available"], true);
}

#[tokio::test]
async fn capacity_endpoint_reports_aggregates() {
    let (state, store) = create_test_state();
    store
        .record("welfare", BookingRecord::new("2025-03-10", "10:00"))
        .await;
    store
        .record("welfare", BookingRecord::new("2025-03-10", "10:30"))
        .await;

    let response = get_capacity_info(
        State(state),
        Path("welfare".to_string()),
        Query(SlotQuery { date: test_date() }),
    )
    .await
    .expect("capacity query should succeed");

    // 10:00-16:00 minus the lunch hour in half-hour slots: 10 in total
    let capacity = &response.0["capacityInfo"];
    assert_eq!(capacity["totalCapacity"], 10);
    assert_eq!(capacity["booked"], 2);
    assert_eq!(capacity["available"], 8);
    assert_eq!(capacity["percentage"], 20);
}

#[tokio::test]
async fn wait_time_endpoint_reports_booked_minutes() {
    let (state, store) = create_test_state();
    store
        .record("transport", BookingRecord::new("2025-03-10", "08:00"))
        .await;
    store
        .record("transport", BookingRecord::new("2025-03-10", "14:00"))
        .await;

    let response = get_wait_time(
        State(state),
        Path("transport".to_string()),
        Query(SlotQuery { date: test_date() }),
    )
    .await
    .expect("wait time query should succeed");

    assert_eq!(response.0["estimatedWaitMinutes"], 60);
}
