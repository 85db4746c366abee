use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{BookingRecord, DepartmentAvailabilityResponse};
use crate::services::{BookingStore, SlotManager};

/// Shared state for the scheduling routes: the engine plus the external
/// booking collaborator.
pub struct AppState {
    pub slots: SlotManager,
    pub bookings: Arc<dyn BookingStore>,
}

// Query parameters for the slot endpoints
#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCheckQuery {
    pub date: NaiveDate,
    pub time_slot: String,
}

#[axum::debug_handler]
pub async fn list_departments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let departments = state.slots.departments();

    Ok(Json(json!({
        "departments": departments,
        "total": departments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let config = state
        .slots
        .department_config(&department_id)
        .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

    Ok(Json(json!({ "departmentConfig": config })))
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    debug!(
        "Fetching available slots for department {} on {}",
        department_id, query.date
    );

    let bookings = fetch_bookings(&state, &department_id).await?;
    let slots = state
        .slots
        .get_available_slots(&department_id, query.date, &bookings);
    let total_slots = slots.len();

    Ok(Json(json!({
        "departmentId": department_id,
        "date": query.date,
        "availableSlots": slots,
        "totalSlots": total_slots
    })))
}

/// The booking-page payload: suggested slots plus capacity and the
/// department's configuration, in one response.
#[axum::debug_handler]
pub async fn get_suggested_slots(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<DepartmentAvailabilityResponse>, AppError> {
    let config = state
        .slots
        .department_config(&department_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

    let bookings = fetch_bookings(&state, &department_id).await?;

    Ok(Json(DepartmentAvailabilityResponse {
        suggested_slots: state
            .slots
            .get_suggested_slots(&department_id, query.date, &bookings),
        capacity_info: state
            .slots
            .get_capacity_info(&department_id, query.date, &bookings),
        department_config: config,
    }))
}

#[axum::debug_handler]
pub async fn check_slot_availability(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<String>,
    Query(query): Query<SlotCheckQuery>,
) -> Result<Json<Value>, AppError> {
    let bookings = fetch_bookings(&state, &department_id).await?;
    let available =
        state
            .slots
            .is_slot_available(&department_id, query.date, &query.time_slot, &bookings);

    Ok(Json(json!({
        "departmentId": department_id,
        "date": query.date,
        "timeSlot": query.time_slot,
        "available": available
    })))
}

#[axum::debug_handler]
pub async fn get_capacity_info(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    let bookings = fetch_bookings(&state, &department_id).await?;
    let capacity = state
        .slots
        .get_capacity_info(&department_id, query.date, &bookings);

    Ok(Json(json!({
        "departmentId": department_id,
        "date": query.date,
        "capacityInfo": capacity
    })))
}

#[axum::debug_handler]
pub async fn get_wait_time(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    let bookings = fetch_bookings(&state, &department_id).await?;
    let wait_minutes = state
        .slots
        .calculate_wait_time(&department_id, query.date, &bookings);

    Ok(Json(json!({
        "departmentId": department_id,
        "date": query.date,
        "estimatedWaitMinutes": wait_minutes
    })))
}

async fn fetch_bookings(
    state: &AppState,
    department_id: &str,
) -> Result<Vec<BookingRecord>, AppError> {
    state
        .bookings
        .bookings_for_department(department_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}
