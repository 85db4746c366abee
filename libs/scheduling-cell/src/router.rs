use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{self, AppState};

pub fn department_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_departments))
        .route("/{department_id}", get(handlers::get_department))
        .route(
            "/{department_id}/available-slots",
            get(handlers::get_available_slots),
        )
        .route(
            "/{department_id}/suggested-slots",
            get(handlers::get_suggested_slots),
        )
        .route(
            "/{department_id}/slot-availability",
            get(handlers::check_slot_availability),
        )
        .route("/{department_id}/capacity", get(handlers::get_capacity_info))
        .route("/{department_id}/wait-time", get(handlers::get_wait_time))
        .with_state(state)
}
