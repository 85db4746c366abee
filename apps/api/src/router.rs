use std::sync::Arc;

use axum::{routing::get, Router};

use scheduling_cell::handlers::AppState;
use scheduling_cell::router::department_routes;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Civic Queue API is running!" }))
        .nest("/departments", department_routes(state))
}
