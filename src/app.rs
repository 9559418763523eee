use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/check-in", post(handlers::check_in_form))
        .route("/api/status", get(handlers::get_status))
        .route("/api/records", get(handlers::get_records))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/check-in", post(handlers::check_in))
        .with_state(state)
}
