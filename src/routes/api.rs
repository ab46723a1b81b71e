use crate::{handlers::*, state::AppState};
use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};

/// Create API routes
pub fn create_api_routes(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;
    Router::<AppState>::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/v1/analyze/skin", post(analyze_skin))
        .route("/v1/analyze/medicine", post(analyze_medicine))
        .route("/v1/doctors/search", post(search_doctors))
        .route("/v1/geo/geocode", post(geocode))
        .route("/v1/geo/directions", post(directions))
        .route("/v1/support/report", post(report_issue))
        .route("/v1/support/chat", post(support_chat))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
