use axum::{extract::State, Json};
use crate::{models::{HealthResponse, ReadyResponse}, state::AppState};
use tracing::debug;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}

/// Readiness check endpoint, reporting which integrations have credentials
pub async fn ready_check(State(state): State<AppState>) -> Json<ReadyResponse> {
    debug!("Readiness check requested");
    let ai_gateway = state.ai.is_configured();
    Json(ReadyResponse {
        status: if ai_gateway { "ok" } else { "degraded" }.to_string(),
        ai_gateway,
        email: state.email.is_configured(),
        places: state.places.is_configured(),
        maps: state.maps.is_configured(),
    })
}
