//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use super::state::AppState;

/// Health response: overall status plus record-store reachability.
///
/// A failing store is reported in `db` as the error string; the endpoint
/// itself always answers 200.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db = match state.team_service.ping_store().await {
        Ok(()) => "ok".to_string(),
        Err(message) => message,
    };

    Json(HealthResponse { status: "OK", db })
}
