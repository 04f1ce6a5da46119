use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthData {
    status: u16,
    upstream_configured: bool,
}

/// Liveness probe. Never calls the identity provider.
pub async fn health(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: StatusCode::OK.as_u16(),
        upstream_configured: state.upstream.missing().is_empty(),
    })
}
