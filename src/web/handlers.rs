// Status endpoints for infrastructure polling

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::web::AppState;

/// Binary liveness signal: 200 with an empty body when the last cycle's
/// verdict was healthy, 503 otherwise. This is the endpoint load
/// balancers and supervisors poll.
pub async fn get_liveness(State(state): State<AppState>) -> StatusCode {
    if state.health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub healthy: bool,
    pub last_check: Option<String>,
    pub endpoints: usize,
    pub mining_address: String,
}

/// Human-readable status document
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let snapshot = state.health.snapshot().await;
    Json(StatusResponse {
        healthy: snapshot.healthy,
        last_check: snapshot.last_check.map(|t| t.to_rfc3339()),
        endpoints: state.config.rpc_urls.len(),
        mining_address: state.config.mining_address.clone(),
    })
}
