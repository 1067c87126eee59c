use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::{Arc, OnceLock};
use std::time::SystemTime;

static SERVER_START_TIME: OnceLock<SystemTime> = OnceLock::new();

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .get_or_init(SystemTime::now)
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Liveness probe. Returns 200 if the process is running.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "simtext-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness probe. Checks that at least one algorithm-params row is active.
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    use corpus::AlgorithmParamsStore;
    let params_ready = state.params.active_params(chrono::Utc::now()).is_some();

    Ok(Json(json!({
        "status": if params_ready { "ready" } else { "degraded" },
        "service": "simtext-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
        "components": {
            "api": "ready",
            "algorithm_params": if params_ready { "ready" } else { "no active params" },
        }
    })))
}
