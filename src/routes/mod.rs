//! API routes

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::conversation::DebateRequest;
use crate::upstream::UpstreamError;
use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Pass-through to the debate service. The upstream JSON body is returned
/// as-is together with the upstream status, rather than flattened to a 200,
/// so callers see the service's own errors. Transport and decoding failures
/// become a 502.
async fn debate(
    State(state): State<AppState>,
    Json(request): Json<DebateRequest>,
) -> Result<(StatusCode, Json<Value>), UpstreamError> {
    let reply = state.upstream.forward(&request).await?;

    if !reply.status.is_success() {
        tracing::warn!(status = %reply.status, "debate service answered with an error status");
    }

    Ok((reply.status, Json(reply.body)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/debate", post(debate))
}
