//! Remote debate service integration

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;

use crate::conversation::DebateRequest;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "upstream debate call failed");
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}

/// What the upstream answered: its status and its parsed JSON body.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Value,
}

/// Client for the remote debate-generation service
pub struct DebateService {
    client: Client,
    url: String,
}

impl DebateService {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Forward one request and parse whatever JSON comes back.
    pub async fn forward(&self, request: &DebateRequest) -> Result<UpstreamReply, UpstreamError> {
        tracing::debug!(
            url = %self.url,
            history = request.recent_history.len(),
            "forwarding debate request"
        );

        // `.json()` sets `Content-Type: application/json`
        let response = self.client.post(&self.url).json(request).send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            UpstreamError::InvalidResponse(format!("{}: body is not JSON ({})", status, e))
        })?;

        Ok(UpstreamReply { status, body })
    }
}
