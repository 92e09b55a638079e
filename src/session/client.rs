//! Client side of the debate endpoint

use async_trait::async_trait;
use reqwest::Client;

use crate::conversation::{DebateReply, DebateRequest};

/// Errors from a debate call. The session shows all of them the same way;
/// the kinds only matter for logs and tests.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Proxy answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed reply: {0}")]
    MalformedReply(String),
}

/// Anything that can answer a debate turn
#[async_trait]
pub trait DebateClient: Send + Sync {
    async fn send(&self, request: &DebateRequest) -> Result<DebateReply, ClientError>;
}

/// Calls the proxy endpoint over HTTP
pub struct HttpDebateClient {
    client: Client,
    endpoint: String,
}

impl HttpDebateClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl DebateClient for HttpDebateClient {
    async fn send(&self, request: &DebateRequest) -> Result<DebateReply, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::MalformedReply(e.to_string()))
    }
}
