use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{AgentRequest, AgentResponse};

/// Path of the chat endpoint, relative to the configured base URL.
pub const CHAT_PATH: &str = "/api/agent/chat";

/// Failures of a single chat exchange.
#[derive(Debug)]
pub enum TransportError {
    /// Agent answered with a status outside 200..=299.
    Request { status: u16, body: String },
    /// Response body was not the expected JSON shape.
    Parse(String),
    /// The request never completed (DNS, connection refused, reset).
    Network(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request { status, body } => write!(f, "HTTP {status}: {body}"),
            TransportError::Parse(msg) => write!(f, "invalid response: {msg}"),
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends one user message and waits for the agent's answer.
    async fn send(&self, session_id: &str, message: &str) -> Result<AgentResponse, TransportError>;
}

/// `ChatTransport` over HTTP using reqwest.
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), CHAT_PATH),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, session_id: &str, message: &str) -> Result<AgentResponse, TransportError> {
        let body = AgentRequest {
            session_id,
            message,
        };
        info!("POST {} (session={}, len={})", self.endpoint, session_id, message.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Agent returned HTTP {}: {}", status.as_u16(), body);
            return Err(TransportError::Request {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!("Response body: {}", text);
        serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse agent response: {}", e);
            TransportError::Parse(e.to_string())
        })
    }
}
