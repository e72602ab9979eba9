//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::agent::{AgentResponse, ChatTransport, TransportError};
use crate::core::session_id::{Clock, Entropy, new_session_id};
use crate::core::state::{App, DEFAULT_GREETING};

/// A transport for tests that never needs a real agent.
pub struct NoopTransport;

#[async_trait]
impl ChatTransport for NoopTransport {
    async fn send(&self, _session_id: &str, _message: &str) -> Result<AgentResponse, TransportError> {
        Ok(AgentResponse::default())
    }
}

/// Replays canned outcomes in order and records what was sent.
pub struct ScriptedTransport {
    outcomes: Mutex<Vec<Result<AgentResponse, TransportError>>>,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl ScriptedTransport {
    pub fn new(mut outcomes: Vec<Result<AgentResponse, TransportError>>) -> Self {
        outcomes.reverse();
        Self {
            outcomes: Mutex::new(outcomes),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, session_id: &str, message: &str) -> Result<AgentResponse, TransportError> {
        self.sent
            .lock()
            .unwrap()
            .push((session_id.to_string(), message.to_string()));
        self.outcomes
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(TransportError::Network("script exhausted".to_string())))
    }
}

struct TestEntropy;

impl Entropy for TestEntropy {
    fn next_u64(&mut self) -> u64 {
        0x7e57
    }
}

struct EpochClock;

impl Clock for EpochClock {
    fn now_millis(&self) -> u64 {
        0
    }
}

/// Creates a test App with a NoopTransport and session id `s_7e57_0`.
pub fn test_app() -> App {
    test_app_with(Arc::new(NoopTransport))
}

pub fn test_app_with(transport: Arc<dyn ChatTransport>) -> App {
    let id = new_session_id(&mut TestEntropy, &EpochClock);
    App::with_session_id(transport, id, DEFAULT_GREETING)
}
