//! # Application State
//!
//! Conversation state for vidcoach. Domain logic only, no TUI types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── transport: Arc<dyn ChatTransport>  // agent endpoint
//! ├── session_id: SessionId              // fixed for the app lifetime
//! ├── messages: Vec<ChatMessage>         // append-only transcript
//! ├── is_loading: bool                   // request in flight
//! ├── items: Option<Vec<VideoResult>>    // gallery content
//! ├── status_message: String             // title bar text
//! └── revision: u64                      // bumped on every mutation
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs,
//! which calls the primitive mutators below.

use std::sync::Arc;

use crate::agent::{ChatTransport, VideoResult};
use crate::core::session_id::{self, SessionId};

/// Default first agent message of every session.
pub const DEFAULT_GREETING: &str = "Hi! Tell me a bit about your business and what you're looking for, \
    and I'll bring you some inspiration from YouTube 🙂";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Set only for the agent message standing in for a failed exchange.
    pub failed: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            failed: false,
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Agent,
            text: text.into(),
            failed: false,
        }
    }

    pub fn agent_failure(text: impl Into<String>) -> Self {
        Self {
            failed: true,
            ..Self::agent(text)
        }
    }
}

pub struct App {
    pub transport: Arc<dyn ChatTransport>,
    pub session_id: SessionId,
    messages: Vec<ChatMessage>,
    is_loading: bool,
    items: Option<Vec<VideoResult>>,
    pub status_message: String,
    /// Increments on every change to messages, loading or items.
    /// The TUI compares it between frames to redraw and auto-scroll.
    revision: u64,
}

impl App {
    pub fn new(transport: Arc<dyn ChatTransport>, greeting: &str) -> Self {
        Self::with_session_id(transport, session_id::generate(), greeting)
    }

    pub fn with_session_id(
        transport: Arc<dyn ChatTransport>,
        session_id: SessionId,
        greeting: &str,
    ) -> Self {
        let mut messages = Vec::new();
        if !greeting.trim().is_empty() {
            messages.push(ChatMessage::agent(greeting));
        }
        Self {
            transport,
            session_id,
            messages,
            is_loading: false,
            items: None,
            status_message: String::new(),
            revision: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn items(&self) -> Option<&[VideoResult]> {
        self.items.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn append_message(&mut self, role: ChatRole, text: impl Into<String>) {
        self.push(ChatMessage {
            role,
            text: text.into(),
            failed: false,
        });
    }

    /// Appends the agent-side message for an exchange that did not complete.
    pub fn append_failure(&mut self, text: impl Into<String>) {
        self.push(ChatMessage::agent_failure(text));
    }

    fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.revision += 1;
    }

    pub fn set_loading(&mut self, loading: bool) {
        if self.is_loading != loading {
            self.is_loading = loading;
            self.revision += 1;
        }
    }

    /// Replaces the gallery. `None` clears it.
    pub fn set_items(&mut self, items: Option<Vec<VideoResult>>) {
        if self.items != items {
            self.items = items;
            self.revision += 1;
        }
    }

    /// Sending needs non-blank input and no request in flight.
    pub fn can_send(&self, input: &str) -> bool {
        !input.trim().is_empty() && !self.is_loading
    }
}
