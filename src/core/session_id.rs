//! # Session Identity
//!
//! One token per UI lifetime: `s_<random hex>_<millis hex>`. Sent with every
//! chat request so the agent can correlate the conversation.
//!
//! Entropy and time are injected so tests get stable ids. Uniqueness is
//! best-effort, not cryptographic.

use std::fmt;

use chrono::Utc;

pub const SESSION_PREFIX: &str = "s_";

/// Source of the random fragment.
pub trait Entropy {
    fn next_u64(&mut self) -> u64;
}

/// Source of the timestamp fragment, in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Random bits from a v4 UUID.
pub struct UuidEntropy;

impl Entropy for UuidEntropy {
    fn next_u64(&mut self) -> u64 {
        // Low half of a v4 UUID carries 62 random bits.
        uuid::Uuid::new_v4().as_u128() as u64
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Immutable session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build a session id from the given entropy source and clock.
pub fn new_session_id(entropy: &mut impl Entropy, clock: &impl Clock) -> SessionId {
    SessionId(format!(
        "{SESSION_PREFIX}{:x}_{:x}",
        entropy.next_u64(),
        clock.now_millis()
    ))
}

/// Session id from process randomness and the wall clock.
pub fn generate() -> SessionId {
    new_session_id(&mut UuidEntropy, &SystemClock)
}
