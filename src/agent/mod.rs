pub mod transport;
pub mod types;

pub use transport::{CHAT_PATH, ChatTransport, HttpTransport, TransportError};
pub use types::{AgentRequest, AgentResponse, FALLBACK_REPLY, VideoResult};
