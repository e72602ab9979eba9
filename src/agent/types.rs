use serde::{Deserialize, Deserializer, Serialize};

/// Shown when the agent answers without any recognized reply field.
pub const FALLBACK_REPLY: &str = "Got it. What else would you like to add?";

/// Base URL for a video page; the video id is appended.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Body of `POST /api/agent/chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
}

/// A single video recommendation. Every field may be missing or null.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoResult {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub view_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub like_count: Option<u64>,
    pub duration: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl VideoResult {
    /// External page for this video, if it has an id.
    pub fn watch_url(&self) -> Option<String> {
        self.video_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("{WATCH_URL_PREFIX}{id}"))
    }
}

/// Counts arrive as numbers from some backends and as strings from others
/// (the YouTube Data API uses strings). Anything unusable becomes `None`.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Response of the chat endpoint.
///
/// The backend contract for the reply text was never pinned down, so four
/// field names are accepted. [`AgentResponse::reply_text`] resolves them in
/// a fixed priority order.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentResponse {
    pub session_id: Option<String>,
    pub reply: Option<String>,
    pub message: Option<String>,
    pub answer: Option<String>,
    pub assistant_message: Option<String>,
    pub missing: Option<Vec<String>>,
    pub items: Option<Vec<VideoResult>>,
}

impl AgentResponse {
    /// Display text for the agent bubble.
    ///
    /// Priority: `reply`, `message`, `answer`, `assistantMessage`, then
    /// [`FALLBACK_REPLY`]. A present field wins even if it is empty.
    pub fn reply_text(&self) -> &str {
        [
            &self.reply,
            &self.message,
            &self.answer,
            &self.assistant_message,
        ]
        .into_iter()
        .find_map(|field| field.as_deref())
        .unwrap_or(FALLBACK_REPLY)
    }

    /// Takes the result list if it has at least one entry.
    pub fn take_items(&mut self) -> Option<Vec<VideoResult>> {
        self.items.take().filter(|items| !items.is_empty())
    }
}
