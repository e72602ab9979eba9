//! # Actions
//!
//! Everything that can happen in vidcoach becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Agent answers? That's `Action::ReplyReceived(response)`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! event loop has to carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::agent::{AgentResponse, TransportError};
use crate::core::state::{App, ChatRole};

/// Prefix of the agent bubble shown when an exchange fails.
pub const ERROR_PREFIX: &str = "Error: ";

#[derive(Debug)]
pub enum Action {
    /// User submitted the composer contents.
    Submit(String),
    /// The agent answered with a 2xx and a parseable body.
    ReplyReceived(AgentResponse),
    /// The exchange failed at any stage.
    RequestFailed(TransportError),
    Quit,
}

impl Action {
    /// Converts the outcome of one transport call into the action that
    /// completes the send. Every outcome maps to exactly one action.
    pub fn from_outcome(outcome: Result<AgentResponse, TransportError>) -> Self {
        match outcome {
            Ok(response) => Action::ReplyReceived(response),
            Err(e) => Action::RequestFailed(e),
        }
    }
}

/// Work the event loop performs after an update.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Send this message to the agent.
    SpawnRequest(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(input) => {
            if !app.can_send(&input) {
                debug!("Ignoring submit (loading={}, blank={})", app.is_loading(), input.trim().is_empty());
                return Effect::None;
            }
            let text = input.trim().to_string();
            app.set_items(None);
            app.append_message(ChatRole::User, text.clone());
            app.set_loading(true);
            app.status_message = String::from("Thinking...");
            Effect::SpawnRequest(text)
        }
        Action::ReplyReceived(mut response) => {
            app.append_message(ChatRole::Agent, response.reply_text().to_string());
            if let Some(missing) = response.missing.as_ref().filter(|m| !m.is_empty()) {
                debug!("Agent still missing: {:?}", missing);
            }
            match response.take_items() {
                Some(items) => {
                    info!("Agent returned {} results", items.len());
                    app.status_message = format!("{} results", items.len());
                    app.set_items(Some(items));
                }
                None => app.status_message.clear(),
            }
            app.set_loading(false);
            Effect::None
        }
        Action::RequestFailed(e) => {
            warn!("Chat request failed: {}", e);
            app.append_failure(format!("{ERROR_PREFIX}{e}"));
            app.status_message = String::from("Request failed");
            app.set_loading(false);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{FALLBACK_REPLY, VideoResult};
    use crate::core::state::ChatMessage;
    use crate::test_support::test_app;

    fn response(json: &str) -> AgentResponse {
        serde_json::from_str(json).unwrap()
    }

    fn videos(n: usize) -> Vec<VideoResult> {
        (0..n)
            .map(|i| VideoResult {
                title: Some(format!("video {i}")),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn submit_appends_user_message_and_spawns() {
        let mut app = test_app();
        let before = app.messages().len();

        let effect = update(&mut app, Action::Submit("  ideas for a bakery  ".to_string()));

        assert_eq!(effect, Effect::SpawnRequest("ideas for a bakery".to_string()));
        assert_eq!(app.messages().len(), before + 1);
        assert_eq!(app.messages().last(), Some(&ChatMessage::user("ideas for a bakery")));
        assert!(app.is_loading());
    }

    #[test]
    fn submit_blank_is_noop() {
        let mut app = test_app();
        let before = app.messages().len();
        let rev = app.revision();

        assert_eq!(update(&mut app, Action::Submit("   ".to_string())), Effect::None);
        assert_eq!(update(&mut app, Action::Submit(String::new())), Effect::None);

        assert_eq!(app.messages().len(), before);
        assert_eq!(app.revision(), rev);
        assert!(!app.is_loading());
    }

    #[test]
    fn submit_while_loading_is_noop() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));
        let before = app.messages().len();

        let effect = update(&mut app, Action::Submit("second".to_string()));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.messages().len(), before);
    }

    #[test]
    fn submit_clears_previous_gallery() {
        let mut app = test_app();
        app.set_items(Some(videos(2)));

        update(&mut app, Action::Submit("again".to_string()));

        assert!(app.items().is_none());
    }

    #[test]
    fn reply_appends_agent_message_and_clears_loading() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello".to_string()));

        update(&mut app, Action::ReplyReceived(response(r#"{"reply":"hi"}"#)));

        assert_eq!(app.messages().last(), Some(&ChatMessage::agent("hi")));
        assert!(!app.is_loading());
    }

    #[test]
    fn reply_starting_with_error_prefix_is_not_a_failure() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello".to_string()));
        update(
            &mut app,
            Action::ReplyReceived(response(r#"{"reply":"Error: 404s hurt your channel"}"#)),
        );
        let last = app.messages().last().unwrap();
        assert_eq!(last.text, "Error: 404s hurt your channel");
        assert!(!last.failed);
    }

    #[test]
    fn reply_uses_alternate_field() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello".to_string()));
        update(&mut app, Action::ReplyReceived(response(r#"{"message":"hola"}"#)));
        assert_eq!(app.messages().last().unwrap().text, "hola");
    }

    #[test]
    fn reply_without_text_uses_fallback() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello".to_string()));
        update(&mut app, Action::ReplyReceived(response("{}")));
        assert_eq!(app.messages().last().unwrap().text, FALLBACK_REPLY);
    }

    #[test]
    fn reply_items_fill_gallery() {
        let mut app = test_app();
        update(&mut app, Action::Submit("show me".to_string()));
        let resp = AgentResponse {
            reply: Some("here".to_string()),
            items: Some(videos(3)),
            ..Default::default()
        };

        update(&mut app, Action::ReplyReceived(resp));

        assert_eq!(app.items().map(|i| i.len()), Some(3));
        assert_eq!(app.items().unwrap()[2].title.as_deref(), Some("video 2"));
    }

    #[test]
    fn reply_with_empty_items_leaves_gallery_cleared() {
        let mut app = test_app();
        app.set_items(Some(videos(1)));
        update(&mut app, Action::Submit("more".to_string()));
        update(&mut app, Action::ReplyReceived(response(r#"{"reply":"none","items":[]}"#)));
        assert!(app.items().is_none());
    }

    #[test]
    fn failure_appends_error_message_and_clears_loading() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello".to_string()));

        let err = TransportError::Request {
            status: 500,
            body: "boom".to_string(),
        };
        update(&mut app, Action::RequestFailed(err));

        let last = app.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Agent);
        assert!(last.failed);
        assert!(last.text.starts_with(ERROR_PREFIX));
        assert!(last.text.contains("500"));
        assert!(last.text.contains("boom"));
        assert!(!app.is_loading());
    }

    #[test]
    fn each_send_adds_exactly_two_messages() {
        let mut app = test_app();
        let outcomes = vec![
            Ok(response(r#"{"reply":"a"}"#)),
            Err(TransportError::Network("refused".to_string())),
            Err(TransportError::Parse("eof".to_string())),
            Ok(response("{}")),
        ];

        for (i, outcome) in outcomes.into_iter().enumerate() {
            assert!(!app.is_loading());
            let before = app.messages().len();
            let effect = update(&mut app, Action::Submit(format!("msg {i}")));
            assert!(matches!(effect, Effect::SpawnRequest(_)));
            update(&mut app, Action::from_outcome(outcome));
            assert_eq!(app.messages().len(), before + 2);
            assert!(!app.is_loading());
        }
    }

    #[test]
    fn from_outcome_maps_both_paths() {
        assert!(matches!(
            Action::from_outcome(Ok(AgentResponse::default())),
            Action::ReplyReceived(_)
        ));
        assert!(matches!(
            Action::from_outcome(Err(TransportError::Network("x".to_string()))),
            Action::RequestFailed(_)
        ));
    }

    #[test]
    fn exchange_through_transport_sends_session_and_trimmed_text() {
        use crate::test_support::{ScriptedTransport, test_app_with};
        use std::sync::Arc;

        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(response(r#"{"answer":"try shorts"}"#)),
            Err(TransportError::Request {
                status: 404,
                body: "not found".to_string(),
            }),
        ]));
        let mut app = test_app_with(transport.clone());

        for input in ["  first  ", "second"] {
            let Effect::SpawnRequest(text) = update(&mut app, Action::Submit(input.to_string()))
            else {
                panic!("expected a request");
            };
            let outcome =
                tokio_test::block_on(app.transport.send(app.session_id.as_str(), &text));
            update(&mut app, Action::from_outcome(outcome));
        }

        let sent = transport.sent.lock().unwrap().clone();
        assert_eq!(
            sent,
            vec![
                ("s_7e57_0".to_string(), "first".to_string()),
                ("s_7e57_0".to_string(), "second".to_string()),
            ]
        );
        let texts: Vec<&str> = app.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(&texts[1..], &["first", "try shorts", "second", "Error: HTTP 404: not found"]);
        assert!(!app.is_loading());
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
