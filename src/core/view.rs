//! # View Tree
//!
//! `render(&App, input)` is a pure function from conversation state to what
//! the screen should show. The TUI components draw a `View`; tests assert on
//! it directly without a terminal.

use crate::agent::VideoResult;
use crate::core::state::{App, ChatMessage};

pub const APP_TITLE: &str = "AI Video Coach";
pub const APP_SUBTITLE: &str = "YouTube inspiration agent";
pub const THINKING_TEXT: &str = "Thinking…";
pub const GALLERY_TITLE: &str = "Top videos (last 3 months)";
pub const UNTITLED: &str = "Untitled";
pub const COMPOSER_PLACEHOLDER: &str = "Type a message…";

/// Which of the three observable UI states the screen is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingResponse,
    ResultsShown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    Image(String),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    /// `channel • N views`, parts omitted when unknown.
    pub meta: String,
    /// External video page. `None` renders the card without a target.
    pub link: Option<String>,
    pub thumbnail: Thumbnail,
}

impl Card {
    pub fn from_video(video: &VideoResult) -> Self {
        let views = video.view_count.map(|n| format!("{} views", format_count(n)));
        let meta = [video.channel_title.as_deref(), views.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" • ");

        Self {
            title: video
                .title
                .clone()
                .unwrap_or_else(|| UNTITLED.to_string()),
            meta,
            link: video.watch_url(),
            thumbnail: match video.thumbnail_url.as_deref() {
                Some(url) if !url.is_empty() => Thumbnail::Image(url.to_string()),
                _ => Thumbnail::Placeholder,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    pub title: &'static str,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composer<'a> {
    pub text: &'a str,
    pub placeholder: &'static str,
    pub can_send: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    pub phase: Phase,
    pub session_id: &'a str,
    pub transcript: &'a [ChatMessage],
    /// Transient "thinking" bubble after the last message.
    pub thinking: Option<&'static str>,
    pub gallery: Option<Gallery>,
    pub composer: Composer<'a>,
}

pub fn render<'a>(app: &'a App, input: &'a str) -> View<'a> {
    let gallery = app
        .items()
        .filter(|items| !items.is_empty())
        .map(|items| Gallery {
            title: GALLERY_TITLE,
            cards: items.iter().map(Card::from_video).collect(),
        });

    let phase = if app.is_loading() {
        Phase::AwaitingResponse
    } else if gallery.is_some() {
        Phase::ResultsShown
    } else {
        Phase::Idle
    };

    View {
        phase,
        session_id: app.session_id.as_str(),
        transcript: app.messages(),
        thinking: app.is_loading().then_some(THINKING_TEXT),
        gallery,
        composer: Composer {
            text: input,
            placeholder: COMPOSER_PLACEHOLDER,
            can_send: app.can_send(input),
        },
    }
}

/// `1234567` → `"1,234,567"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
