//! # TitleBar Component
//!
//! One-line header: app name and subtitle on the left, the transient status
//! and the session pill on the right.
//!
//! ```text
//! AI Video Coach · YouTube inspiration agent       Thinking... [session: s_3f…]
//! ```
//!
//! Stateless: all data arrives as props, so it is trivial to test with a
//! `TestBackend`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::view::{APP_SUBTITLE, APP_TITLE};
use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub session_id: &'a str,
    pub status_message: &'a str,
    /// Shown when the transcript is scrolled away from the newest content
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(session_id: &'a str, status_message: &'a str, has_unseen_content: bool) -> Self {
        Self {
            session_id,
            status_message,
            has_unseen_content,
        }
    }

    fn right_text(&self) -> String {
        let mut parts = Vec::new();
        if !self.status_message.is_empty() {
            parts.push(self.status_message.to_string());
        }
        if self.has_unseen_content {
            parts.push("↓ New".to_string());
        }
        parts.push(format!("[session: {}]", self.session_id));
        parts.join(" | ")
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let right = self.right_text();
        let right_width = (right.chars().count() as u16).min(area.width);
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);

        let left = Line::from(vec![
            Span::styled(
                APP_TITLE,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" · "),
            Span::styled(APP_SUBTITLE, Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(left), left_area);
        frame.render_widget(
            Paragraph::new(Span::styled(right, Style::default().fg(Color::Cyan))),
            right_area,
        );
    }
}
