//! # InputBox Component
//!
//! The message composer.
//!
//! ## Responsibilities
//!
//! - Capture text input (single line; pasted newlines become spaces)
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter), only while sending is allowed
//! - Show whether the send control is enabled
//!
//! ## State Management
//!
//! The buffer is internal state. `can_send` is a prop computed by the core
//! from the buffer and the loading flag.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::view::COMPOSER_PLACEHOLDER;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{CursorState, next_char_boundary, prev_char_boundary};

/// Borders (2) + padding (2) consumed horizontally
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Offset from area edge to text (border + padding)
const TEXT_OFFSET: u16 = 2;
/// Composer is one text line plus borders.
pub const INPUT_HEIGHT: u16 = 3;

const SEND_LABEL: &str = " Enter ⏎ Send ";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed while sending is allowed)
    Submit(String),
    ContentChanged,
}

/// Single-line text input with a send indicator.
///
/// # Props
///
/// - `can_send`: whether Enter submits (from the core view)
///
/// # State
///
/// - `buffer`: current text
/// - `cursor`: cursor byte offset and horizontal scroll
pub struct InputBox {
    pub buffer: String,
    pub can_send: bool,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            can_send: false,
            cursor: CursorState::new(),
        }
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let send_style = if self.can_send {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Message")
            .title_top(Line::from(Span::styled(SEND_LABEL, send_style)).right_aligned())
            .padding(Padding::horizontal(1));

        let text_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let (visible, cursor_col) = self.cursor.window(&self.buffer, text_width);

        let content = if self.buffer.is_empty() {
            Line::from(Span::styled(
                COMPOSER_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled(visible, Style::default().fg(Color::Green)))
        };

        frame.render_widget(Paragraph::new(content).block(block), area);

        if area.width > HORIZONTAL_OVERHEAD && area.height >= INPUT_HEIGHT {
            frame.set_cursor_position((area.x + TEXT_OFFSET + cursor_col, area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let c = if *c == '\n' { ' ' } else { *c };
                let mut tmp = [0u8; 4];
                self.insert(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let flat = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
                self.insert(&flat);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => self
                .cursor
                .move_left(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorRight => self
                .cursor
                .move_right(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                // Disabled send control: keep the text so the user can retry.
                if !self.can_send || self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    fn render_text(input: &mut InputBox) -> String {
        let backend = TestBackend::new(40, INPUT_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_submit_when_allowed() {
        let mut input = typed("hello");
        input.can_send = true;

        let res = input.handle_event(&TuiEvent::Submit);

        assert_eq!(res, Some(InputEvent::Submit("hello".to_string())));
        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn test_submit_blocked_keeps_buffer() {
        let mut input = typed("hello");
        input.can_send = false;

        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "hello");
    }

    #[test]
    fn test_submit_whitespace_only_ignored() {
        let mut input = typed("   ");
        input.can_send = true;
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_cursor_editing() {
        let mut input = typed("ac");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "abc");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "bc");

        input.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(input.handle_event(&TuiEvent::CursorRight), None);
        assert_eq!(input.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("line one\r\nline two\nend".to_string()));
        assert_eq!(input.buffer, "line one line two end");
    }

    #[test]
    fn test_backspace_multibyte() {
        let mut input = typed("hé");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "h");
    }

    #[test]
    fn test_render_placeholder_when_empty() {
        let mut input = InputBox::new();
        let text = render_text(&mut input);
        assert!(text.contains("Type a message"));
        assert!(text.contains("Send"));
    }

    #[test]
    fn test_render_shows_buffer() {
        let mut input = typed("bakery ideas");
        input.can_send = true;
        let text = render_text(&mut input);
        assert!(text.contains("bakery ideas"));
    }
}
