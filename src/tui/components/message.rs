use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::state::{ChatMessage, ChatRole};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Pulse intensity above which the thinking bubble border turns BOLD.
const PULSE_BOLD_THRESHOLD: f32 = 0.6;

/// Visual treatment of a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    User,
    Agent,
    /// Agent bubble carrying a failed exchange.
    Error,
    /// Transient bubble while a request is in flight.
    Thinking,
}

impl BubbleKind {
    pub fn of(message: &ChatMessage) -> Self {
        match message.role {
            ChatRole::User => BubbleKind::User,
            ChatRole::Agent if message.failed => BubbleKind::Error,
            ChatRole::Agent => BubbleKind::Agent,
        }
    }

    fn label(self) -> &'static str {
        match self {
            BubbleKind::User => "you",
            BubbleKind::Agent | BubbleKind::Thinking => "coach",
            BubbleKind::Error => "coach (error)",
        }
    }

    fn style(self) -> Style {
        match self {
            BubbleKind::User => Style::default().fg(Color::Green),
            BubbleKind::Agent => Style::default().fg(Color::Blue),
            BubbleKind::Error => Style::default().fg(Color::Red),
            BubbleKind::Thinking => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        }
    }
}

/// A stateless chat bubble.
///
/// Created fresh each frame by `MessageList`. `calculate_height` predicts the
/// rendered height with `textwrap` options that match Ratatui's `Paragraph`
/// wrapping, so the list can size its scroll canvas before rendering.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub kind: BubbleKind,
    pub text: &'a str,
    /// Current pulse intensity (0.0 to 1.0), only used by the thinking bubble
    pub pulse_intensity: f32,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self {
            kind: BubbleKind::of(message),
            text: &message.text,
            pulse_intensity: 0.0,
        }
    }

    pub fn thinking(text: &'a str, pulse_intensity: f32) -> Self {
        Self {
            kind: BubbleKind::Thinking,
            text,
            pulse_intensity,
        }
    }

    pub fn calculate_height(text: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.kind.style();
        let mut border_style = style.add_modifier(Modifier::DIM);
        if self.pulse_intensity > PULSE_BOLD_THRESHOLD {
            border_style = border_style
                .remove_modifier(Modifier::DIM)
                .add_modifier(Modifier::BOLD);
        }

        let block = Block::bordered()
            .title(self.kind.label())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
