//! # MessageList Component
//!
//! Scrollable view of the transcript, the thinking bubble and the gallery.
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and a `View` (props).
//!
//! Since `Component::render` takes `&mut self`, the scroll state and the
//! height cache are updated during the render pass, aligning with Ratatui's
//! `StatefulWidget` pattern.
//!
//! ## Auto-scroll
//!
//! `stick_to_bottom` keeps the newest content in view. The event loop calls
//! [`MessageListState::follow_latest`] whenever the conversation revision
//! changes; scrolling up detaches, scrolling back to the end re-attaches.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::view::View;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::gallery::GalleryWidget;
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Blank rows between the last bubble and the gallery heading.
const GALLERY_GAP: u16 = 1;

/// Scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    pub layout: LayoutCache,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            layout: LayoutCache::new(),
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// True when newer content sits below the viewport.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }

    /// Re-attach to the bottom so the next frame shows the newest content.
    pub fn follow_latest(&mut self) {
        self.stick_to_bottom = true;
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Block heights in draw order: bubbles, thinking, gallery.
///
/// Messages never change once appended, so their heights are kept until the
/// width changes. The trailing thinking and gallery blocks are re-measured
/// every frame. All sums saturate at `u16::MAX`, the tallest canvas a
/// `ScrollView` can hold.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// Number of leading message heights still valid for this frame.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.message_count.min(self.heights.len())
    }

    pub fn update(&mut self, view: &View<'_>, content_width: u16) {
        let reusable = self.reusable_count(view.transcript.len(), content_width);
        self.heights.truncate(reusable);
        for message in &view.transcript[reusable..] {
            self.heights
                .push(Message::calculate_height(&message.text, content_width));
        }
        self.message_count = view.transcript.len();
        self.content_width = content_width;

        if let Some(text) = view.thinking {
            self.heights.push(Message::calculate_height(text, content_width));
        }
        if let Some(gallery) = &view.gallery {
            self.heights.push(
                GALLERY_GAP
                    .saturating_add(GalleryWidget::calculate_height(gallery.cards.len(), content_width)),
            );
        }
        self.rebuild_prefix_heights();
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Blocks overlapping the viewport, plus half a viewport either side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a, 'v> {
    pub state: &'a mut MessageListState,
    pub view: &'a View<'v>,
    pub pulse_value: f32,
}

impl<'a, 'v> MessageList<'a, 'v> {
    pub fn new(state: &'a mut MessageListState, view: &'a View<'v>, pulse_value: f32) -> Self {
        Self {
            state,
            view,
            pulse_value,
        }
    }
}

impl<'a, 'v> Component for MessageList<'a, 'v> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area

        self.state.layout.update(self.view, content_width);
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            let bottom = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: bottom });
        } else {
            self.state.clamp_scroll();
        }

        let layout = &self.state.layout;
        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = layout.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, layout.total_height()))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };
        let thinking_index = self.view.transcript.len();

        for i in visible_range {
            let height = layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);

            if let Some(message) = self.view.transcript.get(i) {
                scroll_view.render_widget(Message::new(message), rect);
            } else if let Some(text) = self.view.thinking.filter(|_| i == thinking_index) {
                scroll_view.render_widget(Message::thinking(text, self.pulse_value), rect);
            } else if let Some(gallery) = &self.view.gallery {
                let rect = Rect::new(
                    0,
                    y_offset.saturating_add(GALLERY_GAP),
                    content_width,
                    height.saturating_sub(GALLERY_GAP),
                );
                scroll_view.render_widget(GalleryWidget::new(gallery), rect);
            }

            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` because `MessageList` is rebuilt
/// every frame and cannot hold the scroll position.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => self.follow_latest(),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentResponse, VideoResult};
    use crate::core::action::{Action, update};
    use crate::core::view::{THINKING_TEXT, render};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut MessageListState, view: &View<'_>, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                MessageList::new(state, view, 0.0).render(f, area);
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

    fn state_with_heights(heights: Vec<u16>, viewport_height: u16) -> MessageListState {
        let mut state = MessageListState::new();
        state.layout.heights = heights;
        state.layout.rebuild_prefix_heights();
        state.viewport_height = viewport_height;
        state
    }

    fn reply(text: &str) -> Action {
        Action::ReplyReceived(AgentResponse {
            reply: Some(text.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn layout_counts_thinking_and_gallery() {
        let mut app = test_app();
        let mut layout = LayoutCache::new();
        layout.update(&render(&app, ""), 60);
        assert_eq!(layout.heights.len(), 1);

        update(&mut app, Action::Submit("hi".to_string()));
        layout.update(&render(&app, ""), 60);
        // greeting + user + thinking
        assert_eq!(layout.heights.len(), 3);

        update(
            &mut app,
            Action::ReplyReceived(AgentResponse {
                reply: Some("ok".to_string()),
                items: Some(vec![VideoResult::default()]),
                ..Default::default()
            }),
        );
        layout.update(&render(&app, ""), 60);
        // greeting + user + reply + gallery
        assert_eq!(layout.heights.len(), 4);
        assert_eq!(
            *layout.heights.last().unwrap(),
            GALLERY_GAP + GalleryWidget::calculate_height(1, 60)
        );
    }

    #[test]
    fn layout_reuses_message_heights() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hi".to_string()));
        let mut layout = LayoutCache::new();
        layout.update(&render(&app, ""), 60);

        assert_eq!(layout.reusable_count(2, 60), 2);
        assert_eq!(layout.reusable_count(3, 60), 2);
        assert_eq!(layout.reusable_count(2, 40), 0);
        assert_eq!(layout.reusable_count(1, 60), 0);

        // A kept height is not re-measured
        layout.heights[0] = 42;
        update(&mut app, reply("ok"));
        layout.update(&render(&app, ""), 60);
        assert_eq!(layout.heights[0], 42);
        assert_eq!(layout.heights.len(), 3);

        // A new width re-measures everything
        layout.update(&render(&app, ""), 50);
        assert_ne!(layout.heights[0], 42);
    }

    #[test]
    fn visible_range_culls_offscreen_blocks() {
        let state = state_with_heights(vec![10; 10], 10);
        assert_eq!(state.layout.visible_range(50, 10), 4..7);
        assert_eq!(state.layout.visible_range(0, 10), 0..2);
        assert_eq!(state.layout.visible_range(90, 10), 8..10);
    }

    #[test]
    fn long_replies_saturate_total_height() {
        let mut app = test_app();
        let long = "line\n".repeat(33_000);
        for text in ["first", "second"] {
            update(&mut app, Action::Submit(text.to_string()));
            update(&mut app, reply(&long));
        }
        let mut state = MessageListState::new();
        state.viewport_height = 20;

        state.layout.update(&render(&app, ""), 60);

        assert_eq!(state.layout.heights.len(), 5);
        assert_eq!(state.layout.total_height(), u16::MAX);
        assert_eq!(state.max_offset(), u16::MAX - 20);
        state.stick_to_bottom = false;
        assert!(state.has_unseen_content());
        let tail = state.layout.visible_range(state.max_offset(), 20);
        assert_eq!(tail.end, 5);
    }

    #[test]
    fn thinking_bubble_rendered_while_loading() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hi".to_string()));
        let view = render(&app, "");
        let mut state = MessageListState::new();

        let text = draw(&mut state, &view, 60, 20);

        assert!(text.contains(THINKING_TEXT));
    }

    #[test]
    fn sticks_to_bottom_when_content_overflows() {
        let mut app = test_app();
        for i in 0..10 {
            update(&mut app, Action::Submit(format!("message {i}")));
            update(&mut app, Action::ReplyReceived(Default::default()));
        }
        let view = render(&app, "");
        let mut state = MessageListState::new();

        let text = draw(&mut state, &view, 60, 10);

        assert!(state.scroll_state.offset().y > 0);
        assert!(text.contains("message 9") || text.contains("Got it"));
        assert!(!text.contains("message 0"));
    }

    #[test]
    fn scroll_up_detaches_and_bottom_reattaches() {
        let mut state = state_with_heights(vec![10, 10, 10], 10);
        state.scroll_state.set_offset(Position { x: 0, y: 20 });

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        assert!(state.has_unseen_content());

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn clamp_scroll_limits_offset() {
        let mut state = state_with_heights(vec![5, 5], 4);
        state.scroll_state.set_offset(Position { x: 0, y: 50 });
        state.clamp_scroll();
        assert_eq!(state.scroll_state.offset().y, 6);
    }
}
