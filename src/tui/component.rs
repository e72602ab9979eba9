use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Data arrives as props on the implementing struct. `render` takes
/// `&mut self` because the transcript updates its scroll offset and height
/// cache while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events.
pub trait EventHandler {
    /// What the component reports back to the event loop.
    type Event;

    /// Returns `Some` when the event produced something the loop must act on.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
