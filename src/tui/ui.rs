use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::core::view;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::input_box::INPUT_HEIGHT;
use crate::tui::components::{MessageList, TitleBar};

/// Draw one frame: title bar, transcript + gallery, composer.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(INPUT_HEIGHT)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    let view = view::render(app, &tui.input_box.buffer);
    let can_send = view.composer.can_send;

    MessageList::new(&mut tui.message_list, &view, tui.pulse_value).render(frame, main_area);

    TitleBar::new(
        view.session_id,
        &app.status_message,
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    tui.input_box.can_send = can_send;
    tui.input_box.render(frame, input_area);
}
