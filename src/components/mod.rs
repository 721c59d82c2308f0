// ABOUTME: UI components: target picker and terminal view

pub mod target_picker;
pub mod terminal_view;

pub use target_picker::TargetPickerComponent;
pub use terminal_view::TerminalViewComponent;

use ratatui::prelude::*;

use crate::app::state::View;
use crate::app::App;

/// Top-level render dispatch.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let area = frame.size();
    match app.state.current_view {
        View::TargetPicker => TargetPickerComponent::render(frame, area, &app.state),
        View::Terminal => {
            TerminalViewComponent::render(frame, area, &app.state, app.session.as_ref());
        }
    }
}
