use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{AnswerView, DocumentList, FilePicker, TitleBar};

/// Minimum width before the document panel is dropped to give the answer room.
const PANEL_MIN_TERMINAL_WIDTH: u16 = 70;
const PANEL_WIDTH: u16 = 28;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    // Title bar
    let mut title_bar = TitleBar::new(
        app.base_url.clone(),
        app.status_message.clone(),
        app.upload.error().map(|e| e.to_string()),
    );
    title_bar.render(frame, title_area);

    // Main area: answer viewer, with the document panel beside it when the
    // terminal is wide enough
    if main_area.width >= PANEL_MIN_TERMINAL_WIDTH {
        let [answer_area, panel_area] =
            Layout::horizontal([Min(0), Length(PANEL_WIDTH)]).areas(main_area);
        AnswerView::new(&app.query, app.answer.as_deref(), spinner_frame).render(
            frame,
            answer_area,
            &mut tui.answer_view,
        );
        DocumentList::new(
            &app.documents,
            app.documents_refreshed_at,
            app.upload.is_loading(),
        )
        .render(frame, panel_area);
    } else {
        AnswerView::new(&app.query, app.answer.as_deref(), spinner_frame).render(
            frame,
            main_area,
            &mut tui.answer_view,
        );
    }

    // Query form
    tui.input_box.render(frame, input_area);

    // File picker overlay on top of everything
    if let Some(picker) = tui.file_picker.as_mut() {
        FilePicker::new(picker).render(frame, frame.area());
    }
}
