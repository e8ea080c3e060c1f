//! # AnswerView Component
//!
//! The result viewer. Renders the query slot into exactly one of four
//! mutually exclusive views:
//!
//! 1. Loading indicator (query in flight)
//! 2. Error message (query failed)
//! 3. Placeholder (no answer yet)
//! 4. The answer, markdown-rendered and vertically scrollable
//!
//! `AnswerView` is transient, built fresh each frame from app state.
//! `AnswerViewState` persists the scroll offset across frames.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::OpStatus;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const PLACEHOLDER_TEXT: &str = "No results yet. Type a question and press Enter.";

/// Persistent presentation state: scroll position within a long answer.
#[derive(Default)]
pub struct AnswerViewState {
    pub scroll_state: ScrollViewState,
}

impl AnswerViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump back to the top; called when a new answer replaces the old one.
    pub fn reset(&mut self) {
        self.scroll_state.scroll_to_top();
    }
}

impl EventHandler for AnswerViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::MouseScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::MouseScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        Some(())
    }
}

/// Transient component: borrows the relevant app state for one frame.
pub struct AnswerView<'a> {
    pub query: &'a OpStatus,
    pub answer: Option<&'a str>,
    pub spinner_frame: usize,
}

impl<'a> AnswerView<'a> {
    pub fn new(query: &'a OpStatus, answer: Option<&'a str>, spinner_frame: usize) -> Self {
        Self {
            query,
            answer,
            spinner_frame,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut AnswerViewState) {
        // Loading suppresses both result and error
        if self.query.is_loading() {
            self.render_loading(frame, area);
            return;
        }
        if let Some(msg) = self.query.error() {
            render_error(frame, area, msg);
            return;
        }
        match self.answer {
            Some(answer) => self.render_answer(frame, area, answer, state),
            None => render_placeholder(frame, area),
        }
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
        let paragraph = Paragraph::new(Line::from(format!("{spinner} Querying... please wait")))
            .block(Block::bordered().title("Answer"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_answer(
        &self,
        frame: &mut Frame,
        area: Rect,
        answer: &str,
        state: &mut AnswerViewState,
    ) {
        let block = Block::bordered().title("Answer");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = markdown::render(answer, Color::White);
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });

        let content_width = inner.width.saturating_sub(1);
        let content_height = paragraph.line_count(content_width) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            paragraph,
            Rect::new(0, 0, content_width, content_height),
        );
        frame.render_stateful_widget(scroll_view, inner, &mut state.scroll_state);
    }
}

fn render_error(frame: &mut Frame, area: Rect, msg: &str) {
    let paragraph = Paragraph::new(format!("Error: {msg}"))
        .block(
            Block::bordered()
                .title("Answer")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_placeholder(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(PLACEHOLDER_TEXT)
        .block(Block::bordered().title("Answer"))
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_buffer(query: &OpStatus, answer: Option<&str>) -> String {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = AnswerViewState::new();
        terminal
            .draw(|f| {
                AnswerView::new(query, answer, 0).render(f, f.area(), &mut state);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_answer_is_rendered() {
        let rendered = render_to_buffer(&OpStatus::Idle, Some("42"));
        assert!(rendered.contains("42"));
    }

    #[test]
    fn test_loading_suppresses_answer_and_error() {
        let rendered = render_to_buffer(&OpStatus::Loading, Some("42"));
        assert!(rendered.contains("Querying"));
        assert!(!rendered.contains("42"));
    }

    #[test]
    fn test_error_view_shows_message() {
        let rendered = render_to_buffer(&OpStatus::Error("no luck".to_string()), None);
        assert!(rendered.contains("Error: no luck"));
    }

    #[test]
    fn test_placeholder_when_no_answer() {
        let rendered = render_to_buffer(&OpStatus::Idle, None);
        assert!(rendered.contains("No results yet"));
    }
}
