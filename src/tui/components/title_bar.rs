//! # TitleBar Component
//!
//! One-line header: application name, backend address, and the transient
//! status message (upload notifications, refresh notes). Stateless: all
//! three fields are props from the parent.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar {
    pub base_url: String,
    pub status_message: String,
    /// Takes precedence over the status message when present.
    pub upload_error: Option<String>,
}

impl TitleBar {
    pub fn new(base_url: String, status_message: String, upload_error: Option<String>) -> Self {
        Self {
            base_url,
            status_message,
            upload_error,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("askdoc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" ({})", self.base_url),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if let Some(err) = &self.upload_error {
            spans.push(Span::styled(
                format!(" | {err}"),
                Style::default().fg(Color::Red),
            ));
        } else if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
