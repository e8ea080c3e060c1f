//! # DocumentList Component
//!
//! Side panel listing the documents the backend has indexed, with the time
//! the listing was last fetched. Refreshed on startup, after each successful
//! upload, and manually with Ctrl+R.
//!
//! Stateless: all data arrives as props.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, List, ListItem, Paragraph};

use crate::tui::component::Component;

pub struct DocumentList<'a> {
    pub documents: &'a [String],
    pub refreshed_at: Option<DateTime<Local>>,
    /// True while an upload is in flight (shown in the panel title).
    pub uploading: bool,
}

impl<'a> DocumentList<'a> {
    pub fn new(
        documents: &'a [String],
        refreshed_at: Option<DateTime<Local>>,
        uploading: bool,
    ) -> Self {
        Self {
            documents,
            refreshed_at,
            uploading,
        }
    }

    fn title(&self) -> String {
        if self.uploading {
            return String::from("Documents (uploading...)");
        }
        match self.refreshed_at {
            Some(ts) => format!("Documents ({})", ts.format("%H:%M:%S")),
            None => String::from("Documents"),
        }
    }
}

impl Component for DocumentList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(self.title())
            .border_style(Style::default().fg(Color::DarkGray));

        if self.documents.is_empty() {
            let empty = Paragraph::new("Nothing uploaded yet.\nCtrl+U to upload.")
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .documents
            .iter()
            .map(|name| ListItem::new(Line::styled(name.clone(), Style::default().fg(Color::Gray))))
            .collect();
        frame.render_widget(List::new(items).block(block), area);
    }
}
