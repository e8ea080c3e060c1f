//! # FilePicker Component
//!
//! Full-screen overlay for choosing a document to upload. Opened with
//! Ctrl+U, dismissed with Esc.
//!
//! Pick-then-confirm: Enter on an entry moves to a confirm step showing the
//! chosen name; a second Enter hands the file to the coordinator. Esc steps
//! back from confirm to the list. The extension filter is a UI hint only;
//! the backend decides what it actually accepts.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FilePickerState` lives in `TuiState` while the overlay is open
//! - `FilePicker` is created each frame with borrowed state

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::tui::event::TuiEvent;

/// One selectable file in the picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
}

/// Events emitted by the file picker.
pub enum PickerEvent {
    /// The user confirmed this file for upload.
    Upload(PathBuf),
    Dismiss,
}

/// Persistent state for the file picker overlay.
pub struct FilePickerState {
    pub entries: Vec<PickerEntry>,
    pub selected: usize,
    /// True once the user picked an entry and is on the confirm step.
    pub confirming: bool,
    pub list_state: ListState,
    /// Directory shown in the title.
    pub dir: PathBuf,
}

impl FilePickerState {
    /// Scans `dir` for files matching the allowed extensions, sorted by name.
    pub fn scan(dir: &Path, extensions: &[String]) -> Self {
        let mut entries: Vec<PickerEntry> = match fs::read_dir(dir) {
            Ok(read) => read
                .filter_map(|res| res.ok())
                .map(|e| e.path())
                .filter(|p| p.is_file() && has_allowed_extension(p, extensions))
                .map(|path| PickerEntry {
                    name: path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    path,
                })
                .collect(),
            Err(e) => {
                warn!("Failed to read {}: {}", dir.display(), e);
                Vec::new()
            }
        };
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            entries,
            selected: 0,
            confirming: false,
            list_state,
            dir: dir.to_path_buf(),
        }
    }

    /// Handle a key event, returning a PickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        match event {
            TuiEvent::Escape => {
                if self.confirming {
                    self.confirming = false;
                    None
                } else {
                    Some(PickerEvent::Dismiss)
                }
            }
            TuiEvent::CursorUp if !self.confirming => {
                if !self.entries.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown if !self.confirming => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1).min(self.entries.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => {
                let entry = self.entries.get(self.selected)?;
                if self.confirming {
                    Some(PickerEvent::Upload(entry.path.clone()))
                } else {
                    self.confirming = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Case-insensitive extension check against the configured allow-list.
pub fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false)
}

/// Transient render wrapper for the file picker overlay.
pub struct FilePicker<'a> {
    state: &'a mut FilePickerState,
}

impl<'a> FilePicker<'a> {
    pub fn new(state: &'a mut FilePickerState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 60, area);
        frame.render_widget(Clear, overlay);

        let help_text = if self.state.confirming {
            " Enter Upload  Esc Back "
        } else {
            " ↑↓ Select  Enter Choose  Esc Close "
        };

        let title = format!(" Upload from {} ", self.state.dir.display());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.state.entries.is_empty() {
            let empty = Paragraph::new("No uploadable documents in this directory.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        if self.state.confirming {
            let name = &self.state.entries[self.state.selected].name;
            let confirm = Paragraph::new(format!("Upload \"{name}\"?"))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(confirm, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(entry.name.clone(), style))
            })
            .collect();

        frame.render_stateful_widget(
            List::new(items).block(block),
            overlay,
            &mut self.state.list_state,
        );
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker_with(names: &[&str]) -> FilePickerState {
        let entries = names
            .iter()
            .map(|n| PickerEntry {
                name: n.to_string(),
                path: PathBuf::from(format!("/docs/{n}")),
            })
            .collect::<Vec<_>>();
        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(0));
        }
        FilePickerState {
            entries,
            selected: 0,
            confirming: false,
            list_state,
            dir: PathBuf::from("/docs"),
        }
    }

    #[test]
    fn test_extension_filter() {
        let exts = vec!["pdf".to_string(), "txt".to_string()];
        assert!(has_allowed_extension(Path::new("book.pdf"), &exts));
        assert!(has_allowed_extension(Path::new("BOOK.PDF"), &exts));
        assert!(has_allowed_extension(Path::new("notes.txt"), &exts));
        assert!(!has_allowed_extension(Path::new("image.png"), &exts));
        assert!(!has_allowed_extension(Path::new("no_extension"), &exts));
    }

    #[test]
    fn test_pick_then_confirm_emits_upload() {
        let mut picker = picker_with(&["a.pdf", "b.txt"]);
        picker.handle_event(&TuiEvent::CursorDown);

        // First Enter only selects
        assert!(picker.handle_event(&TuiEvent::Submit).is_none());
        assert!(picker.confirming);

        // Second Enter confirms
        match picker.handle_event(&TuiEvent::Submit) {
            Some(PickerEvent::Upload(path)) => assert_eq!(path, PathBuf::from("/docs/b.txt")),
            _ => panic!("expected upload event"),
        }
    }

    #[test]
    fn test_escape_steps_back_from_confirm() {
        let mut picker = picker_with(&["a.pdf"]);
        picker.handle_event(&TuiEvent::Submit);
        assert!(picker.confirming);

        assert!(picker.handle_event(&TuiEvent::Escape).is_none());
        assert!(!picker.confirming);

        match picker.handle_event(&TuiEvent::Escape) {
            Some(PickerEvent::Dismiss) => {}
            _ => panic!("expected dismiss"),
        }
    }

    #[test]
    fn test_navigation_clamps_to_bounds() {
        let mut picker = picker_with(&["a.pdf", "b.pdf"]);
        picker.handle_event(&TuiEvent::CursorUp);
        assert_eq!(picker.selected, 0);

        picker.handle_event(&TuiEvent::CursorDown);
        picker.handle_event(&TuiEvent::CursorDown);
        assert_eq!(picker.selected, 1);
    }

    #[test]
    fn test_submit_on_empty_picker_is_ignored() {
        let mut picker = picker_with(&[]);
        assert!(picker.handle_event(&TuiEvent::Submit).is_none());
        assert!(!picker.confirming);
    }
}
