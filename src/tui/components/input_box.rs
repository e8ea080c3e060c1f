//! # InputBox Component
//!
//! The query form: a single-line text input for question text.
//!
//! ## Responsibilities
//!
//! - Capture and edit question text (insert, delete, cursor movement, paste)
//! - Emit `Submit` on Enter, guarding against blank input
//! - Refuse submission and dim itself while a query is in flight
//!
//! The buffer and cursor are internal state. `disabled` is a prop synced from
//! the application state each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted non-blank question text (already trimmed)
    Submit(String),
}

const PLACEHOLDER: &str = "Ask a question about your documents...";

pub struct InputBox {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Cursor position as a byte offset into `buffer`
    cursor: usize,
    /// First visible column (display width), for horizontal scrolling
    scroll_cols: u16,
    /// Prop: true while a query is in flight. Editing stays available,
    /// submission does not.
    pub disabled: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_cols: 0,
            disabled: false,
        }
    }

    fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    /// Display width of the buffer up to the cursor.
    fn cursor_col(&self) -> u16 {
        self.buffer[..self.cursor]
            .chars()
            .map(|c| c.width().unwrap_or(0) as u16)
            .sum()
    }

    /// Keeps the cursor inside the visible window of `inner_width` columns.
    fn update_scroll(&mut self, inner_width: u16) {
        if inner_width == 0 {
            return;
        }
        let col = self.cursor_col();
        if col < self.scroll_cols {
            self.scroll_cols = col;
        } else if col >= self.scroll_cols + inner_width {
            self.scroll_cols = col + 1 - inner_width;
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.insert(*c);
                None
            }
            TuiEvent::Paste(data) => {
                // Single-line input: pasted newlines become spaces
                for c in data.chars() {
                    self.insert(if c == '\n' || c == '\r' { ' ' } else { c });
                }
                None
            }
            TuiEvent::Backspace => {
                self.backspace();
                None
            }
            TuiEvent::Delete => {
                self.delete();
                None
            }
            TuiEvent::CursorLeft => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                None
            }
            TuiEvent::CursorRight => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => {
                if self.disabled {
                    return None;
                }
                let text = self.buffer.trim().to_string();
                if text.is_empty() {
                    return None;
                }
                // Cleared immediately, before the backend call settles
                self.buffer.clear();
                self.cursor = 0;
                self.scroll_cols = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        self.update_scroll(inner_width);

        let title = if self.disabled {
            "Question (querying...)"
        } else {
            "Question"
        };
        let style = if self.disabled {
            Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Green)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title)
            .border_style(style);

        // Drop columns left of the scroll window
        let mut skipped = 0u16;
        let visible: String = self
            .buffer
            .chars()
            .skip_while(|c| {
                let w = c.width().unwrap_or(0) as u16;
                if skipped + w <= self.scroll_cols {
                    skipped += w;
                    true
                } else {
                    false
                }
            })
            .collect();

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER)
                .block(block)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
        } else {
            Paragraph::new(visible).block(block).style(style)
        };
        frame.render_widget(paragraph, area);

        if !self.disabled {
            let cursor_x = area.x + 1 + self.cursor_col().saturating_sub(self.scroll_cols);
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(2)), area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(input: &mut InputBox) -> Option<InputEvent> {
        input.handle_event(&TuiEvent::Submit)
    }

    fn type_str(input: &mut InputBox, s: &str) {
        for c in s.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_builds_buffer() {
        let mut input = InputBox::new();
        type_str(&mut input, "hello");
        assert_eq!(input.buffer, "hello");
    }

    #[test]
    fn test_submit_trims_and_clears() {
        let mut input = InputBox::new();
        type_str(&mut input, "  what is this?  ");

        let event = submit(&mut input);

        assert_eq!(event, Some(InputEvent::Submit("what is this?".to_string())));
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut input = InputBox::new();
        type_str(&mut input, "   ");
        assert_eq!(submit(&mut input), None);
        // Whitespace is kept; only a real submission clears
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn test_disabled_refuses_submit_but_allows_editing() {
        let mut input = InputBox::new();
        input.disabled = true;
        type_str(&mut input, "queued question");

        assert_eq!(submit(&mut input), None);
        assert_eq!(input.buffer, "queued question");
    }

    #[test]
    fn test_backspace_and_delete_respect_char_boundaries() {
        let mut input = InputBox::new();
        type_str(&mut input, "héllo");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::CursorRight);

        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "hllo");

        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "hlo");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("two\nlines".to_string()));
        assert_eq!(input.buffer, "two lines");
    }

    #[test]
    fn test_cursor_navigation() {
        let mut input = InputBox::new();
        type_str(&mut input, "abc");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(input.buffer, "xabc");

        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::InputChar('y'));
        assert_eq!(input.buffer, "xabcy");
    }
}
