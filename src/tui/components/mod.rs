//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Two patterns, mirroring how the data flows:
//!
//! - **Stateless (props-based)**: `TitleBar`, `DocumentList` receive all
//!   data as fields and hold no internal state.
//! - **Stateful (event-driven)**: `InputBox` (query text + cursor),
//!   `AnswerViewState` (scroll offset), `FilePickerState` (selection +
//!   confirm step) manage local interaction state and emit high-level
//!   events for the run loop.
//!
//! Each component file contains its state types, event types, rendering,
//! and tests, so one file tells the whole story of one component.

pub mod answer_view;
pub mod document_list;
pub mod file_picker;
pub mod input_box;
pub mod title_bar;

pub use answer_view::{AnswerView, AnswerViewState};
pub use document_list::DocumentList;
pub use file_picker::{FilePicker, FilePickerState, PickerEvent};
pub use input_box::{InputBox, InputEvent};
pub use title_bar::TitleBar;
