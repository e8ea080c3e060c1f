//! # Application State
//!
//! Core business state for askdoc. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn DocQaBackend>   // QA backend client
//! ├── upload: OpStatus                 // upload operation status
//! ├── query: OpStatus                  // query operation status
//! ├── answer: Option<String>           // last successful answer
//! ├── documents: Vec<String>           // last fetched document listing
//! ├── documents_refreshed_at: Option   // when the listing was fetched
//! ├── status_message: String           // status bar text
//! └── base_url: String                 // backend address (display only)
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::api::DocQaBackend;
use crate::core::config::ResolvedConfig;

/// Status of one backend operation. The upload and query operations each own
/// an independent slot, so a settling upload never clobbers a query error or
/// vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OpStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl OpStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, OpStatus::Loading)
    }

    /// The error message, if this slot holds one.
    pub fn error(&self) -> Option<&str> {
        match self {
            OpStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

pub struct App {
    pub backend: Arc<dyn DocQaBackend>,
    pub upload: OpStatus,
    pub query: OpStatus,
    /// Most recent successful answer. Replaced on each query; cleared when a
    /// new query starts.
    pub answer: Option<String>,
    pub documents: Vec<String>,
    pub documents_refreshed_at: Option<DateTime<Local>>,
    pub status_message: String,
    pub base_url: String,
}

impl App {
    pub fn new(backend: Arc<dyn DocQaBackend>, base_url: String) -> Self {
        Self {
            backend,
            upload: OpStatus::Idle,
            query: OpStatus::Idle,
            answer: None,
            documents: Vec::new(),
            documents_refreshed_at: None,
            status_message: String::from("Welcome to askdoc!"),
            base_url,
        }
    }

    pub fn from_config(backend: Arc<dyn DocQaBackend>, config: &ResolvedConfig) -> Self {
        Self::new(backend, config.base_url.clone())
    }

    /// True while either backend operation is in flight.
    pub fn is_busy(&self) -> bool {
        self.upload.is_loading() || self.query.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to askdoc!");
        assert!(!app.upload.is_loading());
        assert!(!app.query.is_loading());
        assert!(app.answer.is_none());
        assert!(app.documents.is_empty());
    }

    #[test]
    fn test_op_status_helpers() {
        use super::OpStatus;
        assert!(OpStatus::Loading.is_loading());
        assert!(!OpStatus::Idle.is_loading());
        assert_eq!(OpStatus::Error("boom".into()).error(), Some("boom"));
        assert_eq!(OpStatus::Idle.error(), None);
    }
}
