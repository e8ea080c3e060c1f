//! # Actions
//!
//! Everything that can happen in askdoc becomes an `Action`.
//! User presses Enter? That's `Action::SubmitQuery`.
//! Backend responds? That's `Action::QueryFinished(result)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns the `Effect` the caller must carry out. No I/O here;
//! the TUI adapter spawns the backend calls.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: apply an action, assert on the state.
//! And debuggable: log every action, replay the exact session.

use std::path::PathBuf;

use chrono::Local;
use log::{error, warn};

use crate::api::{BackendError, FileListing, QueryOutcome, UploadOutcome};
use crate::core::state::{App, OpStatus};

/// Shown when the backend answers a query with `success: false`. The backend
/// message is deliberately not surfaced on this path.
pub const QUERY_FAILED_MSG: &str = "Query failed, please try again";
/// Shown when a query request fails at the transport level.
pub const QUERY_NETWORK_MSG: &str = "Query failed, check your network connection";
/// Shown when an upload request fails at the transport level.
pub const UPLOAD_FAILED_MSG: &str = "Upload failed, please try again";

#[derive(Debug)]
pub enum Action {
    /// The user submitted question text from the input form.
    SubmitQuery(String),
    /// A query request settled, successfully or not.
    QueryFinished(Result<QueryOutcome, BackendError>),
    /// The user confirmed a file in the picker.
    StartUpload(PathBuf),
    /// An upload request settled, successfully or not.
    UploadFinished(Result<UploadOutcome, BackendError>),
    /// Re-fetch the uploaded-documents listing.
    RefreshDocuments,
    /// A list-documents request settled, successfully or not.
    DocumentsLoaded(Result<FileListing, BackendError>),
    Quit,
}

/// What the caller must do after an `update()`. The reducer never performs
/// I/O itself; it hands the work back as an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    SpawnQuery(String),
    SpawnUpload(PathBuf),
    SpawnListDocuments,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitQuery(text) => {
            let trimmed = text.trim();
            // Blank input and resubmission while in flight are both no-ops.
            if trimmed.is_empty() || app.query.is_loading() {
                return Effect::None;
            }
            app.answer = None;
            app.query = OpStatus::Loading;
            Effect::SpawnQuery(trimmed.to_string())
        }

        Action::QueryFinished(result) => {
            match result {
                Ok(outcome) if outcome.success => {
                    app.answer = Some(outcome.answer);
                    app.query = OpStatus::Idle;
                }
                Ok(outcome) => {
                    warn!("Backend rejected query: {}", outcome.answer);
                    app.query = OpStatus::Error(QUERY_FAILED_MSG.to_string());
                }
                Err(e) => {
                    error!("Query transport failure: {e}");
                    app.query = OpStatus::Error(QUERY_NETWORK_MSG.to_string());
                }
            }
            Effect::None
        }

        Action::StartUpload(path) => {
            if app.upload.is_loading() {
                return Effect::None;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            app.upload = OpStatus::Loading;
            app.status_message = format!("Uploading {name}...");
            Effect::SpawnUpload(path)
        }

        Action::UploadFinished(result) => match result {
            Ok(outcome) if outcome.success => {
                // The backend message is surfaced verbatim as a transient
                // notification, then the listing is refreshed.
                app.upload = OpStatus::Idle;
                app.status_message = outcome.message;
                Effect::SpawnListDocuments
            }
            Ok(outcome) => {
                let msg = if outcome.message.is_empty() {
                    UPLOAD_FAILED_MSG.to_string()
                } else {
                    outcome.message
                };
                app.upload = OpStatus::Error(msg);
                app.status_message.clear();
                Effect::None
            }
            Err(e) => {
                error!("Upload transport failure: {e}");
                app.upload = OpStatus::Error(UPLOAD_FAILED_MSG.to_string());
                app.status_message.clear();
                Effect::None
            }
        },

        Action::RefreshDocuments => Effect::SpawnListDocuments,

        Action::DocumentsLoaded(result) => {
            match result {
                Ok(listing) if listing.success => {
                    app.documents = listing.files;
                    app.documents_refreshed_at = Some(Local::now());
                }
                // The listing is a convenience panel; its failures never
                // occupy an error slot.
                Ok(_) => {
                    app.status_message = String::from("Could not load document list");
                }
                Err(e) => {
                    warn!("Document listing failed: {e}");
                    app.status_message = String::from("Could not load document list");
                }
            }
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn ok_query(answer: &str) -> Result<QueryOutcome, BackendError> {
        Ok(QueryOutcome {
            success: true,
            answer: answer.to_string(),
        })
    }

    #[test]
    fn test_submit_query_sets_loading_and_clears_prior_state() {
        let mut app = test_app();
        app.answer = Some("old answer".to_string());
        app.query = OpStatus::Error("old error".to_string());

        let effect = update(&mut app, Action::SubmitQuery("what is this?".to_string()));

        assert_eq!(effect, Effect::SpawnQuery("what is this?".to_string()));
        assert_eq!(app.query, OpStatus::Loading);
        assert!(app.answer.is_none());
    }

    #[test]
    fn test_submit_query_trims_input() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SubmitQuery("  padded  ".to_string()));
        assert_eq!(effect, Effect::SpawnQuery("padded".to_string()));
    }

    #[test]
    fn test_blank_query_is_a_noop() {
        let mut app = test_app();
        app.answer = Some("kept".to_string());

        for input in ["", "   ", "\t\n"] {
            let effect = update(&mut app, Action::SubmitQuery(input.to_string()));
            assert_eq!(effect, Effect::None);
            assert_eq!(app.query, OpStatus::Idle);
            assert_eq!(app.answer.as_deref(), Some("kept"));
        }
    }

    #[test]
    fn test_submit_while_loading_is_a_noop() {
        let mut app = test_app();
        update(&mut app, Action::SubmitQuery("first".to_string()));
        assert_eq!(app.query, OpStatus::Loading);

        let effect = update(&mut app, Action::SubmitQuery("second".to_string()));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_successful_query_stores_answer_and_idles() {
        let mut app = test_app();
        update(&mut app, Action::SubmitQuery("meaning of life".to_string()));

        let effect = update(&mut app, Action::QueryFinished(ok_query("42")));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.answer.as_deref(), Some("42"));
        assert_eq!(app.query, OpStatus::Idle);
    }

    #[test]
    fn test_rejected_query_shows_generic_message() {
        let mut app = test_app();
        update(&mut app, Action::SubmitQuery("q".to_string()));

        update(
            &mut app,
            Action::QueryFinished(Ok(QueryOutcome {
                success: false,
                answer: "internal detail".to_string(),
            })),
        );

        // The backend detail must not leak; only the generic message shows.
        assert_eq!(app.query, OpStatus::Error(QUERY_FAILED_MSG.to_string()));
        assert!(app.answer.is_none());
    }

    #[test]
    fn test_query_transport_failure_shows_network_message() {
        let mut app = test_app();
        update(&mut app, Action::SubmitQuery("q".to_string()));

        update(
            &mut app,
            Action::QueryFinished(Err(BackendError::Network("refused".to_string()))),
        );

        assert_eq!(app.query, OpStatus::Error(QUERY_NETWORK_MSG.to_string()));
        assert!(app.answer.is_none());
    }

    #[test]
    fn test_start_upload_sets_loading_and_status() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::StartUpload(PathBuf::from("/docs/book.pdf")),
        );

        assert_eq!(effect, Effect::SpawnUpload(PathBuf::from("/docs/book.pdf")));
        assert_eq!(app.upload, OpStatus::Loading);
        assert_eq!(app.status_message, "Uploading book.pdf...");
    }

    #[test]
    fn test_successful_upload_surfaces_message_and_refreshes() {
        let mut app = test_app();
        app.answer = Some("unrelated answer".to_string());
        update(&mut app, Action::StartUpload(PathBuf::from("a.txt")));

        let effect = update(
            &mut app,
            Action::UploadFinished(Ok(UploadOutcome {
                success: true,
                message: "stored".to_string(),
            })),
        );

        assert_eq!(effect, Effect::SpawnListDocuments);
        assert_eq!(app.upload, OpStatus::Idle);
        assert_eq!(app.status_message, "stored");
        // Uploading never touches the query result.
        assert_eq!(app.answer.as_deref(), Some("unrelated answer"));
    }

    #[test]
    fn test_rejected_upload_surfaces_backend_message_verbatim() {
        let mut app = test_app();
        update(&mut app, Action::StartUpload(PathBuf::from("a.txt")));

        update(
            &mut app,
            Action::UploadFinished(Ok(UploadOutcome {
                success: false,
                message: "unsupported file type".to_string(),
            })),
        );

        assert_eq!(
            app.upload,
            OpStatus::Error("unsupported file type".to_string())
        );
    }

    #[test]
    fn test_upload_transport_failure_shows_generic_message() {
        let mut app = test_app();
        update(&mut app, Action::StartUpload(PathBuf::from("a.txt")));

        update(
            &mut app,
            Action::UploadFinished(Err(BackendError::Api {
                status: 500,
                message: "stack trace".to_string(),
            })),
        );

        assert_eq!(app.upload, OpStatus::Error(UPLOAD_FAILED_MSG.to_string()));
    }

    #[test]
    fn test_upload_and_query_statuses_are_independent() {
        let mut app = test_app();
        update(&mut app, Action::SubmitQuery("q".to_string()));
        update(&mut app, Action::StartUpload(PathBuf::from("a.txt")));
        assert_eq!(app.query, OpStatus::Loading);
        assert_eq!(app.upload, OpStatus::Loading);

        // Upload settling leaves the in-flight query untouched.
        update(
            &mut app,
            Action::UploadFinished(Err(BackendError::Network("x".to_string()))),
        );
        assert_eq!(app.query, OpStatus::Loading);
        assert!(app.upload.error().is_some());

        update(&mut app, Action::QueryFinished(ok_query("done")));
        assert_eq!(app.query, OpStatus::Idle);
        assert!(app.upload.error().is_some());
    }

    #[test]
    fn test_documents_loaded_replaces_listing() {
        let mut app = test_app();
        update(
            &mut app,
            Action::DocumentsLoaded(Ok(FileListing {
                success: true,
                files: vec!["a.pdf".to_string(), "b.txt".to_string()],
            })),
        );

        assert_eq!(app.documents, vec!["a.pdf", "b.txt"]);
        assert!(app.documents_refreshed_at.is_some());
    }

    #[test]
    fn test_documents_failure_only_touches_status_bar() {
        let mut app = test_app();
        update(
            &mut app,
            Action::DocumentsLoaded(Err(BackendError::Network("x".to_string()))),
        );

        assert_eq!(app.upload, OpStatus::Idle);
        assert_eq!(app.query, OpStatus::Idle);
        assert_eq!(app.status_message, "Could not load document list");
    }

    #[test]
    fn test_refresh_documents_effect() {
        let mut app = test_app();
        let effect = update(&mut app, Action::RefreshDocuments);
        assert_eq!(effect, Effect::SpawnListDocuments);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
