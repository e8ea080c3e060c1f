//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{BackendError, DocQaBackend, FileListing, QueryOutcome, UploadOutcome};

/// A no-op backend for tests that don't need real network calls.
pub struct NoopBackend;

#[async_trait]
impl DocQaBackend for NoopBackend {
    fn name(&self) -> &str {
        "noop"
    }

    async fn upload_document(
        &self,
        _file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<UploadOutcome, BackendError> {
        Ok(UploadOutcome {
            success: true,
            message: String::new(),
        })
    }

    async fn submit_query(&self, _question: &str) -> Result<QueryOutcome, BackendError> {
        Ok(QueryOutcome {
            success: true,
            answer: String::new(),
        })
    }

    async fn list_documents(&self) -> Result<FileListing, BackendError> {
        Ok(FileListing {
            success: true,
            files: Vec::new(),
        })
    }
}

/// Creates a test App with a NoopBackend.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopBackend), "http://localhost:8000/api".to_string())
}
