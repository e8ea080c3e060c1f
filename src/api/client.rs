//! HTTP client for the document-QA backend.
//!
//! The backend exposes three REST operations: upload a document, submit a
//! question, and list uploaded documents. All three return outcome envelopes
//! carrying an explicit `success` flag alongside the payload, so application
//! failures are distinguishable from transport failures.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart;

use super::types::{FileListing, QueryOutcome, QueryRequest, UploadOutcome};

/// Errors that can occur while talking to the backend.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum BackendError {
    /// Client misconfigured (unusable base URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// Backend returned a non-2xx status. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to decode the backend's response body. Not retryable.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The backend seam: three remote operations behind one trait so the
/// coordinator and tests never depend on a concrete transport.
#[async_trait]
pub trait DocQaBackend: Send + Sync {
    /// Returns a short name for logging.
    fn name(&self) -> &str;

    /// Uploads one document as a multipart form (`file` field).
    async fn upload_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadOutcome, BackendError>;

    /// Submits a natural-language question. Callers guarantee the text is
    /// non-blank; this layer performs no input validation.
    async fn submit_query(&self, question: &str) -> Result<QueryOutcome, BackendError>;

    /// Fetches the list of documents the backend has indexed.
    async fn list_documents(&self) -> Result<FileListing, BackendError>;
}

/// Reqwest implementation of [`DocQaBackend`].
///
/// No retries and no backoff; failures surface to the caller unchanged.
/// A request timeout is applied only when the caller configures one.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Creates a backend client against the given base URL (e.g.
    /// `http://localhost:8000/api`). `timeout` bounds each request; `None`
    /// leaves the transport's own behavior in place.
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Checks the status and decodes the JSON body as `T`.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        debug!("Backend response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend API error: {} - {}", status, err_body);
            return Err(BackendError::Api {
                status,
                message: err_body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl DocQaBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn upload_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadOutcome, BackendError> {
        debug!("Uploading {} ({} bytes)", file_name, bytes.len());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| BackendError::Config(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn submit_query(&self, question: &str) -> Result<QueryOutcome, BackendError> {
        let body = QueryRequest {
            question: question.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/query", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn list_documents(&self) -> Result<FileListing, BackendError> {
        let response = self
            .client
            .get(format!("{}/files", self.base_url))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:8000/api/".to_string(), None).unwrap();
        assert_eq!(backend.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_error_display() {
        let err = BackendError::Api {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 503): down");

        let err = BackendError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
