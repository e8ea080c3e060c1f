pub mod client;
pub mod types;

pub use client::{BackendError, DocQaBackend, HttpBackend};
pub use types::{FileListing, QueryOutcome, QueryRequest, UploadOutcome};
