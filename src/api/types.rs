use serde::{Deserialize, Serialize};

/// Request body for the query endpoint.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub question: String,
}

/// Response envelope for a document upload.
///
/// The backend reports application-level failures through `success: false`
/// plus a human-readable `message`, independent of the HTTP status code.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Response envelope for a question submission.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub success: bool,
    #[serde(default)]
    pub answer: String,
}

/// Response envelope for the uploaded-documents listing.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FileListing {
    pub success: bool,
    #[serde(default)]
    pub files: Vec<String>,
}
