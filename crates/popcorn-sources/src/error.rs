use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// The provider answered but reported no match (`Response: "False"`)
    #[error("no match: {0}")]
    NotFound(String),

    #[error("request failed with HTTP status {status}")]
    Status { status: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("OMDb API key is not configured")]
    MissingApiKey,

    /// The task running the fetch died (panicked) before producing a result
    #[error("fetch task failed: {0}")]
    TaskFailed(String),
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}
