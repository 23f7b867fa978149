/// Failures talking to the activities backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("backend url cannot carry path segments: {0}")]
    InvalidBaseUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend rejected request ({status})")]
    Rejected { status: u16, detail: Option<String> },
}

impl ApiError {
    /// Text the backend supplied for a rejection, if any.
    pub fn user_detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid ROSTER_BACKEND_URL {value:?}: {reason}")]
    BackendUrl { value: String, reason: String },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
