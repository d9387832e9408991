use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Backend returned status {status} for {url}")]
    HttpStatus { status: u16, url: String },
    #[error("Search query is empty")]
    EmptyQuery,
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Request task failed: {0}")]
    TaskFailed(String),
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl CatalogError {
    /// Short label used by the error banner.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::Network(_) | CatalogError::HttpStatus { .. } => "network failure",
            CatalogError::EmptyQuery => "empty query",
            CatalogError::MalformedResponse(_) => "malformed response",
            CatalogError::TaskFailed(_) => "request failure",
            CatalogError::InvalidBaseUrl { .. } => "configuration error",
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::MalformedResponse(err.to_string())
    }
}
