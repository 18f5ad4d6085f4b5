use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("SERPER_API_KEY not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid search base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl SearchError {
    /// `true` for the missing-credential fault, which callers surface as
    /// service-unavailable rather than as a transport failure.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, SearchError::MissingApiKey)
    }
}
