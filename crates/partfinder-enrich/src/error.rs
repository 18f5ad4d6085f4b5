use thiserror::Error;

/// Failures of a single page enrichment. None of these abort a search: the
/// orchestrator logs them and keeps the listing at its fast-path state.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("extraction model not configured")]
    ModelUnavailable,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("page fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    PageStatus { status: u16, url: String },

    #[error("extraction model returned HTTP {status}: {body}")]
    ModelStatus { status: u16, body: String },

    #[error("extraction model returned no text")]
    EmptyReply,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
