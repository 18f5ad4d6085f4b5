use partfinder_core::CoreError;
use partfinder_enrich::EnrichError;
use partfinder_search::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinderError {
    #[error("{0}")]
    Validation(#[from] CoreError),

    /// A required credential is missing. Fatal for the request.
    #[error("{0}")]
    Configuration(String),

    #[error("search failed: {0}")]
    Search(SearchError),

    /// A collaborator client could not be constructed.
    #[error("client setup failed: {0}")]
    Client(String),
}

impl FinderError {
    /// `true` when the request cannot be served until configuration changes.
    #[must_use]
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, FinderError::Configuration(_))
    }
}

impl From<SearchError> for FinderError {
    fn from(e: SearchError) -> Self {
        if e.is_configuration() {
            FinderError::Configuration(e.to_string())
        } else {
            FinderError::Search(e)
        }
    }
}

impl From<EnrichError> for FinderError {
    fn from(e: EnrichError) -> Self {
        FinderError::Client(e.to_string())
    }
}
