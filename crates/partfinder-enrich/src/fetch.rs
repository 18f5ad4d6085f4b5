//! Product page retrieval for the enrichment path.

use std::time::Duration;

use reqwest::redirect::Policy;

use crate::error::EnrichError;

const MAX_REDIRECTS: usize = 10;

/// Fetches listing pages with a browser-like identity.
///
/// The timeout covers the whole exchange, body included.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// # Errors
    ///
    /// Returns [`EnrichError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, EnrichError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Returns the page body as text.
    ///
    /// # Errors
    ///
    /// - [`EnrichError::Fetch`] on network failure, timeout or an unreadable body.
    /// - [`EnrichError::PageStatus`] when the final response is not 2xx.
    pub async fn fetch(&self, url: &str) -> Result<String, EnrichError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|source| EnrichError::Fetch {
                url: url.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichError::PageStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        response.text().await.map_err(|source| EnrichError::Fetch {
            url: url.to_owned(),
            source,
        })
    }
}
