//! HTTP client for the Serper search API.
//!
//! One POST per call against either the `shopping` or the `search` surface.
//! Raw listing records are returned untouched; callers normalise them with
//! [`crate::normalize::parse_listing`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::SearchError;
use crate::region::region_code;
use crate::types::{SearchMode, SerperRequest, SerperResponse};

pub const DEFAULT_BASE_URL: &str = "https://google.serper.dev/";

/// Client for the Serper search API.
///
/// A missing API key is not an error at construction time: every search
/// call fails fast with [`SearchError::MissingApiKey`] instead, so a server
/// can start and report itself degraded.
pub struct SerperClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    default_region: String,
}

impl SerperClient {
    /// Creates a client pointed at the production Serper API.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<String>,
        timeout_secs: u64,
        default_region: &str,
    ) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL, default_region)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<String>,
        timeout_secs: u64,
        base_url: &str,
        default_region: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("partfinder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| SearchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: parsed,
            default_region: default_region.to_owned(),
        })
    }

    /// Whether a credential is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Runs one search and returns the surface's raw listing records.
    ///
    /// In [`SearchMode::Organic`] the payload's `organic` records come first,
    /// followed by any `shopping` records carried in the same response.
    ///
    /// # Errors
    ///
    /// - [`SearchError::MissingApiKey`] before any I/O when no key is set.
    /// - [`SearchError::Http`] on network failure or timeout.
    /// - [`SearchError::UnexpectedStatus`] on a non-2xx response.
    /// - [`SearchError::Deserialize`] if the body is not the expected shape.
    pub async fn search(
        &self,
        query: &str,
        location: &str,
        num: u32,
        mode: SearchMode,
    ) -> Result<Vec<Value>, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        let url = self
            .base_url
            .join(mode.path())
            .map_err(|e| SearchError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let body = SerperRequest {
            q: query,
            location,
            gl: region_code(location, &self.default_region),
            num,
        };

        tracing::debug!(%url, %mode, query, gl = body.gl, num, "serper request");

        let response = self
            .client
            .post(url.clone())
            .header("X-API-KEY", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let raw: Value = response.json().await?;
        let parsed: SerperResponse =
            serde_json::from_value(raw).map_err(|e| SearchError::Deserialize {
                context: format!("serper {mode} response"),
                source: e,
            })?;

        let listings = parsed.into_listings(mode);
        tracing::debug!(%mode, count = listings.len(), "serper response");
        Ok(listings)
    }
}
