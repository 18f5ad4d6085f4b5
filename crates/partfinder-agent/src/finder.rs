use std::time::Instant;

use futures::stream::{self, StreamExt};

use partfinder_core::{
    build_search_query, AppConfig, PartSearchRequest, PartSearchResponse, VendorResult,
};
use partfinder_enrich::{EnrichmentEngine, EnrichmentState, GeminiClient, PageFetcher};
use partfinder_search::{parse_listing, SearchMode, SerperClient};

use crate::error::FinderError;

/// Per-process orchestration settings.
#[derive(Debug, Clone)]
pub struct FinderOptions {
    /// Used when a request carries no location.
    pub default_location: String,
    /// Used when a listing carries no currency cue.
    pub default_currency: String,
    /// Enrichments in flight at once for one request; 1 is sequential.
    pub enrich_concurrency: usize,
    /// Upper bound on enrichment attempts for one request.
    pub max_enrichments: usize,
}

/// Dual-path part search.
///
/// Constructed once per process and shared by reference. Holds no
/// per-request state: every [`PartFinder::find_parts`] call owns its own
/// result list and counters.
pub struct PartFinder {
    search: SerperClient,
    enricher: EnrichmentEngine,
    options: FinderOptions,
}

impl PartFinder {
    #[must_use]
    pub fn new(search: SerperClient, enricher: EnrichmentEngine, options: FinderOptions) -> Self {
        Self {
            search,
            enricher,
            options,
        }
    }

    /// Builds the search client, page fetcher and optional extraction model
    /// from configuration.
    ///
    /// A missing search key is accepted here and reported per request; a
    /// missing model key disables enrichment.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Client`] if an HTTP client cannot be built or a
    /// configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, FinderError> {
        let search = SerperClient::with_base_url(
            config.serper_api_key.clone(),
            config.request_timeout_secs,
            &config.serper_base_url,
            &config.default_region,
        )
        .map_err(|e| FinderError::Client(e.to_string()))?;

        let fetcher = PageFetcher::new(config.request_timeout_secs, &config.scraper_user_agent)?;
        let model = match config.gemini_api_key.as_deref() {
            Some(key) => Some(GeminiClient::with_base_url(
                key,
                &config.gemini_model,
                config.request_timeout_secs,
                &config.gemini_base_url,
            )?),
            None => {
                tracing::warn!("GEMINI_API_KEY not configured; page enrichment disabled");
                None
            }
        };
        if config.serper_api_key.is_none() {
            tracing::warn!("SERPER_API_KEY not configured; searches will fail");
        }

        Ok(Self::new(
            search,
            EnrichmentEngine::new(fetcher, model, config.max_scrape_bytes),
            FinderOptions {
                default_location: config.default_location.clone(),
                default_currency: config.default_currency.clone(),
                enrich_concurrency: config.enrich_concurrency,
                max_enrichments: config.max_enrichments,
            },
        ))
    }

    #[must_use]
    pub fn search_configured(&self) -> bool {
        self.search.has_api_key()
    }

    #[must_use]
    pub fn enrichment_enabled(&self) -> bool {
        self.enricher.is_enabled()
    }

    /// Runs one search request end to end.
    ///
    /// Records without a link are dropped before they count toward either
    /// path.
    ///
    /// Shopping listings fill the fast path first. When they fall short of
    /// `max_results`, organic listings top up the remainder and, if scraping
    /// is allowed, the price-less ones are enriched from their pages. The
    /// combined list is sorted by confidence, highest first, with ties kept
    /// in discovery order.
    ///
    /// # Errors
    ///
    /// - [`FinderError::Validation`] if the request is out of bounds.
    /// - [`FinderError::Configuration`] if no search key is configured.
    /// - [`FinderError::Search`] if either search call fails. No partial
    ///   response is returned.
    pub async fn find_parts(
        &self,
        request: &PartSearchRequest,
    ) -> Result<PartSearchResponse, FinderError> {
        let started = Instant::now();
        request.validate()?;

        let location = request
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.options.default_location.as_str());
        let search_query = build_search_query(request, location);
        let max_results = usize::try_from(request.max_results).unwrap_or(usize::MAX);

        tracing::info!(
            query = %search_query,
            max_results,
            include_scraping = request.include_scraping,
            "part search started"
        );

        let shopping = self
            .search
            .search(&search_query, location, request.max_results, SearchMode::Shopping)
            .await?;
        let mut results: Vec<VendorResult> = shopping
            .iter()
            .filter_map(|raw| parse_listing(raw, &self.options.default_currency))
            .take(max_results)
            .collect();
        let fast_path_count = results.len();

        let mut slow_path_count = 0;
        if results.len() < max_results {
            let remaining = max_results - results.len();
            let organic = self
                .search
                .search(
                    &search_query,
                    location,
                    u32::try_from(remaining).unwrap_or(request.max_results),
                    SearchMode::Organic,
                )
                .await?;
            let candidates: Vec<VendorResult> = organic
                .iter()
                .filter_map(|raw| parse_listing(raw, &self.options.default_currency))
                .take(remaining)
                .collect();

            let (organic_results, merged) =
                self.enrich_organic(candidates, request.include_scraping).await;
            slow_path_count = merged;
            results.extend(organic_results);
        }

        // `sort_by` is stable, so equal scores keep discovery order.
        results.sort_by(|a, b| b.confidence_score.total_cmp(&a.confidence_score));

        let search_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            query = %search_query,
            total = results.len(),
            fast_path_count,
            slow_path_count,
            search_time_ms,
            "part search finished"
        );

        Ok(PartSearchResponse {
            total_results: results.len(),
            results,
            search_query,
            fast_path_count,
            slow_path_count,
            search_time_ms,
        })
    }

    /// Enriches eligible organic listings and returns them in their original
    /// order together with the number of successful merges.
    ///
    /// Eligibility (no price, has URL) and the per-request attempt cap are
    /// decided up front in discovery order, so the outcome does not depend on
    /// which enrichment finishes first.
    async fn enrich_organic(
        &self,
        listings: Vec<VendorResult>,
        include_scraping: bool,
    ) -> (Vec<VendorResult>, usize) {
        if !include_scraping {
            return (listings, 0);
        }
        if !self.enricher.is_enabled() {
            tracing::debug!("extraction model not configured; skipping page enrichment");
            return (listings, 0);
        }

        let mut budget = self.options.max_enrichments;
        let planned: Vec<(VendorResult, bool)> = listings
            .into_iter()
            .map(|listing| {
                let eligible = budget > 0 && listing.needs_enrichment();
                if eligible {
                    budget -= 1;
                }
                (listing, eligible)
            })
            .collect();

        let attempts = planned.iter().filter(|(_, eligible)| *eligible).count();
        if attempts > 0 {
            tracing::debug!(
                attempts,
                concurrency = self.options.enrich_concurrency,
                "enriching organic listings"
            );
        }

        let states = stream::iter(planned.into_iter().map(|(listing, eligible)| async move {
            if eligible {
                self.enricher.enrich(listing).await
            } else {
                EnrichmentState::new(listing)
            }
        }))
        .buffered(self.options.enrich_concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

        let merged = states.iter().filter(|s| s.is_merged()).count();
        let listings = states
            .into_iter()
            .map(EnrichmentState::into_listing)
            .collect();
        (listings, merged)
    }
}
