use partfinder_core::VendorResult;

use crate::error::EnrichError;
use crate::extract::{parse_extraction, ExtractedProduct};
use crate::fetch::PageFetcher;
use crate::gemini::GeminiClient;
use crate::prompt::build_prompt;
use crate::sanitize::prepare_page;
use crate::state::EnrichmentState;

/// Page enrichment pipeline: fetch, prepare, extract.
///
/// Without an extraction model the engine is disabled and every attempt
/// fails with [`EnrichError::ModelUnavailable`] before any I/O.
pub struct EnrichmentEngine {
    fetcher: PageFetcher,
    model: Option<GeminiClient>,
    max_scrape_bytes: usize,
}

impl EnrichmentEngine {
    #[must_use]
    pub fn new(fetcher: PageFetcher, model: Option<GeminiClient>, max_scrape_bytes: usize) -> Self {
        Self {
            fetcher,
            model,
            max_scrape_bytes,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.model.is_some()
    }

    /// Runs the pipeline for one page URL.
    ///
    /// # Errors
    ///
    /// Any [`EnrichError`]; all are local to this one page.
    pub async fn extract(&self, url: &str) -> Result<ExtractedProduct, EnrichError> {
        let model = self.model.as_ref().ok_or(EnrichError::ModelUnavailable)?;

        let html = self.fetcher.fetch(url).await?;
        let page = prepare_page(&html, self.max_scrape_bytes);
        tracing::debug!(url, raw_bytes = html.len(), prepared_bytes = page.len(), "page prepared");

        let reply = model.generate(&build_prompt(&page)).await?;
        let extracted = parse_extraction(&reply)?;
        tracing::debug!(
            url,
            title = extracted.product_title.as_deref().unwrap_or("N/A"),
            price = ?extracted.price,
            "page extracted"
        );
        Ok(extracted)
    }

    /// Attempts to enrich one listing. Failures are logged and leave the
    /// listing untouched inside [`EnrichmentState::Failed`].
    pub async fn enrich(&self, listing: VendorResult) -> EnrichmentState {
        let attempted = EnrichmentState::new(listing).begin();
        let url = attempted.listing().product_url.clone();

        let outcome = self.extract(&url).await;
        if let Err(e) = &outcome {
            tracing::warn!(url = %url, error = %e, "page enrichment failed");
        }
        attempted.resolve(outcome)
    }
}
