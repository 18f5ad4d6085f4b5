//! Slow-path page enrichment: fetch a listing page, reduce it to a bounded
//! text budget, ask an extraction model for product fields and merge them
//! back into the listing.

pub mod engine;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod gemini;
pub mod prompt;
pub mod sanitize;
pub mod state;

pub use engine::EnrichmentEngine;
pub use error::EnrichError;
pub use extract::{parse_extraction, strip_code_fences, ExtractedProduct};
pub use fetch::PageFetcher;
pub use gemini::GeminiClient;
pub use prompt::build_prompt;
pub use sanitize::prepare_page;
pub use state::{EnrichmentState, ENRICHMENT_CONFIDENCE_BONUS, MAX_DESCRIPTION_CHARS};
