//! Per-listing enrichment lifecycle.
//!
//! A listing moves `FastPath -> Attempted -> Merged | Failed`. Only the
//! `Attempted -> Merged` transition touches the listing; every other
//! transition carries it through unchanged, so a failed attempt always
//! leaves the fast-path data intact.

use partfinder_core::{Availability, SourceType, VendorResult};

use crate::error::EnrichError;
use crate::extract::ExtractedProduct;

pub const ENRICHMENT_CONFIDENCE_BONUS: f64 = 0.2;
pub const MAX_DESCRIPTION_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentState {
    /// Built from a search record; no enrichment tried.
    FastPath(VendorResult),
    /// Selected for enrichment, outcome pending.
    Attempted(VendorResult),
    /// Extracted fields merged in.
    Merged(VendorResult),
    /// Enrichment failed; the listing is exactly as it was before.
    Failed {
        listing: VendorResult,
        reason: String,
    },
}

impl EnrichmentState {
    #[must_use]
    pub fn new(listing: VendorResult) -> Self {
        Self::FastPath(listing)
    }

    /// `FastPath -> Attempted`. Any other state is returned as is.
    #[must_use]
    pub fn begin(self) -> Self {
        match self {
            Self::FastPath(listing) => Self::Attempted(listing),
            other => other,
        }
    }

    /// Settles an attempt. Outside `Attempted` the outcome is ignored.
    #[must_use]
    pub fn resolve(self, outcome: Result<ExtractedProduct, EnrichError>) -> Self {
        match (self, outcome) {
            (Self::Attempted(mut listing), Ok(extracted)) => {
                merge(&mut listing, extracted);
                Self::Merged(listing)
            }
            (Self::Attempted(listing), Err(e)) => Self::Failed {
                listing,
                reason: e.to_string(),
            },
            (other, _) => other,
        }
    }

    #[must_use]
    pub fn is_merged(&self) -> bool {
        matches!(self, Self::Merged(_))
    }

    #[must_use]
    pub fn listing(&self) -> &VendorResult {
        match self {
            Self::FastPath(listing)
            | Self::Attempted(listing)
            | Self::Merged(listing)
            | Self::Failed { listing, .. } => listing,
        }
    }

    #[must_use]
    pub fn into_listing(self) -> VendorResult {
        match self {
            Self::FastPath(listing)
            | Self::Attempted(listing)
            | Self::Merged(listing)
            | Self::Failed { listing, .. } => listing,
        }
    }
}

/// Overwrites listing fields with every present, non-empty extracted value,
/// then flips provenance to the slow path and raises confidence.
fn merge(listing: &mut VendorResult, extracted: ExtractedProduct) {
    if let Some(price) = extracted.price.filter(|p| p.is_finite() && *p > 0.0) {
        listing.price = Some(price);
    }
    if let Some(currency) = non_empty(extracted.currency) {
        listing.currency = currency.to_uppercase();
    }
    if let Some(availability) = extracted
        .availability
        .as_deref()
        .and_then(Availability::from_label)
    {
        listing.availability = availability;
    }
    if let Some(vendor) = non_empty(extracted.vendor_name) {
        listing.vendor_name = vendor;
    }
    if let Some(title) = non_empty(extracted.product_title) {
        listing.product_title = title;
    }
    if let Some(description) = non_empty(extracted.description) {
        listing.description = Some(description.chars().take(MAX_DESCRIPTION_CHARS).collect());
    }

    listing.source_type = SourceType::SlowPathScrape;
    listing.raise_confidence(ENRICHMENT_CONFIDENCE_BONUS);
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
