//! The normalized listing every search path produces.

use serde::{Deserialize, Serialize};

/// Placeholder title when a listing carries none.
pub const UNKNOWN_PRODUCT_TITLE: &str = "Unknown Product";

/// Vendor name used when neither the source metadata nor the URL yields one.
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// How a [`VendorResult`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Built directly from a search API record; no page fetch.
    #[serde(rename = "serper_snippet")]
    FastPathSnippet,
    /// Enriched by fetching the listing page and machine-parsing it.
    #[serde(rename = "page_scrape")]
    SlowPathScrape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Availability {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Limited Stock")]
    LimitedStock,
    #[serde(rename = "Pre-Order")]
    PreOrder,
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Availability {
    pub const ALL: [Availability; 5] = [
        Availability::InStock,
        Availability::OutOfStock,
        Availability::LimitedStock,
        Availability::PreOrder,
        Availability::Unknown,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Availability::InStock => "In Stock",
            Availability::OutOfStock => "Out of Stock",
            Availability::LimitedStock => "Limited Stock",
            Availability::PreOrder => "Pre-Order",
            Availability::Unknown => "Unknown",
        }
    }

    /// Parses a free-form availability label.
    ///
    /// Matching ignores case, spaces, hyphens and underscores, so `"In Stock"`,
    /// `"in_stock"` and `"IN-STOCK"` are all [`Availability::InStock`].
    /// Returns `None` for anything outside the five known values.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let squashed: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match squashed.as_str() {
            "instock" => Some(Availability::InStock),
            "outofstock" | "soldout" => Some(Availability::OutOfStock),
            "limitedstock" | "limited" => Some(Availability::LimitedStock),
            "preorder" => Some(Availability::PreOrder),
            "unknown" => Some(Availability::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One normalized purchase option for a part.
///
/// `confidence_score` only ever moves upward; use [`VendorResult::raise_confidence`]
/// rather than assigning it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorResult {
    pub vendor_name: String,
    pub product_title: String,
    pub price: Option<f64>,
    pub currency: String,
    pub availability: Availability,
    pub product_url: String,
    pub source_type: SourceType,
    pub confidence_score: f64,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl VendorResult {
    /// Adds `increment` to the confidence score, capped at 1.0.
    ///
    /// Negative or non-finite increments are ignored.
    pub fn raise_confidence(&mut self, increment: f64) {
        if !increment.is_finite() || increment <= 0.0 {
            return;
        }
        self.confidence_score = (self.confidence_score + increment).min(1.0);
    }

    /// A listing qualifies for page enrichment when it has a URL but no price.
    #[must_use]
    pub fn needs_enrichment(&self) -> bool {
        self.price.is_none() && !self.product_url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(confidence: f64) -> VendorResult {
        VendorResult {
            vendor_name: "Bearing House".to_owned(),
            product_title: "SKF 6205-2RS".to_owned(),
            price: None,
            currency: "LKR".to_owned(),
            availability: Availability::Unknown,
            product_url: "https://bearinghouse.lk/p/6205".to_owned(),
            source_type: SourceType::FastPathSnippet,
            confidence_score: confidence,
            image_url: None,
            description: None,
        }
    }

    #[test]
    fn raise_confidence_caps_at_one() {
        let mut result = listing(0.9);
        result.raise_confidence(0.2);
        assert!((result.confidence_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn raise_confidence_ignores_negative_increment() {
        let mut result = listing(0.5);
        result.raise_confidence(-0.3);
        result.raise_confidence(f64::NAN);
        assert!((result.confidence_score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn needs_enrichment_requires_url_and_missing_price() {
        let mut result = listing(0.5);
        assert!(result.needs_enrichment());

        result.price = Some(12.0);
        assert!(!result.needs_enrichment());

        result.price = None;
        result.product_url = "  ".to_owned();
        assert!(!result.needs_enrichment());
    }

    #[test]
    fn availability_parses_loose_labels() {
        assert_eq!(Availability::from_label("In Stock"), Some(Availability::InStock));
        assert_eq!(Availability::from_label("in_stock"), Some(Availability::InStock));
        assert_eq!(Availability::from_label("OUT-OF-STOCK"), Some(Availability::OutOfStock));
        assert_eq!(Availability::from_label("Pre-Order"), Some(Availability::PreOrder));
        assert_eq!(Availability::from_label("limited"), Some(Availability::LimitedStock));
        assert_eq!(Availability::from_label("ships next week"), None);
    }

    #[test]
    fn availability_labels_round_trip_through_from_label() {
        for availability in Availability::ALL {
            assert_eq!(Availability::from_label(availability.label()), Some(availability));
        }
    }

    #[test]
    fn vendor_result_serializes_wire_labels() {
        let mut result = listing(0.7);
        result.source_type = SourceType::SlowPathScrape;
        result.availability = Availability::PreOrder;
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["source_type"], "page_scrape");
        assert_eq!(json["availability"], "Pre-Order");
        assert!(json["price"].is_null());
    }
}
