//! Normalization from raw Serper listing records to [`VendorResult`].
//!
//! String heuristics are delegated to [`crate::parse`]; this module decides
//! which fields feed them and how the initial confidence is scored.

use partfinder_core::{
    Availability, SourceType, VendorResult, UNKNOWN_PRODUCT_TITLE, UNKNOWN_VENDOR,
};
use serde_json::Value;

use crate::parse::{detect_currency, is_truthy, price_from_value, vendor_from_url};

pub const BASE_CONFIDENCE: f64 = 0.5;
pub const PRICE_CONFIDENCE_BONUS: f64 = 0.3;
pub const RATING_CONFIDENCE_BONUS: f64 = 0.1;
pub const REVIEWS_CONFIDENCE_BONUS: f64 = 0.1;

/// Normalizes one raw listing into a fast-path [`VendorResult`].
///
/// Returns `None` for a record without a `link`; every other missing field
/// falls back to a placeholder.
#[must_use]
pub fn parse_listing(raw: &Value, default_currency: &str) -> Option<VendorResult> {
    let product_url = str_field(raw, "link")?.to_owned();

    let (price, currency) = match raw.get("price") {
        Some(value) => {
            let currency = match value {
                Value::String(s) => detect_currency(s, default_currency),
                _ => default_currency.to_owned(),
            };
            (price_from_value(value), currency)
        }
        None => (None, default_currency.to_owned()),
    };

    let vendor_name = str_field(raw, "source")
        .or_else(|| str_field(raw, "site"))
        .filter(|name| *name != UNKNOWN_VENDOR)
        .map(str::to_owned)
        .or_else(|| vendor_from_url(&product_url))
        .unwrap_or_else(|| UNKNOWN_VENDOR.to_owned());

    let product_title = str_field(raw, "title")
        .unwrap_or(UNKNOWN_PRODUCT_TITLE)
        .to_owned();

    let description = str_field(raw, "snippet")
        .or_else(|| str_field(raw, "description"))
        .map(str::to_owned);

    let image_url = str_field(raw, "imageUrl").map(str::to_owned);

    let mut result = VendorResult {
        vendor_name,
        product_title,
        price,
        currency,
        availability: Availability::Unknown,
        product_url,
        source_type: SourceType::FastPathSnippet,
        confidence_score: BASE_CONFIDENCE,
        image_url,
        description,
    };

    if result.price.is_some() {
        result.raise_confidence(PRICE_CONFIDENCE_BONUS);
    }
    if is_truthy(raw.get("rating")) {
        result.raise_confidence(RATING_CONFIDENCE_BONUS);
    }
    if is_truthy(raw.get("reviews")) || is_truthy(raw.get("ratingCount")) {
        result.raise_confidence(REVIEWS_CONFIDENCE_BONUS);
    }

    Some(result)
}

/// Returns a trimmed, non-empty string field.
fn str_field<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
