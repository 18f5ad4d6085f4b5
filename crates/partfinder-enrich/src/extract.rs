//! Interpretation of the extraction model's text reply.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use partfinder_search::parse::extract_price;

use crate::error::EnrichError;

/// Fields the extraction model may return. Every field is optional; the
/// model is told to use `null` for anything it cannot find.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractedProduct {
    pub vendor_name: Option<String>,
    pub product_title: Option<String>,
    #[serde(deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub availability: Option<String>,
    pub description: Option<String>,
}

/// Models sometimes quote the price or keep a currency symbol on it.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|p| p.is_finite()),
        Some(Value::String(s)) => extract_price(&s),
        _ => None,
    })
}

/// Removes a surrounding Markdown code fence (with or without a language
/// tag) from a model reply. Unfenced text is only trimmed.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line, if any.
    let body = match after_open.find('\n') {
        Some(pos) => &after_open[pos + 1..],
        None => after_open.trim_start_matches("json"),
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Parses a model reply into an [`ExtractedProduct`].
///
/// # Errors
///
/// - [`EnrichError::Parse`] if the reply is not a JSON object of the
///   expected shape once fences are removed.
/// - [`EnrichError::EmptyReply`] if the object has no keys at all.
///
/// An object whose keys are all `null` still counts as an extraction.
pub fn parse_extraction(reply: &str) -> Result<ExtractedProduct, EnrichError> {
    let object: Map<String, Value> = serde_json::from_str(strip_code_fences(reply))?;
    if object.is_empty() {
        return Err(EnrichError::EmptyReply);
    }
    Ok(serde_json::from_value(Value::Object(object))?)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
