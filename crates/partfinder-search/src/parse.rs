//! Pure string heuristics used to interpret listing fields: price, currency,
//! vendor domain. No I/O; see [`crate::normalize`] for how they compose.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid number regex"));

/// Currency markers in priority order. When a string carries markers for more
/// than one currency, the earliest entry in this table wins.
///
/// INR sits ahead of LKR so that an explicit `INR` or `₹` is not swallowed by
/// the shared `Rs` abbreviation, which maps to LKR.
const CURRENCY_MARKERS: [(&str, &[&str]); 5] = [
    ("USD", &["USD", "$"]),
    ("INR", &["INR", "₹"]),
    ("LKR", &["LKR", "Rs"]),
    ("EUR", &["EUR", "€"]),
    ("GBP", &["GBP", "£"]),
];

/// Extracts the first numeric token from a price string.
///
/// Thousands separators (`,`) are removed before scanning, so
/// `"Rs 12,450.00"` yields `12450.0`. Returns `None` when no digits are present.
#[must_use]
pub fn extract_price(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    NUMBER_RE
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|p| p.is_finite())
}

/// Reads a price from a JSON field that may be a number or a string.
#[must_use]
pub fn price_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|p| p.is_finite() && *p >= 0.0),
        Value::String(s) => extract_price(s),
        _ => None,
    }
}

/// Infers an ISO currency code from textual cues in `text`.
///
/// Falls back to `default` when no marker matches.
#[must_use]
pub fn detect_currency(text: &str, default: &str) -> String {
    CURRENCY_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| text.contains(m)))
        .map_or_else(|| default.to_owned(), |(code, _)| (*code).to_owned())
}

/// Derives a display vendor name from a listing URL: the host with any
/// leading `www.` removed.
#[must_use]
pub fn vendor_from_url(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    (!host.is_empty()).then(|| host.to_owned())
}

/// Loose truthiness for optional signal fields: present, non-null, non-zero,
/// non-empty.
#[must_use]
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
