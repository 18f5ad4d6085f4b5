//! Wire types for the Serper search API.
//!
//! Listing records are kept as raw `serde_json::Value`s: the shopping and
//! organic surfaces use overlapping but inconsistent field sets (`source` vs
//! `site`, string vs numeric `price`, `reviews` vs `ratingCount`), and the
//! client contract is to hand records back unmodified. Interpretation lives in
//! [`crate::normalize`].

use serde::{Deserialize, Serialize};

/// Which search surface to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Product listings, usually carrying a price.
    Shopping,
    /// General web results.
    Organic,
}

impl SearchMode {
    pub(crate) fn path(self) -> &'static str {
        match self {
            SearchMode::Shopping => "shopping",
            SearchMode::Organic => "search",
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Shopping => write!(f, "shopping"),
            SearchMode::Organic => write!(f, "organic"),
        }
    }
}

/// Request body for `POST /search` and `POST /shopping`.
#[derive(Debug, Serialize)]
pub(crate) struct SerperRequest<'a> {
    pub q: &'a str,
    pub location: &'a str,
    pub gl: &'a str,
    pub num: u32,
}

/// Response envelope. Either array may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct SerperResponse {
    #[serde(default)]
    pub organic: Vec<serde_json::Value>,
    #[serde(default)]
    pub shopping: Vec<serde_json::Value>,
}

impl SerperResponse {
    /// Shopping mode yields only shopping records; organic mode yields organic
    /// records followed by any shopping records in the same payload.
    #[must_use]
    pub fn into_listings(self, mode: SearchMode) -> Vec<serde_json::Value> {
        match mode {
            SearchMode::Shopping => self.shopping,
            SearchMode::Organic => {
                let mut listings = self.organic;
                listings.extend(self.shopping);
                listings
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_arrays_default_to_empty() {
        let response: SerperResponse =
            serde_json::from_value(json!({"searchParameters": {"q": "x"}})).expect("parse");
        assert!(response.organic.is_empty());
        assert!(response.shopping.is_empty());
    }

    #[test]
    fn organic_mode_appends_shopping_records() {
        let response: SerperResponse = serde_json::from_value(json!({
            "organic": [{"link": "https://a.example"}],
            "shopping": [{"link": "https://b.example"}]
        }))
        .expect("parse");
        let listings = response.into_listings(SearchMode::Organic);
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0]["link"], "https://a.example");
        assert_eq!(listings[1]["link"], "https://b.example");
    }

    #[test]
    fn shopping_mode_ignores_organic_records() {
        let response: SerperResponse = serde_json::from_value(json!({
            "organic": [{"link": "https://a.example"}],
            "shopping": [{"link": "https://b.example"}]
        }))
        .expect("parse");
        let listings = response.into_listings(SearchMode::Shopping);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0]["link"], "https://b.example");
    }
}
