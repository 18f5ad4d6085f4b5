use serde::{Deserialize, Serialize};

use crate::vendor::VendorResult;
use crate::CoreError;

pub const MAX_PART_NAME_LEN: usize = 200;
pub const MAX_PART_NUMBER_LEN: usize = 100;
pub const MAX_MANUFACTURER_LEN: usize = 100;
pub const MAX_RESULTS_LIMIT: u32 = 50;
pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const QUICK_SEARCH_MAX_RESULTS: u32 = 5;

/// A request to locate purchase options for one part.
///
/// `location` is optional on the wire; the orchestrator resolves it to the
/// configured default region when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartSearchRequest {
    pub part_name: String,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_include_scraping")]
    pub include_scraping: bool,
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

fn default_include_scraping() -> bool {
    true
}

impl PartSearchRequest {
    /// A full request with defaults for everything but the part name.
    #[must_use]
    pub fn new(part_name: impl Into<String>) -> Self {
        Self {
            part_name: part_name.into(),
            part_number: None,
            manufacturer: None,
            location: None,
            max_results: DEFAULT_MAX_RESULTS,
            include_scraping: true,
        }
    }

    /// The fast-path-only request used for quick lookups: five results, no scraping.
    #[must_use]
    pub fn quick(part_name: impl Into<String>, location: Option<String>) -> Self {
        Self {
            location,
            max_results: QUICK_SEARCH_MAX_RESULTS,
            include_scraping: false,
            ..Self::new(part_name)
        }
    }

    /// Checks field bounds before any outbound call is made.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let name_len = self.part_name.chars().count();
        if self.part_name.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "part_name",
                reason: "must not be empty".to_owned(),
            });
        }
        if name_len > MAX_PART_NAME_LEN {
            return Err(CoreError::Validation {
                field: "part_name",
                reason: format!("must be at most {MAX_PART_NAME_LEN} characters, got {name_len}"),
            });
        }
        check_optional_len("part_number", self.part_number.as_deref(), MAX_PART_NUMBER_LEN)?;
        check_optional_len("manufacturer", self.manufacturer.as_deref(), MAX_MANUFACTURER_LEN)?;

        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_results) {
            return Err(CoreError::Validation {
                field: "max_results",
                reason: format!(
                    "must be between 1 and {MAX_RESULTS_LIMIT}, got {}",
                    self.max_results
                ),
            });
        }
        Ok(())
    }
}

fn check_optional_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), CoreError> {
    let Some(value) = value else {
        return Ok(());
    };
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation {
            field,
            reason: format!("must be at most {max} characters, got {len}"),
        });
    }
    Ok(())
}

/// The ranked outcome of one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSearchResponse {
    /// Ordered by descending confidence; ties keep discovery order.
    pub results: Vec<VendorResult>,
    pub search_query: String,
    pub total_results: usize,
    pub fast_path_count: usize,
    pub slow_path_count: usize,
    pub search_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_applies_defaults() {
        let request: PartSearchRequest =
            serde_json::from_str(r#"{"part_name": "SKF 6205-2RS bearing"}"#).expect("parse");
        assert_eq!(request.max_results, DEFAULT_MAX_RESULTS);
        assert!(request.include_scraping);
        assert!(request.location.is_none());
        assert!(request.part_number.is_none());
    }

    #[test]
    fn quick_request_disables_scraping() {
        let request = PartSearchRequest::quick("V-belt A42", Some("India".to_owned()));
        assert_eq!(request.max_results, QUICK_SEARCH_MAX_RESULTS);
        assert!(!request.include_scraping);
        assert_eq!(request.location.as_deref(), Some("India"));
    }

    #[test]
    fn validate_accepts_default_request() {
        assert!(PartSearchRequest::new("hydraulic pump").validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_part_name() {
        let err = PartSearchRequest::new("   ").validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "part_name", .. }));
    }

    #[test]
    fn validate_rejects_overlong_part_name() {
        let err = PartSearchRequest::new("x".repeat(MAX_PART_NAME_LEN + 1))
            .validate()
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "part_name", .. }));
    }

    #[test]
    fn validate_rejects_max_results_out_of_range() {
        let mut request = PartSearchRequest::new("bearing");
        request.max_results = 0;
        assert!(matches!(
            request.validate(),
            Err(CoreError::Validation { field: "max_results", .. })
        ));

        request.max_results = MAX_RESULTS_LIMIT + 1;
        assert!(matches!(
            request.validate(),
            Err(CoreError::Validation { field: "max_results", .. })
        ));

        request.max_results = MAX_RESULTS_LIMIT;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn validate_rejects_overlong_manufacturer() {
        let mut request = PartSearchRequest::new("bearing");
        request.manufacturer = Some("m".repeat(MAX_MANUFACTURER_LEN + 1));
        assert!(matches!(
            request.validate(),
            Err(CoreError::Validation { field: "manufacturer", .. })
        ));
    }
}
