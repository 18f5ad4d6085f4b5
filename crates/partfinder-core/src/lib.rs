//! Shared domain model and configuration for the PartFinder workspace.

mod app_config;
mod config;
mod query;
mod request;
mod vendor;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use query::build_search_query;
pub use request::{
    PartSearchRequest, PartSearchResponse, DEFAULT_MAX_RESULTS, MAX_MANUFACTURER_LEN,
    MAX_PART_NAME_LEN, MAX_PART_NUMBER_LEN, MAX_RESULTS_LIMIT, QUICK_SEARCH_MAX_RESULTS,
};
pub use vendor::{Availability, SourceType, VendorResult, UNKNOWN_PRODUCT_TITLE, UNKNOWN_VENDOR};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}
