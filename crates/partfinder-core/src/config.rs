use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_SCRAPER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Both API keys are optional here: a missing search key surfaces per request
/// as a service-unavailable condition, and a missing model key only disables
/// page enrichment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("PARTFINDER_ENV", "development"))?;
    let bind_addr = parse_addr("PARTFINDER_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("PARTFINDER_LOG_LEVEL", "info");

    let serper_api_key = optional("SERPER_API_KEY");
    let serper_base_url = or_default("PARTFINDER_SERPER_BASE_URL", "https://google.serper.dev");
    let gemini_api_key = optional("GEMINI_API_KEY");
    let gemini_base_url = or_default(
        "PARTFINDER_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let gemini_model = or_default("PARTFINDER_GEMINI_MODEL", "gemini-2.0-flash");

    let default_location = or_default("PARTFINDER_DEFAULT_LOCATION", "Sri Lanka");
    let default_region = or_default("PARTFINDER_DEFAULT_REGION", "lk");
    let default_currency = or_default("PARTFINDER_DEFAULT_CURRENCY", "LKR");

    let request_timeout_secs = parse_u64("PARTFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default("PARTFINDER_SCRAPER_USER_AGENT", DEFAULT_SCRAPER_USER_AGENT);
    let max_scrape_bytes = parse_positive_usize("PARTFINDER_MAX_SCRAPE_BYTES", "50000")?;
    let enrich_concurrency = parse_positive_usize("PARTFINDER_ENRICH_CONCURRENCY", "1")?;
    let max_enrichments = parse_u64("PARTFINDER_MAX_ENRICHMENTS", "10")?;
    let max_enrichments =
        usize::try_from(max_enrichments).map_err(|e| ConfigError::InvalidEnvVar {
            var: "PARTFINDER_MAX_ENRICHMENTS".to_string(),
            reason: e.to_string(),
        })?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        serper_api_key,
        serper_base_url,
        gemini_api_key,
        gemini_base_url,
        gemini_model,
        default_location,
        default_region,
        default_currency,
        request_timeout_secs,
        scraper_user_agent,
        max_scrape_bytes,
        enrich_concurrency,
        max_enrichments,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PARTFINDER_ENV".to_string(),
            reason: format!("expected development, test or production, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
