use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub serper_api_key: Option<String>,
    pub serper_base_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub default_location: String,
    pub default_region: String,
    pub default_currency: String,
    pub request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub max_scrape_bytes: usize,
    pub enrich_concurrency: usize,
    pub max_enrichments: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "serper_api_key",
                &self.serper_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("serper_base_url", &self.serper_base_url)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("default_location", &self.default_location)
            .field("default_region", &self.default_region)
            .field("default_currency", &self.default_currency)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("max_scrape_bytes", &self.max_scrape_bytes)
            .field("enrich_concurrency", &self.enrich_concurrency)
            .field("max_enrichments", &self.max_enrichments)
            .finish()
    }
}
