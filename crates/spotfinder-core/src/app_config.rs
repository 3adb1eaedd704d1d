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
    pub log_level: String,
    pub serpapi_api_key: String,
    pub geocode_api_key: String,
    /// Location bias sent with every place search.
    pub operating_city: String,
    pub serpapi_base_url: String,
    pub geocode_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Upper bound on in-flight provider calls within one pipeline phase.
    pub max_concurrent_lookups: usize,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("serpapi_api_key", &"[redacted]")
            .field("geocode_api_key", &"[redacted]")
            .field("operating_city", &self.operating_city)
            .field("serpapi_base_url", &self.serpapi_base_url)
            .field("geocode_base_url", &self.geocode_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_lookups", &self.max_concurrent_lookups)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}
