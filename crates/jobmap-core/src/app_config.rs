use std::path::PathBuf;

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
    /// Required unless `offline` is set.
    pub geocode_api_key: Option<String>,
    pub geocode_base_url: String,
    pub geocode_timeout_secs: u64,
    pub geocode_max_retries: u32,
    pub geocode_backoff_base_ms: u64,
    pub geocode_max_concurrent: usize,
    pub cache_dir: PathBuf,
    pub cache_persist: bool,
    pub catalog_path: Option<PathBuf>,
    /// Resolve locations from the cache only; never call the geocoding service.
    pub offline: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "geocode_api_key",
                &self.geocode_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("geocode_base_url", &self.geocode_base_url)
            .field("geocode_timeout_secs", &self.geocode_timeout_secs)
            .field("geocode_max_retries", &self.geocode_max_retries)
            .field("geocode_backoff_base_ms", &self.geocode_backoff_base_ms)
            .field("geocode_max_concurrent", &self.geocode_max_concurrent)
            .field("cache_dir", &self.cache_dir)
            .field("cache_persist", &self.cache_persist)
            .field("catalog_path", &self.catalog_path)
            .field("offline", &self.offline)
            .finish()
    }
}
