use thiserror::Error;

/// Errors returned by the geocoding HTTP client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure, or a non-2xx status other than 429.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 from the geocoding service.
    #[error("rate limited by geocoding service (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// The service answered with an error status in the JSON envelope.
    #[error("geocoding API error {status}: {message}")]
    Api { status: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid geocoding base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("geocoding API key is not configured")]
    MissingApiKey,
}

/// Errors from the durable geocode cache slot.
#[derive(Debug, Error)]
pub enum CacheStoreError {
    #[error("cache store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cache store contents at {path} are not valid: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize geocode cache: {0}")]
    Serialize(#[source] serde_json::Error),
}
