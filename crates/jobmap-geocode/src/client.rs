//! HTTP client for a Google-style geocoding REST endpoint.
//!
//! One `GET {base}/json?address=..&key=..` per lookup. Transport and 5xx/429
//! failures are retried with back-off; API statuses other than `OK` and
//! `ZERO_RESULTS` surface as [`GeocodeError::Api`].

use std::time::Duration;

use jobmap_core::{AppConfig, LatLng};
use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::retry::retry_with_backoff;
use crate::types::GeocodeResponse;

const DEFAULT_BASE_URL: &str = jobmap_core::config::DEFAULT_GEOCODE_BASE_URL;
const USER_AGENT: &str = "jobmap/0.1 (job-search)";

/// Client for the geocoding service.
///
/// Use [`GeocodeClient::new`] for production or [`GeocodeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GeocodeClient {
    /// Creates a client pointed at the production geocoding API, with retries
    /// disabled.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        // Exactly one trailing slash so `join` appends rather than replaces
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("json"))
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Builds a client from application configuration, including its retry
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::MissingApiKey`] if no API key is configured,
    /// plus anything [`GeocodeClient::with_base_url`] can return.
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        let api_key = config
            .geocode_api_key
            .as_deref()
            .ok_or(GeocodeError::MissingApiKey)?;
        Ok(Self::with_base_url(
            api_key,
            config.geocode_timeout_secs,
            &config.geocode_base_url,
        )?
        .with_retry_policy(config.geocode_max_retries, config.geocode_backoff_base_ms))
    }

    /// Sets the number of retries after the first failed attempt and the
    /// base back-off delay.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Geocodes `address`, returning the first result's coordinates.
    ///
    /// `Ok(None)` means the service found nothing for the address.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Api`] if the envelope status is an error.
    /// - [`GeocodeError::RateLimited`] on HTTP 429 after all retries.
    /// - [`GeocodeError::Http`] on network failure or another non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn geocode(&self, address: &str) -> Result<Option<LatLng>, GeocodeError> {
        let url = self.build_url(address);
        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_once(&url, address)
        })
        .await?;
        Self::interpret(response)
    }

    /// Builds the request URL with percent-encoded `address` and `key`.
    fn build_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }

    async fn request_once(&self, url: &Url, address: &str) -> Result<GeocodeResponse, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(GeocodeError::RateLimited { retry_after_secs });
        }

        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: format!("geocode(address={address})"),
            source: e,
        })
    }

    fn interpret(response: GeocodeResponse) -> Result<Option<LatLng>, GeocodeError> {
        match response.status.as_str() {
            "OK" => Ok(response.first_location()),
            "ZERO_RESULTS" => Ok(None),
            _ => Err(GeocodeError::Api {
                message: response
                    .error_message
                    .unwrap_or_else(|| "no error message".to_string()),
                status: response.status,
            }),
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
