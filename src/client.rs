use crate::config::{Config, ProviderConfig};
use crate::errors::LookupError;
use crate::models::LookupOutcome;
use crate::normalizer;
use crate::phone;
use serde_json::Value;
use std::time::Duration;

/// Client for the upstream SIM lookup API.
///
/// One `search` issues at most one GET request. Failures never escape: every path
/// ends in a [`LookupOutcome`].
#[derive(Clone)]
pub struct LookupClient {
    client: reqwest::Client,
    base_url: String,
    provider: ProviderConfig,
}

impl LookupClient {
    /// Creates a new `LookupClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Full endpoint URL, without query string.
    /// * `provider` - Which API variant sits behind `base_url`, with its credentials.
    /// * `timeout` - Optional request timeout. None waits for the transport to give up.
    pub fn new(
        base_url: String,
        provider: ProviderConfig,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create lookup client: {}", e))?;

        Ok(Self {
            client,
            base_url,
            provider,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.lookup_base_url.clone(),
            config.provider.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// Builds the request URL for a mobile number.
    ///
    /// The result API gets the canonical number; the network directory gets the
    /// trimmed input as typed.
    pub fn request_url(&self, mobile_number: &str) -> Result<reqwest::Url, LookupError> {
        let params: Vec<(&str, String)> = match &self.provider {
            ProviderConfig::ResultApi { api_key } => vec![
                ("apikey", api_key.clone()),
                ("q", phone::canonicalize(mobile_number)),
            ],
            ProviderConfig::NetworkDirectory { username, password } => vec![
                ("username", username.clone()),
                ("password", password.clone()),
                ("search_term", mobile_number.trim().to_string()),
            ],
        };

        reqwest::Url::parse_with_params(&self.base_url, &params).map_err(|e| {
            tracing::error!("Failed to build lookup URL: {}", e);
            LookupError::TransportOrParseFailure
        })
    }

    /// Searches the upstream for a mobile number.
    ///
    /// Blank input fails with [`LookupError::InvalidInput`] before any request is made.
    pub async fn search(&self, mobile_number: &str) -> LookupOutcome {
        if phone::is_blank(mobile_number) {
            tracing::warn!("Rejected blank mobile number");
            return LookupError::InvalidInput.into();
        }

        let url = match self.request_url(mobile_number) {
            Ok(url) => url,
            Err(e) => return e.into(),
        };

        tracing::info!("Looking up mobile number: {}", phone::strip_whitespace(mobile_number));
        // Query string carries credentials
        tracing::debug!("Lookup URL: {}?[REDACTED]", self.base_url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Lookup request failed: {}", e);
                return LookupError::TransportOrParseFailure.into();
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(text) => serde_json::from_str::<Value>(&text)
                .map_err(|e| tracing::warn!("Failed to parse lookup response: {}", e))
                .ok(),
            Err(e) => {
                tracing::error!("Failed to read lookup response: {}", e);
                None
            }
        };

        let outcome = normalizer::classify_response(status, body.as_ref());
        match &outcome {
            LookupOutcome::Success { records } => {
                tracing::info!("✓ Lookup returned {} record(s)", records.len())
            }
            LookupOutcome::Failure(e) => tracing::info!("Lookup failed ({}): {}", e.kind(), e),
        }
        outcome
    }
}
