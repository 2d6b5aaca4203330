use serde::Deserialize;
use std::path::PathBuf;

/// Which upstream API variant to query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Key-authenticated API answering with a `result` field.
    ResultApi { api_key: String },
    /// Username/password API answering with a network-keyed map.
    NetworkDirectory { username: String, password: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub lookup_base_url: String,
    pub provider: ProviderConfig,
    pub request_timeout_secs: Option<u64>,
    pub counter_file: Option<PathBuf>,
    pub counter_key: String,
}

pub const DEFAULT_COUNTER_KEY: &str = "siteUsage";

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name)
        .map_err(|_| anyhow::anyhow!("{} environment variable required", name))
        .and_then(|value| {
            if value.trim().is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }
            Ok(value)
        })
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let provider = match optional("LOOKUP_PROVIDER").as_deref() {
            None | Some("result_api") => ProviderConfig::ResultApi {
                api_key: required("LOOKUP_API_KEY")?,
            },
            Some("network_directory") => ProviderConfig::NetworkDirectory {
                username: required("LOOKUP_USERNAME")?,
                password: required("LOOKUP_PASSWORD")?,
            },
            Some(other) => anyhow::bail!(
                "LOOKUP_PROVIDER must be result_api or network_directory, got {}",
                other
            ),
        };

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            lookup_base_url: required("LOOKUP_BASE_URL").and_then(|url| {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!("LOOKUP_BASE_URL must start with http:// or https://");
                }
                url::Url::parse(&url)
                    .map_err(|e| anyhow::anyhow!("LOOKUP_BASE_URL is not a valid URL: {}", e))?;
                Ok(url)
            })?,
            provider,
            request_timeout_secs: optional("LOOKUP_TIMEOUT_SECS")
                .map(|secs| {
                    secs.parse().map_err(|_| {
                        anyhow::anyhow!("LOOKUP_TIMEOUT_SECS must be a whole number of seconds")
                    })
                })
                .transpose()?,
            counter_file: optional("COUNTER_FILE").map(PathBuf::from),
            counter_key: optional("COUNTER_KEY").unwrap_or_else(|| DEFAULT_COUNTER_KEY.to_string()),
        };

        // Credentials stay out of the logs
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Lookup base URL: {}", config.lookup_base_url);
        tracing::debug!(
            "Lookup provider: {}",
            match config.provider {
                ProviderConfig::ResultApi { .. } => "result_api",
                ProviderConfig::NetworkDirectory { .. } => "network_directory",
            }
        );
        if let Some(ref path) = config.counter_file {
            tracing::info!("Visit counter file: {}", path.display());
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
