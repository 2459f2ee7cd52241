use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use super::crypto::DEFAULT_EXCHANGE;

pub const ENV_BASE_URL: &str = "CRYPTO_TRACKER_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CRYPTO_TRACKER_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the transaction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL of the service API, without trailing slash (e.g., "http://localhost:8080/api").
    pub base_url: String,

    /// Per-request timeout. Ignored on wasm32, where the browser owns timeouts.
    pub timeout_secs: u64,

    /// Exchange pre-filled on new transactions.
    pub default_exchange: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_exchange: DEFAULT_EXCHANGE.to_string(),
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Build settings from `CRYPTO_TRACKER_API_BASE_URL` and
    /// `CRYPTO_TRACKER_TIMEOUT_SECS`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            let url = url.trim().trim_end_matches('/');
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CoreError::Config(format!(
                    "{ENV_BASE_URL} must be an http(s) URL, got '{url}'"
                )));
            }
            settings.base_url = url.to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            settings.timeout_secs = raw.trim().parse().map_err(|_| {
                CoreError::Config(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"))
            })?;
            if settings.timeout_secs == 0 {
                return Err(CoreError::Config(format!("{ENV_TIMEOUT_SECS} must be greater than 0")));
            }
        }

        Ok(settings)
    }
}
