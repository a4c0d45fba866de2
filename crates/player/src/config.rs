//! Client configuration from the environment.
//!
//! `.env.local` and `.env` at the repo root are loaded by the binary before
//! this runs; real environment variables always win.

use std::time::Duration;

use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Default request timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
/// Catalog entries rarely change during a session
pub const DEFAULT_CATALOG_TTL_SECS: u64 = 300;
/// Draft-scoped reads can change under the player (staff review)
pub const DEFAULT_DRAFT_TTL_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API origin, without the `/api/...` path
    pub api_url: Url,
    /// Session token sent as a bearer credential, if any
    pub session_token: Option<String>,
    pub request_timeout: Duration,
    pub catalog_ttl: Duration,
    /// TTL for the draft, its points breakdown and magic records
    pub draft_ttl: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid CHARGEN_API_URL '{value}': {source}")]
    InvalidApiUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

impl ClientConfig {
    /// Read configuration from `CHARGEN_*` variables, with defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("CHARGEN_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url).map_err(|source| ConfigError::InvalidApiUrl {
            value: raw_url.clone(),
            source,
        })?;

        let session_token = lookup("CHARGEN_SESSION_TOKEN")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let request_timeout_ms = lookup("CHARGEN_REQUEST_TIMEOUT_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        let catalog_ttl_secs = lookup("CHARGEN_CATALOG_TTL_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CATALOG_TTL_SECS);
        let draft_ttl_secs = lookup("CHARGEN_DRAFT_TTL_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_DRAFT_TTL_SECS);

        Ok(Self {
            api_url,
            session_token,
            request_timeout: Duration::from_millis(request_timeout_ms),
            catalog_ttl: Duration::from_secs(catalog_ttl_secs),
            draft_ttl: Duration::from_secs(draft_ttl_secs),
        })
    }
}
