//! Environment-backed configuration for the hosted backend.
//!
//! Two values are required; their absence is a fatal startup error rather
//! than something the gateway degrades around.

use centavo_core::errors::{Error, Result};

/// Environment variable holding the backend's base URL.
pub const ENV_BACKEND_URL: &str = "CENTAVO_BACKEND_URL";

/// Environment variable holding the backend's anonymous API key.
pub const ENV_BACKEND_ANON_KEY: &str = "CENTAVO_BACKEND_ANON_KEY";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    pub base_url: String,
    pub anon_key: String,
}

impl ConnectConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let anon_key = anon_key.into();
        if base_url.trim().is_empty() {
            return Err(Error::InvalidConfigValue(
                "backend URL must not be empty".to_string(),
            ));
        }
        if anon_key.trim().is_empty() {
            return Err(Error::InvalidConfigValue(
                "backend anon key must not be empty".to_string(),
            ));
        }
        Ok(ConnectConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    /// Reads the two required values from the environment. A `.env` file is
    /// honored when present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(ENV_BACKEND_URL)
            .map_err(|_| Error::MissingConfigKey(ENV_BACKEND_URL.to_string()))?;
        let anon_key = std::env::var(ENV_BACKEND_ANON_KEY)
            .map_err(|_| Error::MissingConfigKey(ENV_BACKEND_ANON_KEY.to_string()))?;
        Self::new(base_url, anon_key)
    }
}
