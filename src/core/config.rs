//! Server configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

use std::time::Duration;

/// Default upstream timeout in seconds
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the administrative backend that `/api/*` is forwarded to
    /// Example: http://localhost:8080
    pub backend_url: Option<String>,

    /// Upstream request timeout
    pub backend_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("BACKEND_URL").ok(),
            std::env::var("BACKEND_TIMEOUT_SECS").ok(),
        )
    }

    fn from_values(backend_url: Option<String>, timeout_secs: Option<String>) -> Self {
        let backend_url = backend_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let secs = timeout_secs
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS);

        Self {
            backend_url,
            backend_timeout: Duration::from_secs(secs),
        }
    }

    /// Check if a backend is configured
    pub fn has_backend(&self) -> bool {
        self.backend_url.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
