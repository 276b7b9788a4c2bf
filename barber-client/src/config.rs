//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | BARBERCUT_API_BASE | http://localhost:8080 | Backend base URL |
//! | BARBERCUT_TIMEOUT_SECS | 30 | Request timeout |
//! | BARBERCUT_POLL_SECS | 5 | Reservation list refresh interval |
//! | BARBERCUT_BADGE_POLL_SECS | 10 | Notification badge refresh interval |

use std::time::Duration;

/// Default backend address
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Client configuration for connecting to the booking backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token, if the backend issued one
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Refresh interval for reservation and slot lists
    pub poll_interval: Duration,

    /// Refresh interval for notification badges
    pub badge_poll_interval: Duration,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            poll_interval: Duration::from_secs(5),
            badge_poll_interval: Duration::from_secs(10),
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let secs = |key: &str| std::env::var(key).ok().and_then(|v| v.parse::<u64>().ok());

        let mut config =
            Self::new(std::env::var("BARBERCUT_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into()));
        if let Some(timeout) = secs("BARBERCUT_TIMEOUT_SECS") {
            config.timeout = timeout;
        }
        if let Some(poll) = secs("BARBERCUT_POLL_SECS").filter(|s| *s > 0) {
            config.poll_interval = Duration::from_secs(poll);
        }
        if let Some(poll) = secs("BARBERCUT_BADGE_POLL_SECS").filter(|s| *s > 0) {
            config.badge_poll_interval = Duration::from_secs(poll);
        }
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the list refresh interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the badge refresh interval
    pub fn with_badge_poll_interval(mut self, interval: Duration) -> Self {
        self.badge_poll_interval = interval;
        self
    }

    /// Create an API client from this configuration
    pub fn build_api_client(&self) -> crate::ClientResult<crate::ApiClient> {
        crate::ApiClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
