//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default live API prefix
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
/// Default live request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default artificial latency of the mock engine
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(300);

/// Access layer configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DASHBOARD_API_BASE_URL | http://localhost:8080/api | live API prefix |
/// | DASHBOARD_API_TIMEOUT_MS | 10000 | live request timeout |
/// | DASHBOARD_MOCK_DELAY_MS | 300 | mock engine latency |
/// | DASHBOARD_USE_MOCK | false | answer every request from the mock engine |
/// | DASHBOARD_STORAGE_PATH | (unset, in-memory) | JSON file backing durable storage |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Live API prefix (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// Live request timeout
    pub timeout: Duration,

    /// Latency added to every mock response
    pub mock_delay: Duration,

    /// Explicit mock flag
    pub use_mock: bool,

    /// Durable storage file; `None` keeps everything in memory
    pub storage_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a configuration for the given live API prefix
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            mock_delay: DEFAULT_MOCK_DELAY,
            use_mock: false,
            storage_path: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("DASHBOARD_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
        );
        if let Some(ms) = std::env::var("DASHBOARD_API_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = std::env::var("DASHBOARD_MOCK_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.mock_delay = Duration::from_millis(ms);
        }
        config.use_mock = std::env::var("DASHBOARD_USE_MOCK")
            .ok()
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        config.storage_path = std::env::var("DASHBOARD_STORAGE_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        config
    }

    /// Set the live request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the mock engine latency
    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    /// Force mock mode
    pub fn with_mock(mut self, use_mock: bool) -> Self {
        self.use_mock = use_mock;
        self
    }

    /// Persist durable storage to a JSON file
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Join a request path onto the base URL
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
