//! Client configuration

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Number of scans kept in the local history
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Environment variables consulted for the API base URL, in priority order
pub const API_URL_ENV_VARS: [&str; 2] = ["DOSESAFE_API_URL", "VITE_API_URL"];

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the analysis service (no trailing slash)
    pub api_url: String,

    /// Timeout for JSON requests
    pub request_timeout: Duration,

    /// Timeout for image uploads, which go through OCR
    pub image_timeout: Duration,

    /// Max scans kept in history
    pub history_limit: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            image_timeout: Duration::from_secs(60),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Defaults with the API URL taken from the environment when set
    pub fn from_env() -> Self {
        let mut config = Self::new();
        let from_env = API_URL_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty());
        if let Some(url) = from_env {
            config = config.with_api_url(&url);
        }
        config
    }

    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL for an endpoint path such as `/scan/manual`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
