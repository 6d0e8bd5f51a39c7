use crate::error::AppError;
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.mozambiquehe.re";
pub const DEFAULT_VERSION: u32 = 5;

const USER_AGENT: &str = concat!("apex_stats/", env!("CARGO_PKG_VERSION"));

/// Connection settings shared by every request. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    api_key: String,
    version: u32,
    base_url: String,
    headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Builds a config for the default API version (5).
    pub fn new(api_key: impl Into<String>) -> Result<Self, AppError> {
        Self::with_version(api_key, DEFAULT_VERSION)
    }

    pub fn with_version(api_key: impl Into<String>, version: u32) -> Result<Self, AppError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AppError::Config("API key must not be empty".to_string()));
        }
        if version == 0 {
            return Err(AppError::Config("API version must be at least 1".to_string()));
        }

        let headers = vec![
            ("User-Agent".to_string(), USER_AGENT.to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), api_key.clone()),
        ];

        Ok(ClientConfig {
            api_key,
            version,
            base_url: DEFAULT_BASE_URL.to_string(),
            headers,
        })
    }

    /// Loads `APEX_API_KEY`, `APEX_API_VERSION` and `APEX_API_BASE_URL`,
    /// reading a `.env` file first when one exists.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("APEX_API_KEY").map_err(|_| {
            AppError::Config("APEX_API_KEY not found in environment or .env file".to_string())
        })?;

        let version = match env::var("APEX_API_VERSION") {
            Ok(raw) => raw.trim().parse::<u32>().map_err(|_| {
                AppError::Config(format!("APEX_API_VERSION must be a positive integer, got `{}`", raw))
            })?,
            Err(_) => DEFAULT_VERSION,
        };

        let config = Self::with_version(api_key, version)?;
        match env::var("APEX_API_BASE_URL") {
            Ok(url) => config.with_base_url(url),
            Err(_) => Ok(config),
        }
    }

    /// Returns a copy pointed at another host. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, AppError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "base URL must start with http:// or https://, got `{}`",
                base_url
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
