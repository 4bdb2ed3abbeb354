use std::time::Duration;

use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
/// Fails at startup if `API_BASE_URL` is missing or a numeric knob is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub search_debounce_ms: u64,
    pub jobs_page_size: usize,
    pub rust_log: String,
    pub login_email: Option<String>,
    pub login_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: require_env("API_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30)?,
            search_debounce_ms: parse_env("SEARCH_DEBOUNCE_MS", 400)?,
            jobs_page_size: parse_env("JOBS_PAGE_SIZE", 3)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            login_email: std::env::var("ALGOHIRE_EMAIL").ok(),
            login_password: std::env::var("ALGOHIRE_PASSWORD").ok(),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
            search_debounce_ms: 400,
            jobs_page_size: 3,
            rust_log: "info".to_string(),
            login_email: None,
            login_password: None,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .ok()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_observed_debounce() {
        let config = Config::default();
        assert_eq!(config.search_debounce(), Duration::from_millis(400));
        assert_eq!(config.jobs_page_size, 3);
    }

    #[test]
    fn test_parse_env_falls_back_when_unset() {
        let value: u64 = parse_env("ALGOHIRE_TEST_SURELY_UNSET_KEY", 17).unwrap();
        assert_eq!(value, 17);
    }
}
