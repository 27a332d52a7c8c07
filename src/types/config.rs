//! Runtime configuration

use std::time::Duration;

use super::{ContribError, Result};

/// Endpoint serving the `{"YYYY-MM-DD": count}` map
pub const DEFAULT_URL: &str = "https://dpg.gg/test/calendar.json";

/// HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build a validated config from raw CLI values
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let config = Self {
            url: url.into(),
            timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ContribError::Config(format!(
                "url must start with http:// or https://, got {:?}",
                self.url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ContribError::Config("timeout must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_accepts_http_and_https() {
        assert!(Config::new("http://127.0.0.1:8080/calendar.json", 3).is_ok());
        assert!(Config::new("https://example.com/c.json", 3).is_ok());
    }

    #[test]
    fn test_new_rejects_bad_scheme() {
        let err = Config::new("ftp://example.com/c.json", 3).unwrap_err();
        assert!(matches!(err, ContribError::Config(_)));
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_new_rejects_zero_timeout() {
        let err = Config::new(DEFAULT_URL, 0).unwrap_err();
        assert_eq!(err.to_string(), "config error: timeout must be non-zero");
    }
}
