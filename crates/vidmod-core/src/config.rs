//! Configuration module
//!
//! Client configuration is read from the environment (after loading an optional
//! `.env` file). Every setting has a local-development default.

use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8005";
const MAX_UPLOAD_SIZE_MB: u64 = 100;
const MAX_VIDEO_DURATION_SECS: u64 = 60;
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Settings for talking to the analysis service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the analysis service, without trailing slash
    pub api_url: String,
    /// Largest file the client will submit
    pub max_upload_size_bytes: u64,
    /// Duration after which the service trims uploads (advertised only)
    pub max_video_duration_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            max_video_duration_secs: MAX_VIDEO_DURATION_SECS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Load from VIDMOD_API_URL (or API_URL), MAX_UPLOAD_SIZE_MB,
    /// MAX_VIDEO_DURATION_SECS and REQUEST_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let api_url = env::var("VIDMOD_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<u64>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let config = ClientConfig {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            max_upload_size_bytes: max_upload_size_mb.saturating_mul(1024 * 1024),
            max_video_duration_secs: env::var("MAX_VIDEO_DURATION_SECS")
                .unwrap_or_else(|_| MAX_VIDEO_DURATION_SECS.to_string())
                .parse()
                .unwrap_or(MAX_VIDEO_DURATION_SECS),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(REQUEST_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    /// Replace the base URL (e.g. from a command-line flag).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "VIDMOD_API_URL must start with http:// or https:// (got '{}')",
                self.api_url
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "REQUEST_TIMEOUT_SECS must be greater than 0"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8005");
        assert_eq!(config.max_upload_size_bytes, 100 * 1024 * 1024);
        assert_eq!(config.max_video_duration_secs, 60);
        assert_eq!(config.request_timeout(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_api_url_strips_trailing_slash() {
        let config = ClientConfig::default().with_api_url("https://moderation.example.com/ ");
        assert_eq!(config.api_url, "https://moderation.example.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ClientConfig::default().with_api_url("localhost:8005");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = ClientConfig {
            max_upload_size_bytes: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
