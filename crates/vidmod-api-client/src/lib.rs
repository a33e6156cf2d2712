//! HTTP client for the video analysis service.
//!
//! Provides a minimal client around the service's two endpoints: `POST /analyze`
//! (multipart upload, returns a classification) and `GET /health`. Responses
//! are normalized into `AnalysisResult` / `AnalysisError` so that callers never
//! see raw HTTP or JSON failures.

pub mod api;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use vidmod_core::{AnalysisError, AnalysisResult, ClientConfig, GENERIC_FAILURE_MESSAGE};

pub const ANALYZE_PATH: &str = "/analyze";
pub const HEALTH_PATH: &str = "/health";

/// HTTP client for the analysis service.
#[derive(Clone, Debug)]
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout())
    }

    /// Create client from environment: VIDMOD_API_URL (or API_URL), REQUEST_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().context("Invalid client configuration")?;
        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let body: T = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        Ok(body)
    }

    /// POST multipart form and normalize the response into a classification.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<AnalysisResult, AnalysisError> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        interpret_analysis_response(status, &body)
    }
}

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<JsonValue>,
}

/// Map a status and body onto the result contract:
/// 2xx + known schema is a result; 2xx + anything else is a generic service
/// error; non-2xx carries the body's `detail` or the generic message.
pub fn interpret_analysis_response(
    status: StatusCode,
    body: &[u8],
) -> Result<AnalysisResult, AnalysisError> {
    if status.is_success() {
        return AnalysisResult::from_json(body).map_err(|e| {
            tracing::warn!(
                status = status.as_u16(),
                error = %e,
                "Analysis service returned an unexpected result body"
            );
            AnalysisError::generic(Some(status.as_u16()))
        });
    }

    let message = error_detail(body).unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
    tracing::warn!(status = status.as_u16(), message = %message, "Analysis request failed");

    Err(AnalysisError::Service {
        status: Some(status.as_u16()),
        message,
    })
}

/// Extract a non-empty string `detail` from an error body.
pub fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        JsonValue::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

// Re-export domain types for convenience.
pub use vidmod_core::{HealthReport, SelectedFile};
