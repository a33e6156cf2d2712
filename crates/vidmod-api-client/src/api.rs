//! Domain methods for the analysis client.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use vidmod_core::{
    AnalysisBackend, AnalysisError, AnalysisResult, FileContent, HealthReport, SelectedFile,
};

use crate::{AnalysisClient, ANALYZE_PATH, HEALTH_PATH};

impl AnalysisClient {
    /// Upload a validated video for classification. One attempt, no retries.
    pub async fn submit(&self, file: &SelectedFile) -> Result<AnalysisResult, AnalysisError> {
        let form = build_upload_form(file).await?;

        tracing::info!(
            file_name = %file.name(),
            size = file.size(),
            media_type = %file.media_type(),
            "Submitting video for analysis"
        );

        let result = self.post_multipart(ANALYZE_PATH, form).await;
        match &result {
            Ok(analysis) => tracing::info!(
                method = %analysis.method,
                status = %analysis.status,
                "Analysis completed"
            ),
            Err(AnalysisError::Transport(message)) => {
                tracing::error!(error = %message, "Analysis service unreachable")
            }
            Err(_) => {}
        }
        result
    }

    /// Service health and configured model providers.
    pub async fn health(&self) -> Result<HealthReport> {
        self.get(HEALTH_PATH).await
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, AnalysisError> {
        self.submit(file).await
    }
}

/// Single-field multipart form: `file` with the original name and media type.
async fn build_upload_form(file: &SelectedFile) -> Result<Form, AnalysisError> {
    let data = match file.content() {
        FileContent::Memory(bytes) => bytes.to_vec(),
        FileContent::Disk(path) => tokio::fs::read(path).await.map_err(|e| {
            AnalysisError::Payload(format!("Failed to read file {}: {}", path.display(), e))
        })?,
    };

    let part = Part::bytes(data)
        .file_name(file.name().to_string())
        .mime_str(file.media_type())
        .map_err(|e| {
            AnalysisError::Payload(format!(
                "Invalid media type '{}': {}",
                file.media_type(),
                e
            ))
        })?;

    Ok(Form::new().part("file", part))
}
