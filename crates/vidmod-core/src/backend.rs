//! Seam between the workflow and the analysis service
//!
//! The workflow controller only needs "give me a classification for this file".
//! The HTTP client implements this trait; tests implement it in memory.

use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::models::{AnalysisResult, SelectedFile};

/// Something that can classify a selected video file.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit the file once and return the parsed classification.
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, AnalysisError>;
}
