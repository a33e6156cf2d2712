//! vidmod core library
//!
//! Domain models, error types, configuration, and file validation shared by the
//! API client, the workflow services, and the CLI.

pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use backend::AnalysisBackend;
pub use config::ClientConfig;
pub use error::{
    AnalysisError, ErrorMetadata, LogLevel, ResultParseError, ValidationError,
    GENERIC_FAILURE_MESSAGE,
};
pub use models::{
    AnalysisResult, ContentStatus, FileCandidate, FileContent, HealthReport, SelectedFile,
    SeverityIndicator,
};
pub use validation::{FileValidator, ValidationOutcome};
