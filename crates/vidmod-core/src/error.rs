//! Error types module
//!
//! Two error families exist on the client side. `ValidationError` is produced
//! locally when a candidate file is refused and never leaves the process.
//! `AnalysisError` covers everything that can go wrong while talking to the
//! analysis service. Both render to the exact message shown to the user through
//! `Display`, and both describe themselves through `ErrorMetadata`.

/// Message used whenever the service gives no usable explanation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis failed";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like service errors
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be reported to the user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether resubmitting the same file may succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Why a candidate file was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("not a video file")]
    NotVideo { media_type: String },

    #[error("file too large")]
    FileTooLarge { size: u64, max: u64 },
}

/// Failure of a single analysis submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// No response was received (connection refused, timeout, DNS, ...).
    #[error("{0}")]
    Transport(String),

    /// The service answered, but not with a usable result.
    #[error("{message}")]
    Service { status: Option<u16>, message: String },

    /// The payload could not be assembled (e.g. the file vanished from disk).
    #[error("{0}")]
    Payload(String),
}

/// A 2xx body that is not a classification we understand.
#[derive(Debug, thiserror::Error)]
pub enum ResultParseError {
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response matches neither known result schema")]
    UnknownSchema,

    #[error("severity level {0} is outside 0-5")]
    SeverityOutOfRange(u8),

    #[error("confidence {0} is outside 0-1")]
    ConfidenceOutOfRange(f64),
}

impl AnalysisError {
    /// Service error carrying the generic fallback message.
    pub fn generic(status: Option<u16>) -> Self {
        AnalysisError::Service {
            status,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            AnalysisError::Service { status, .. } => *status,
            _ => None,
        }
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn analysis_error_static_metadata(
    err: &AnalysisError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AnalysisError::Transport(_) => (
            "TRANSPORT_ERROR",
            true,
            Some("Check that the analysis service is reachable and resubmit"),
            LogLevel::Error,
        ),
        AnalysisError::Service {
            status: Some(500..=599),
            ..
        } => (
            "SERVICE_ERROR",
            true,
            Some("Resubmit after a short delay"),
            LogLevel::Warn,
        ),
        AnalysisError::Service { .. } => (
            "SERVICE_ERROR",
            false,
            Some("Check the file and resubmit"),
            LogLevel::Warn,
        ),
        AnalysisError::Payload(_) => (
            "PAYLOAD_ERROR",
            false,
            Some("Select the file again"),
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for AnalysisError {
    fn error_code(&self) -> &'static str {
        analysis_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        analysis_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        analysis_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        analysis_error_static_metadata(self).3
    }
}

impl ErrorMetadata for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            ValidationError::NotVideo { .. } => "NOT_A_VIDEO",
            ValidationError::FileTooLarge { .. } => "FILE_TOO_LARGE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotVideo { .. } => Some("Select a video file"),
            ValidationError::FileTooLarge { .. } => Some("Select a smaller video file"),
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::NotVideo {
            media_type: "text/plain".to_string(),
        };
        assert_eq!(err.to_string(), "not a video file");
        assert_eq!(err.error_code(), "NOT_A_VIDEO");

        let err = ValidationError::FileTooLarge {
            size: 200,
            max: 100,
        };
        assert_eq!(err.client_message(), "file too large");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_service_error_displays_message_verbatim() {
        let err = AnalysisError::Service {
            status: Some(500),
            message: "All analysis methods failed".to_string(),
        };
        assert_eq!(err.to_string(), "All analysis methods failed");
        assert_eq!(err.status(), Some(500));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_generic_service_error() {
        let err = AnalysisError::generic(Some(422));
        assert_eq!(err.client_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(err.error_code(), "SERVICE_ERROR");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_transport_error_metadata() {
        let err = AnalysisError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.status(), None);
        assert!(err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Error);
        assert!(err.suggested_action().is_some());
    }
}
