use crate::config::ClientConfig;
use crate::error::ValidationError;
use crate::models::{FileCandidate, SelectedFile};

/// Media types accepted for analysis start with this prefix.
pub const VIDEO_MEDIA_TYPE_PREFIX: &str = "video/";

/// 100 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Result of validating one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted(SelectedFile),
    Rejected(ValidationError),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }

    /// User-facing rejection reason, if rejected.
    pub fn reason(&self) -> Option<String> {
        match self {
            ValidationOutcome::Accepted(_) => None,
            ValidationOutcome::Rejected(err) => Some(err.to_string()),
        }
    }
}

/// Decides whether a picked file may be submitted.
///
/// Only the declared media type and the byte size are checked. Duration is
/// enforced by the service, which trims long uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileValidator {
    max_file_size: u64,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}

impl FileValidator {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.max_upload_size_bytes)
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Validate a candidate. No candidate (e.g. an empty drop) yields no outcome.
    pub fn validate(&self, candidate: Option<FileCandidate>) -> Option<ValidationOutcome> {
        let candidate = candidate?;

        let outcome = match self
            .validate_media_type(&candidate.media_type)
            .and_then(|_| self.validate_file_size(candidate.size))
        {
            Ok(()) => ValidationOutcome::Accepted(SelectedFile::from_candidate(candidate)),
            Err(err) => {
                tracing::debug!(
                    file_name = %candidate.name,
                    media_type = %candidate.media_type,
                    size = candidate.size,
                    reason = %err,
                    "Rejected candidate file"
                );
                ValidationOutcome::Rejected(err)
            }
        };

        Some(outcome)
    }

    /// Accept any type starting with `video/`, ignoring case and parameters.
    pub fn validate_media_type(&self, media_type: &str) -> Result<(), ValidationError> {
        let normalized = normalize_media_type(media_type);
        if normalized.starts_with(VIDEO_MEDIA_TYPE_PREFIX) {
            Ok(())
        } else {
            Err(ValidationError::NotVideo {
                media_type: media_type.to_string(),
            })
        }
    }

    pub fn validate_file_size(&self, size: u64) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }
}

/// "Video/MP4; codecs=avc1" -> "video/mp4"
fn normalize_media_type(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(media_type)
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(media_type: &str, size: usize) -> FileCandidate {
        FileCandidate::in_memory("upload.bin", media_type, vec![0u8; size])
    }

    fn test_validator() -> FileValidator {
        FileValidator::new(1024)
    }

    #[test]
    fn test_no_candidate_is_a_no_op() {
        assert!(test_validator().validate(None).is_none());
    }

    #[test]
    fn test_video_media_types_are_accepted() {
        let validator = test_validator();
        for media_type in [
            "video/mp4",
            "video/webm",
            "video/quicktime",
            "video/x-matroska",
            "VIDEO/MP4",
            "video/mp4; codecs=\"avc1.42E01E\"",
            "video/",
        ] {
            let outcome = validator.validate(Some(candidate(media_type, 10))).unwrap();
            assert!(outcome.is_accepted(), "{media_type} should be accepted");
            assert_eq!(outcome.reason(), None);
        }
    }

    #[test]
    fn test_non_video_media_types_are_rejected() {
        let validator = test_validator();
        for media_type in [
            "text/plain",
            "image/png",
            "audio/mpeg",
            "application/octet-stream",
            "application/video",
            "videos/mp4",
            "",
        ] {
            let outcome = validator.validate(Some(candidate(media_type, 10))).unwrap();
            assert_eq!(
                outcome.reason().as_deref(),
                Some("not a video file"),
                "{media_type} should be rejected"
            );
        }
    }

    #[test]
    fn test_bare_video_prefix_is_accepted() {
        let outcome = test_validator()
            .validate(Some(candidate("video/", 10)))
            .unwrap();
        assert!(outcome.is_accepted());
    }

    #[test]
    fn test_oversized_video_is_rejected() {
        let outcome = test_validator()
            .validate(Some(candidate("video/mp4", 2048)))
            .unwrap();
        assert_eq!(
            outcome,
            ValidationOutcome::Rejected(ValidationError::FileTooLarge {
                size: 2048,
                max: 1024
            })
        );
        assert_eq!(outcome.reason().as_deref(), Some("file too large"));
    }

    #[test]
    fn test_size_at_limit_is_accepted() {
        assert!(test_validator()
            .validate(Some(candidate("video/mp4", 1024)))
            .unwrap()
            .is_accepted());
    }

    #[test]
    fn test_media_type_checked_before_size() {
        let outcome = test_validator()
            .validate(Some(candidate("image/png", 4096)))
            .unwrap();
        assert_eq!(outcome.reason().as_deref(), Some("not a video file"));
    }

    #[test]
    fn test_accepted_file_keeps_candidate_attributes() {
        let outcome = FileValidator::default()
            .validate(Some(FileCandidate::in_memory(
                "clip.mp4",
                "video/mp4",
                vec![7u8; 3],
            )))
            .unwrap();
        match outcome {
            ValidationOutcome::Accepted(file) => {
                assert_eq!(file.name(), "clip.mp4");
                assert_eq!(file.size(), 3);
                assert_eq!(file.media_type(), "video/mp4");
            }
            ValidationOutcome::Rejected(err) => panic!("unexpected rejection: {err}"),
        }
    }

    #[test]
    fn test_from_config_uses_upload_limit() {
        let config = ClientConfig {
            max_upload_size_bytes: 10,
            ..ClientConfig::default()
        };
        assert_eq!(FileValidator::from_config(&config).max_file_size(), 10);
        assert_eq!(FileValidator::default().max_file_size(), DEFAULT_MAX_FILE_SIZE);
    }
}
