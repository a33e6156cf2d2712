//! Validation modules

pub mod video;

pub use video::{FileValidator, ValidationOutcome, DEFAULT_MAX_FILE_SIZE, VIDEO_MEDIA_TYPE_PREFIX};
