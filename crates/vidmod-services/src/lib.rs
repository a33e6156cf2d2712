//! vidmod services layer
//!
//! This crate hosts the upload workflow: the session state machine, the
//! controller that drives it (select, validate, submit, apply result), and
//! the presenter that turns a classification into a display model. Keep
//! network access behind `vidmod_core::AnalysisBackend` and rendering in the CLI.

pub mod controller;
pub mod presenter;
pub mod session;

pub use controller::{PendingSubmission, SubmissionOutcome, WorkflowController};
pub use presenter::{
    format_file_size, format_method, present, CategoryBadge, CategoryStyle, ConfidenceTier,
    DisplayModel, SeverityDisplay, StatusBadge, Tone,
};
pub use session::{SessionSnapshot, SessionState, SubmissionToken, UploadSession};
