//! Upload session state machine
//!
//! ```text
//! Idle -> FileSelected -> Analyzing -> Completed | Failed
//!             ^                            |
//!             +----- new valid file -------+
//! ```
//!
//! Transitions are `pub(crate)`: only the workflow controller mutates a
//! session. Everyone else reads it, or a `SessionSnapshot` of it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use vidmod_core::{AnalysisError, AnalysisResult, SelectedFile};

#[derive(Debug, Default, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    FileSelected,
    Analyzing,
    Completed,
    Failed,
}

impl Display for SessionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::FileSelected => write!(f, "file_selected"),
            SessionState::Analyzing => write!(f, "analyzing"),
            SessionState::Completed => write!(f, "completed"),
            SessionState::Failed => write!(f, "failed"),
        }
    }
}

/// Tag captured when a submission starts. A response is only applied while
/// the session is still waiting on the same token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SubmissionToken(u64);

impl SubmissionToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Display for SubmissionToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}

/// Workflow state for one user session. In memory only.
///
/// Invariant: at most one of `last_error` / `last_result` is set.
#[derive(Debug, Default)]
pub struct UploadSession {
    state: SessionState,
    selected_file: Option<SelectedFile>,
    last_error: Option<String>,
    last_result: Option<AnalysisResult>,
    /// Number of submissions ever started; never reset.
    submissions: u64,
    in_flight: Option<SubmissionToken>,
    submitted_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

/// Read-only copy of a session, published to renderers after each transition.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub selected_file: Option<SelectedFile>,
    pub error: Option<String>,
    pub result: Option<AnalysisResult>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    /// Token of the submission currently awaited, if any.
    pub fn in_flight(&self) -> Option<SubmissionToken> {
        self.in_flight
    }

    pub fn submission_count(&self) -> u64 {
        self.submissions
    }

    /// Wall-clock time of the last finished submission.
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        match (self.submitted_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            selected_file: self.selected_file.clone(),
            error: self.last_error.clone(),
            result: self.last_result.clone(),
            submitted_at: self.submitted_at,
            finished_at: self.finished_at,
        }
    }

    /// Store a newly accepted file. Valid from every state; selecting while
    /// analyzing abandons the in-flight submission.
    pub(crate) fn select(&mut self, file: SelectedFile) {
        if let Some(token) = self.in_flight.take() {
            tracing::info!(
                token = token.value(),
                file_name = %file.name(),
                "New file selected while analyzing; in-flight response will be discarded"
            );
        }

        self.state = SessionState::FileSelected;
        self.selected_file = Some(file);
        self.last_error = None;
        self.last_result = None;
        self.submitted_at = None;
        self.finished_at = None;
    }

    /// Record a rejected selection. State and stored file stay as they were;
    /// a displayed result gives way to the rejection message.
    pub(crate) fn reject(&mut self, reason: String) {
        self.last_error = Some(reason);
        self.last_result = None;
    }

    /// Enter `Analyzing`. Only valid from `FileSelected`.
    pub(crate) fn start(&mut self) -> Option<SubmissionToken> {
        if self.state != SessionState::FileSelected || self.selected_file.is_none() {
            tracing::warn!(state = %self.state, "Ignoring submit outside file_selected state");
            return None;
        }

        self.submissions += 1;
        let token = SubmissionToken(self.submissions);

        self.state = SessionState::Analyzing;
        self.in_flight = Some(token);
        self.last_error = None;
        self.last_result = None;
        self.submitted_at = Some(Utc::now());
        self.finished_at = None;

        Some(token)
    }

    /// Apply a response. Returns false (and changes nothing) for stale tokens.
    pub(crate) fn finish(
        &mut self,
        token: SubmissionToken,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> bool {
        if self.state != SessionState::Analyzing || self.in_flight != Some(token) {
            tracing::debug!(
                token = token.value(),
                state = %self.state,
                "Discarding stale analysis response"
            );
            return false;
        }

        self.in_flight = None;
        self.finished_at = Some(Utc::now());

        match outcome {
            Ok(result) => {
                self.state = SessionState::Completed;
                self.last_result = Some(result);
                self.last_error = None;
            }
            Err(err) => {
                self.state = SessionState::Failed;
                self.last_error = Some(err.to_string());
                self.last_result = None;
            }
        }

        true
    }

    /// Back to `Idle`. The submission counter survives so that tokens issued
    /// before the reset can never match again.
    pub(crate) fn reset(&mut self) {
        *self = UploadSession {
            submissions: self.submissions,
            ..UploadSession::default()
        };
    }
}
