//! Workflow controller
//!
//! Owns the `UploadSession` and is the only thing that mutates it. A
//! submission is split in three steps so the caller decides where the network
//! call runs:
//!
//! 1. `begin_submission` moves the session to `Analyzing` and hands out a
//!    `PendingSubmission` tagged with a fresh token.
//! 2. `PendingSubmission::run` performs the backend call. It borrows nothing
//!    from the controller, so it can be spawned.
//! 3. `complete_submission` applies the outcome, unless a newer selection or a
//!    reset made the token stale.
//!
//! Every transition publishes a `SessionSnapshot` on a watch channel.

use std::sync::Arc;
use tokio::sync::watch;
use vidmod_core::{
    AnalysisBackend, AnalysisError, AnalysisResult, ClientConfig, ErrorMetadata, FileCandidate,
    FileValidator, LogLevel, SelectedFile, ValidationOutcome,
};

use crate::presenter::{present, DisplayModel};
use crate::session::{SessionSnapshot, SessionState, SubmissionToken, UploadSession};

/// A started submission, detached from the controller.
pub struct PendingSubmission<B: ?Sized> {
    token: SubmissionToken,
    file: SelectedFile,
    backend: Arc<B>,
}

impl<B: AnalysisBackend + ?Sized> PendingSubmission<B> {
    pub fn token(&self) -> SubmissionToken {
        self.token
    }

    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    /// Perform the backend call. Always yields an outcome; errors are data here.
    pub async fn run(self) -> SubmissionOutcome {
        let result = self.backend.analyze(&self.file).await;
        SubmissionOutcome {
            token: self.token,
            result,
        }
    }
}

/// Backend response tagged with the token it was issued for.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub token: SubmissionToken,
    pub result: Result<AnalysisResult, AnalysisError>,
}

pub struct WorkflowController<B: ?Sized> {
    backend: Arc<B>,
    validator: FileValidator,
    session: UploadSession,
    updates: watch::Sender<SessionSnapshot>,
}

impl<B: AnalysisBackend + ?Sized> WorkflowController<B> {
    pub fn new(backend: Arc<B>, validator: FileValidator) -> Self {
        let session = UploadSession::new();
        let (updates, _) = watch::channel(session.snapshot());
        Self {
            backend,
            validator,
            session,
            updates,
        }
    }

    pub fn from_config(backend: Arc<B>, config: &ClientConfig) -> Self {
        Self::new(backend, FileValidator::from_config(config))
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn validator(&self) -> &FileValidator {
        &self.validator
    }

    /// Receive a snapshot after every transition. The current one is
    /// available immediately via `borrow()`.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }

    /// Display model for the stored result, if there is one.
    pub fn display_model(&self) -> Option<DisplayModel> {
        self.session.last_result().map(present)
    }

    /// Validate a picked file and apply the outcome. `None` (nothing picked)
    /// leaves the session untouched.
    pub fn select_file(&mut self, candidate: Option<FileCandidate>) -> Option<ValidationOutcome> {
        let outcome = self.validator.validate(candidate)?;

        match &outcome {
            ValidationOutcome::Accepted(file) => {
                tracing::info!(
                    file_name = %file.name(),
                    size = file.size(),
                    media_type = %file.media_type(),
                    "File selected"
                );
                self.session.select(file.clone());
            }
            ValidationOutcome::Rejected(err) => {
                tracing::info!(reason = %err, "File rejected");
                self.session.reject(err.to_string());
            }
        }

        self.publish();
        Some(outcome)
    }

    /// Start a submission for the selected file. Returns `None` unless the
    /// session is in `FileSelected`, so repeated triggers are no-ops.
    pub fn begin_submission(&mut self) -> Option<PendingSubmission<B>> {
        let file = self.session.selected_file()?.clone();
        let token = self.session.start()?;

        tracing::debug!(token = token.value(), file_name = %file.name(), "Submission started");
        self.publish();

        Some(PendingSubmission {
            token,
            file,
            backend: Arc::clone(&self.backend),
        })
    }

    /// Apply a finished submission. Returns false if it was stale and dropped;
    /// stale failures are not reported as analysis failures.
    pub fn complete_submission(&mut self, outcome: SubmissionOutcome) -> bool {
        let SubmissionOutcome { token, result } = outcome;
        let failure = result.as_ref().err().cloned();

        let applied = self.session.finish(token, result);
        if !applied {
            return false;
        }

        if let Some(err) = &failure {
            match err.log_level() {
                LogLevel::Error => tracing::error!(
                    token = token.value(),
                    error_code = err.error_code(),
                    error = %err,
                    "Analysis failed"
                ),
                LogLevel::Warn => tracing::warn!(
                    token = token.value(),
                    error_code = err.error_code(),
                    recoverable = err.is_recoverable(),
                    error = %err,
                    "Analysis failed"
                ),
                LogLevel::Debug => tracing::debug!(
                    token = token.value(),
                    error_code = err.error_code(),
                    error = %err,
                    "Analysis failed"
                ),
            }
        }

        tracing::info!(
            token = token.value(),
            state = %self.session.state(),
            "Submission finished"
        );
        self.publish();
        true
    }

    /// Begin, run, and complete a submission in one call. Returns the state
    /// afterwards, or `None` if there was nothing to submit.
    pub async fn submit(&mut self) -> Option<SessionState> {
        let pending = self.begin_submission()?;
        let outcome = pending.run().await;
        self.complete_submission(outcome);
        Some(self.session.state())
    }

    /// Back to `Idle`; any in-flight submission becomes stale.
    pub fn reset(&mut self) {
        self.session.reset();
        tracing::debug!("Session reset");
        self.publish();
    }

    fn publish(&self) {
        self.updates.send_replace(self.session.snapshot());
    }
}
