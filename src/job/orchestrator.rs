use bytes::Bytes;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::document::SourceDocument;
use crate::errors::{DocumentError, FailureReason, SubmitError, ValidationError};
use crate::service::{SubmissionRequest, TranslationTransport};
use super::response::{interpret_response, TranslationResult};
use super::selection::TargetLanguageSet;
use super::state::SubmissionState;

/// Tagged outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The service produced a result set
    Success(Vec<TranslationResult>),
    /// The request failed; the orchestrator is now `Failed(reason)`
    Failure(FailureReason),
}

impl JobOutcome {
    /// Whether the submission succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[derive(Debug, Default)]
struct JobState {
    document: Option<SourceDocument>,
    languages: TargetLanguageSet,
    submission: SubmissionState,
    results: Vec<TranslationResult>,
}

/// Fails the job if a submission future is dropped before its response is
/// applied, so the orchestrator never stays `Submitting` forever
struct InFlight<'a> {
    state: &'a Mutex<JobState>,
    job_id: Uuid,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("[{}] Submission abandoned before a response arrived", self.job_id);
            self.state.lock().submission =
                SubmissionState::Failed(FailureReason::NetworkError("submission abandoned".to_string()));
        }
    }
}

/// Owns the selection and submission state of one translation job
///
/// All mutations are synchronous; only `submit` awaits, and the state lock is
/// never held across that await. At most one request is in flight per
/// orchestrator.
#[derive(Debug)]
pub struct JobOrchestrator<T: TranslationTransport> {
    transport: T,
    state: Mutex<JobState>,
}

impl<T: TranslationTransport> JobOrchestrator<T> {
    /// Create an orchestrator with nothing selected
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Mutex::new(JobState::default()),
        }
    }

    /// Create an orchestrator with the given languages preselected
    pub fn with_languages<S: AsRef<str>>(transport: T, languages: &[S]) -> Self {
        let orchestrator = Self::new(transport);
        orchestrator.state.lock().languages = TargetLanguageSet::from_codes(languages);
        orchestrator
    }

    /// The transport this orchestrator submits through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Select a document from a payload and the name it was picked under
    ///
    /// An unsupported filename leaves the current selection untouched.
    pub fn select_document(&self, payload: impl Into<Bytes>, filename: &str) -> Result<(), DocumentError> {
        let document = SourceDocument::new(payload, filename)?;
        self.set_document(document);
        Ok(())
    }

    /// Replace the selected document
    ///
    /// A finished job goes back to `Idle` and its results are cleared; an
    /// in-flight submission keeps going with the document it snapshotted.
    pub fn set_document(&self, document: SourceDocument) {
        let mut state = self.state.lock();
        debug!("Selected document {} ({} bytes)", document.display_name(), document.len());
        state.document = Some(document);

        if state.submission.is_terminal() {
            state.submission = SubmissionState::Idle;
            state.results.clear();
        }
    }

    /// Currently selected document
    pub fn document(&self) -> Option<SourceDocument> {
        self.state.lock().document.clone()
    }

    /// Toggle a target language, returning whether it is now selected
    pub fn toggle_language(&self, code: &str) -> bool {
        self.state.lock().languages.toggle(code)
    }

    /// Currently selected languages, in selection order
    pub fn selected_languages(&self) -> TargetLanguageSet {
        self.state.lock().languages.clone()
    }

    /// Current submission state
    pub fn state(&self) -> SubmissionState {
        self.state.lock().submission.clone()
    }

    /// Whether a request is in flight
    pub fn is_submitting(&self) -> bool {
        self.state.lock().submission.is_submitting()
    }

    /// Results of the last successful submission
    pub fn current_results(&self) -> Vec<TranslationResult> {
        self.state.lock().results.clone()
    }

    /// Reason the last submission failed, if it did
    pub fn current_error(&self) -> Option<FailureReason> {
        self.state.lock().submission.failure().cloned()
    }

    /// Submit the selected document for translation into the selected languages
    ///
    /// Returns `Err` without sending anything when preconditions fail or a
    /// request is already in flight. Otherwise exactly one request is sent and
    /// its outcome is both applied to the state and returned.
    pub async fn submit(&self) -> Result<JobOutcome, SubmitError> {
        let request = self.begin_submission()?;
        let mut in_flight = InFlight {
            state: &self.state,
            job_id: request.job_id,
            settled: false,
        };

        info!(
            "[{}] Submitting {} for translation into {}",
            request.job_id,
            request.document.display_name(),
            request.languages.join(", ")
        );

        let outcome = match self.transport.submit(&request).await {
            Ok(response) => match interpret_response(&response) {
                Ok(results) => JobOutcome::Success(results),
                Err(reason) => JobOutcome::Failure(reason),
            },
            Err(e) => JobOutcome::Failure(e.into()),
        };

        {
            let mut state = self.state.lock();
            match &outcome {
                JobOutcome::Success(results) => {
                    info!("[{}] Translation finished with {} result(s)", request.job_id, results.len());
                    state.results = results.clone();
                    state.submission = SubmissionState::Succeeded;
                }
                JobOutcome::Failure(reason) => {
                    error!("[{}] Translation failed: {}", request.job_id, reason);
                    state.submission = SubmissionState::Failed(reason.clone());
                }
            }
            in_flight.settled = true;
        }

        Ok(outcome)
    }

    // Validate, snapshot and enter `Submitting` under a single lock
    fn begin_submission(&self) -> Result<SubmissionRequest, SubmitError> {
        let mut state = self.state.lock();

        if state.submission.is_submitting() {
            warn!("Ignoring submit: a translation job is already in progress");
            return Err(SubmitError::AlreadySubmitting);
        }

        let document = state.document.clone().ok_or(ValidationError::NoDocument)?;
        if state.languages.is_empty() {
            return Err(ValidationError::NoLanguages.into());
        }

        let request = SubmissionRequest {
            job_id: Uuid::new_v4(),
            document,
            languages: state.languages.to_vec(),
        };

        state.submission = SubmissionState::Submitting;
        state.results.clear();

        Ok(request)
    }
}
