//! Submission lifecycle.
//!
//! [`Submission`] owns a draft and walks it through an explicit state
//! machine: `Idle -> Submitting -> Succeeded | Failed -> Idle`. Validation
//! happens inside [`begin`](Submission::begin), before the caller issues
//! any network call, and a second `begin` while one submission is in
//! flight is rejected, so a controller instance guarantees at most one
//! outstanding insert.

use crate::error::CoreError;
use crate::resource::{derive_record, ResourceDraft, ResourceRecord};

/// Lifecycle state of a submission controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// No submission in progress; the draft is editable.
    #[default]
    Idle,
    /// A derived record has been handed to the caller and its insert has
    /// not settled yet.
    Submitting,
    /// The insert was acknowledged by the collaborator. The draft is kept
    /// until the caller acknowledges, so it can still display what was
    /// just submitted.
    Succeeded,
    /// Validation or the insert failed. The draft is kept for
    /// resubmission.
    Failed {
        /// Validation message, or the collaborator's error verbatim.
        message: String,
    },
}

/// Errors returned by [`Submission::begin`].
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// A previous submission has not settled yet.
    #[error("A submission is already in flight")]
    InFlight,

    /// The draft failed validation; no network call should be made.
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Orchestrates one draft's journey from form state to stored record.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    draft: ResourceDraft,
    state: SubmissionState,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an externally assembled draft (e.g. a decoded request
    /// body) instead of field-by-field edits.
    pub fn with_draft(draft: ResourceDraft) -> Self {
        Self {
            draft,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn draft(&self) -> &ResourceDraft {
        &self.draft
    }

    /// Mutable access to the draft for field-by-field edits.
    ///
    /// Edits while a submission is in flight are not prevented here; the
    /// in-flight record was already derived and is unaffected.
    pub fn draft_mut(&mut self) -> &mut ResourceDraft {
        &mut self.draft
    }

    /// Validate the draft and move to `Submitting`.
    ///
    /// On success the derived [`ResourceRecord`] is returned for the caller
    /// to insert; exactly one insert per `begin` is the contract. On
    /// validation failure the state moves to `Failed` carrying the
    /// validation message and no record escapes.
    pub fn begin(&mut self) -> Result<ResourceRecord, SubmissionError> {
        if self.state == SubmissionState::Submitting {
            return Err(SubmissionError::InFlight);
        }
        match derive_record(&self.draft) {
            Ok(record) => {
                self.state = SubmissionState::Submitting;
                Ok(record)
            }
            Err(err) => {
                self.state = SubmissionState::Failed {
                    message: err.to_string(),
                };
                Err(SubmissionError::Invalid(err))
            }
        }
    }

    /// Record that the collaborator acknowledged the insert.
    ///
    /// Only meaningful while `Submitting`; ignored otherwise.
    pub fn complete_success(&mut self) {
        if self.state == SubmissionState::Submitting {
            self.state = SubmissionState::Succeeded;
        }
    }

    /// Record that the insert failed, keeping the collaborator's message
    /// verbatim. The draft is retained for resubmission.
    ///
    /// Only meaningful while `Submitting`; ignored otherwise.
    pub fn complete_failure(&mut self, message: impl Into<String>) {
        if self.state == SubmissionState::Submitting {
            self.state = SubmissionState::Failed {
                message: message.into(),
            };
        }
    }

    /// Acknowledge a settled submission and return to `Idle`.
    ///
    /// Only an acknowledged success resets the draft; acknowledging a
    /// failure keeps it so the user can correct and resubmit.
    pub fn acknowledge(&mut self) {
        match self.state {
            SubmissionState::Succeeded => {
                self.draft = ResourceDraft::default();
                self.state = SubmissionState::Idle;
            }
            SubmissionState::Failed { .. } => {
                self.state = SubmissionState::Idle;
            }
            SubmissionState::Idle | SubmissionState::Submitting => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
