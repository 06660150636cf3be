//! Handler for the `/resources` resource (classified submission).
//!
//! The request body is the flat form payload. Flat required-field checks
//! run first (`validator`), then the enum labels are parsed, and the
//! classification engine in `acehive_core` enforces the cross-field
//! taxonomy rules and derives the stored record. Exactly one insert goes
//! to the storage collaborator per accepted submission, and a user can
//! have at most one submission in flight at a time.

use acehive_core::error::CoreError;
use acehive_core::resource::{ResourceDraft, ResourceRecord};
use acehive_core::submission::Submission;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::engine::SubmissionRegistry;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

fn default_subject_type() -> String {
    "Subject".to_string()
}

/// Request body for `POST /resources`: the submission form, flat.
///
/// Enum-valued fields arrive as their display labels and are parsed after
/// the flat checks, so an unknown label surfaces as a validation error
/// rather than a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateResource {
    pub year: String,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub specialisation: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default = "default_subject_type")]
    pub subject_type: String,
    pub resource_type: String,
    /// Comma-delimited URL list as typed into the form.
    #[validate(length(min = 1, message = "at least one file URL is required"))]
    pub file_urls: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

impl CreateResource {
    /// Parse the labeled fields and assemble the draft.
    ///
    /// Goes through [`ResourceDraft::set_year`] so a first-year submission
    /// drops any degree/specialisation the client still sent.
    fn into_draft(self) -> Result<ResourceDraft, CoreError> {
        let year = self.year.parse()?;
        let mut draft = ResourceDraft {
            year: None,
            degree: self.degree,
            specialisation: self.specialisation,
            subject: self.subject,
            subject_type: self.subject_type.parse()?,
            resource_type: Some(self.resource_type.parse()?),
            file_urls: self.file_urls,
            title: self.title,
            description: self.description,
        };
        draft.set_year(year);
        Ok(draft)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/resources
///
/// Validate, classify, and store one resource record. Returns 201 with
/// the derived record so the client can show exactly what was submitted.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateResource>,
) -> AppResult<(StatusCode, Json<DataResponse<ResourceRecord>>)> {
    // 1. Flat required-field validation, before any parsing or network call.
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    // 2. Parse labels and assemble the draft.
    let draft = input.into_draft()?;

    // 3. Claim this user's submission slot; at most one in flight.
    let _guard = SubmissionRegistry::acquire(&state.submissions, &user.username)
        .ok_or(AppError::SubmissionInFlight)?;

    // 4. Cross-field validation + derivation. A failure here never reaches
    //    the collaborator.
    let mut submission = Submission::with_draft(draft);
    let record = submission.begin()?;

    // 5. Exactly one insert; no automatic retry. The collaborator's error
    //    message is surfaced verbatim.
    match state.store.insert("resources", &record).await {
        Ok(()) => {
            submission.complete_success();
            tracing::info!(
                username = %user.username,
                title = %record.title,
                resource_type = %record.resource_type,
                "Resource submitted"
            );
            Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
        }
        Err(err) => {
            submission.complete_failure(err.to_string());
            Err(err.into())
        }
    }
}
