use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::client::SheetsClient;
use crate::config::WebhookFailurePolicy;
use crate::models::rsvp::{ErrorResponse, RsvpForm, RsvpReceipt, RsvpResponse};
use crate::models::sheet::RsvpSummary;
use crate::services::ledger::RsvpLedger;
use crate::services::relay::{forward_submission, RelayOutcome};
use crate::services::report::summarize;
use crate::validation::FormValidator;

pub const SUCCESS_MESSAGE: &str = "RSVP submitted successfully";
pub const SAVED_LOCALLY_MESSAGE: &str = "RSVP submitted successfully (saved locally)";
pub const TRY_AGAIN_MESSAGE: &str = "Failed to submit RSVP. Please try again later.";

// AppState struct containing shared resources
pub struct AppState {
    pub sheets: SheetsClient,
    pub validator: FormValidator,
    pub failure_policy: WebhookFailurePolicy,
    pub fallback: Arc<RsvpLedger>,
    pub sheet: Arc<RsvpLedger>,
    pub static_dir: Option<PathBuf>,
}

// RSVP relay endpoint
pub async fn handle_rsvp(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Response {
    // Preflight OPTIONS requests are answered by the CORS layer in `routes`
    if method != Method::POST {
        warn!("Rejected {} request to RSVP endpoint", method);
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(ErrorResponse::new("Method not allowed")),
        )
            .into_response();
    }

    let form: RsvpForm = match serde_json::from_slice(&body) {
        Ok(form) => form,
        Err(err) => {
            error!("RSVP submission error: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error").with_message(TRY_AGAIN_MESSAGE)),
            )
                .into_response();
        }
    };

    let submission = match state.validator.validate(&form) {
        Ok(submission) => submission,
        Err(err) => {
            warn!(
                "RSVP rejected, missing fields: {}",
                err.missing_fields().join(", ")
            );
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(state.validator.missing_fields_message())),
            )
                .into_response();
        }
    };

    info!(
        "Received RSVP from {} (attendance: {})",
        submission.guest_name, submission.attendance
    );

    let outcome = forward_submission(&state.sheets, &state.fallback, &submission).await;
    let receipt = RsvpReceipt::new(Utc::now().timestamp_millis().to_string(), &submission);

    match outcome {
        RelayOutcome::Forwarded(_) => Json(RsvpResponse {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            data: receipt,
        })
        .into_response(),
        RelayOutcome::SavedLocally { error, stored } => match state.failure_policy {
            WebhookFailurePolicy::Mask => {
                warn!(
                    "Masking spreadsheet failure from guest {} (stored locally: {}): {}",
                    submission.guest_name, stored, error
                );
                Json(RsvpResponse {
                    success: true,
                    message: SAVED_LOCALLY_MESSAGE.to_string(),
                    data: receipt,
                })
                .into_response()
            }
            WebhookFailurePolicy::Surface => (
                StatusCode::BAD_GATEWAY,
                Json(
                    ErrorResponse::new("Upstream spreadsheet unavailable")
                        .with_message(TRY_AGAIN_MESSAGE),
                ),
            )
                .into_response(),
        },
    }
}

// Attendance totals over the local sheet and fallback ledgers
pub async fn rsvp_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RsvpSummary>, StatusCode> {
    let mut rows = Vec::new();
    for ledger in [&state.sheet, &state.fallback] {
        match ledger.spawn_read_all().await {
            Ok(mut found) => rows.append(&mut found),
            Err(err) => {
                error!(
                    "Failed to read RSVP ledger {}: {}",
                    ledger.path().display(),
                    err
                );
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    let summary = summarize(&rows);
    info!(
        "Summarized {} RSVP responses ({} attending)",
        summary.total_responses, summary.attending
    );
    Ok(Json(summary))
}
