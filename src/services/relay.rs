use std::sync::Arc;
use tracing::{error, info, warn};

use crate::client::SheetsClient;
use crate::error::RelayError;
use crate::models::rsvp::RsvpSubmission;
use crate::models::sheet::SheetAck;
use crate::services::ledger::RsvpLedger;

/// What happened to a submission after validation
#[derive(Debug)]
pub enum RelayOutcome {
    /// The spreadsheet web-hook accepted the row
    Forwarded(SheetAck),
    /// The web-hook failed and the row went to the fallback ledger
    /// (`stored` is false if that write failed too)
    SavedLocally { error: RelayError, stored: bool },
}

impl RelayOutcome {
    pub fn is_forwarded(&self) -> bool {
        matches!(self, RelayOutcome::Forwarded(_))
    }
}

/// Forward one submission to the web-hook, falling back to the local ledger.
///
/// Exactly one outbound attempt is made. Failures never propagate; the caller
/// decides from the outcome what to tell the guest.
pub async fn forward_submission(
    sheets: &SheetsClient,
    fallback: &Arc<RsvpLedger>,
    submission: &RsvpSubmission,
) -> RelayOutcome {
    match sheets.append_row(submission).await {
        Ok(ack) => {
            info!("RSVP saved to spreadsheet: {:?}", ack);
            RelayOutcome::Forwarded(ack)
        }
        Err(err) => {
            error!("Spreadsheet web-hook error: {}", err);
            warn!("RSVP submission (fallback): {:?}", submission);

            #[cfg(feature = "sentry-monitoring")]
            sentry::capture_message(
                &format!("RSVP web-hook failed, row kept locally: {}", err),
                sentry::Level::Warning,
            );

            let stored = match fallback.spawn_append(submission.clone()).await {
                Ok(()) => true,
                Err(ledger_err) => {
                    error!(
                        "Failed to write fallback row to {}: {}",
                        fallback.path().display(),
                        ledger_err
                    );
                    false
                }
            };

            RelayOutcome::SavedLocally { error: err, stored }
        }
    }
}
