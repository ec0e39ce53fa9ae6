//! Guest-side submission flow.
//!
//! Mirrors what the invitation page does when the RSVP form is submitted:
//! the submit button is disabled, the form is validated locally, and a single
//! JSON POST goes either to the relay endpoint or straight to the spreadsheet
//! web-hook. There is no retry and no client timeout.

use reqwest::Client;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

use crate::error::{RelayError, SubmitError};
use crate::models::rsvp::{RsvpForm, RsvpSubmission};
use crate::validation::FormValidator;

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub submission: RsvpSubmission,
    pub response: Value,
}

pub struct RsvpSubmitter {
    client: Client,
    endpoint: String,
    validator: FormValidator,
    in_flight: AtomicBool,
}

// Clears the in-flight flag when the attempt ends, however it ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RsvpSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            validator: FormValidator::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_validator(mut self, validator: FormValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// True while a submission is waiting on the network
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submit the form once.
    ///
    /// Validation failures return before any request is made. A second call
    /// while one is still in flight is rejected with `SubmitError::InFlight`.
    pub async fn submit(&self, form: &RsvpForm) -> Result<SubmitOutcome, SubmitError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let submission = self.validator.validate(form)?;

        let response = self.post(&submission).await.map_err(|err| {
            error!("Error submitting RSVP: {}", err);
            SubmitError::Failed(err)
        })?;

        info!("RSVP submitted successfully for {}", submission.guest_name);
        Ok(SubmitOutcome {
            submission,
            response,
        })
    }

    async fn post(&self, submission: &RsvpSubmission) -> Result<Value, RelayError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await
            .map_err(RelayError::Http)?;

        let status = res.status();
        if !status.is_success() {
            return Err(RelayError::Status(status));
        }

        res.json::<Value>().await.map_err(RelayError::InvalidBody)
    }
}
