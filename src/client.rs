use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::RelayError;
use crate::models::rsvp::RsvpSubmission;
use crate::models::sheet::SheetAck;

/// Client for the spreadsheet web-hook that stores one RSVP per row
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: Client,
    url: String,
}

impl SheetsClient {
    /// Create a client for `url`. Without a timeout a stalled web-hook
    /// holds the request until the server-level timeout fires, so the
    /// server always passes one (see `from_config`).
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_client(builder.build()?, url))
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(config.sheets_url.clone(), Some(config.sheets_timeout))
    }

    /// Wrap an already configured `reqwest::Client`
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the submission as JSON and read back the web-hook's envelope.
    ///
    /// Any non-2xx status, a body that is not the expected envelope, or an
    /// envelope with `success: false` counts as a failure.
    pub async fn append_row(&self, submission: &RsvpSubmission) -> Result<SheetAck, RelayError> {
        info!("Forwarding RSVP for {} to spreadsheet web-hook", submission.guest_name);
        debug!("Web-hook URL: {}", self.url);

        let res = self
            .client
            .post(&self.url)
            .json(submission)
            .send()
            .await
            .map_err(RelayError::Http)?;

        let status = res.status();
        info!("Web-hook response received with status: {}", status);

        if !status.is_success() {
            return Err(RelayError::Status(status));
        }

        let ack = res
            .json::<SheetAck>()
            .await
            .map_err(RelayError::InvalidBody)?;

        if !ack.success {
            warn!("Web-hook reported failure: {}", ack.message);
            return Err(RelayError::Rejected(ack.message));
        }

        Ok(ack)
    }
}
