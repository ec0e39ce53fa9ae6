use thiserror::Error;

/// Form fields that were missing or blank after trimming
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields(Vec<&'static str>),
}

impl ValidationError {
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::MissingFields(fields) => fields,
        }
    }
}

/// Failure of a single outbound POST, either to the spreadsheet web-hook
/// or to the relay endpoint
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("upstream returned an unreadable body: {0}")]
    InvalidBody(#[source] reqwest::Error),

    #[error("upstream rejected the row: {0}")]
    Rejected(String),
}

/// Errors surfaced to a guest submitting the form
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A submission is already in progress")]
    InFlight,

    #[error("Failed to submit RSVP. Please try again later.")]
    Failed(#[source] RelayError),
}

/// Errors reading or appending a CSV ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to access ledger file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read or write ledger row: {0}")]
    Csv(#[from] csv::Error),

    #[error("ledger lock was poisoned")]
    Poisoned,

    #[error("ledger task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
