use serde::{Deserialize, Serialize};

/// Envelope returned by the spreadsheet web-hook after appending a row
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetAck {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

// Answer to a GET on the web-hook
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetBanner {
    pub message: String,
    pub timestamp: String,
    pub instructions: String,
}

/// Attendance totals across recorded responses
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSummary {
    pub total_responses: usize,
    pub attending: usize,
    pub not_attending: usize,
    pub total_guests: usize,
    pub attendance_rate: String,
}
