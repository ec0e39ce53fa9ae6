use serde::{Deserialize, Serialize};

// Raw RSVP form fields as posted by the invitation page
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpForm {
    pub guest_name: Option<String>,
    pub phone: Option<String>,
    pub attendance: Option<String>,
    pub message: Option<String>,
}

impl RsvpForm {
    pub fn new(guest_name: &str, attendance: &str) -> Self {
        Self {
            guest_name: Some(guest_name.to_string()),
            attendance: Some(attendance.to_string()),
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }
}

/// A validated, trimmed RSVP. This is also the JSON shape sent to the
/// spreadsheet web-hook and the column order of a ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub timestamp: String,
    pub guest_name: String,
    pub phone: String,
    pub attendance: String,
    pub message: String,
}

impl RsvpSubmission {
    pub fn attendance(&self) -> Attendance {
        Attendance::from(self.attendance.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attendance {
    Yes,
    No,
    Other(String),
}

impl From<&str> for Attendance {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("yes") {
            Attendance::Yes
        } else if value.eq_ignore_ascii_case("no") {
            Attendance::No
        } else {
            Attendance::Other(value.to_string())
        }
    }
}

// Echo of the accepted submission returned to the guest
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpReceipt {
    pub id: String,
    pub timestamp: String,
    pub guest_name: String,
    pub phone: String,
    pub attendance: String,
}

impl RsvpReceipt {
    pub fn new(id: String, submission: &RsvpSubmission) -> Self {
        Self {
            id,
            timestamp: submission.timestamp.clone(),
            guest_name: submission.guest_name.clone(),
            phone: submission.phone.clone(),
            attendance: submission.attendance.clone(),
        }
    }
}

// Response structure for the relay endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RsvpResponse {
    pub success: bool,
    pub message: String,
    pub data: RsvpReceipt,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
