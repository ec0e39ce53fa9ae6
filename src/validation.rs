use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::ValidationError;
use crate::models::rsvp::{RsvpForm, RsvpSubmission};

/// Checks the required RSVP fields and produces a trimmed submission.
///
/// `guestName` and `attendance` are always required. `phone` becomes
/// required when the relay is configured with `require_phone`. No format
/// checks are applied to phone or message.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValidator {
    pub require_phone: bool,
}

impl FormValidator {
    pub fn new(require_phone: bool) -> Self {
        Self { require_phone }
    }

    /// Names of the required fields in the order they are reported
    pub fn required_fields(&self) -> Vec<&'static str> {
        if self.require_phone {
            vec!["guestName", "phone", "attendance"]
        } else {
            vec!["guestName", "attendance"]
        }
    }

    /// Message used by the relay endpoint when required fields are missing
    pub fn missing_fields_message(&self) -> String {
        let fields = self.required_fields();
        let listed = match fields.as_slice() {
            [only] => only.to_string(),
            [first, second] => format!("{} and {}", first, second),
            [init @ .., last] => format!("{}, and {}", init.join(", "), last),
            [] => String::new(),
        };
        format!("Missing required fields: {} are required", listed)
    }

    pub fn check(&self, form: &RsvpForm) -> Result<(), ValidationError> {
        let missing: Vec<&'static str> = self
            .required_fields()
            .into_iter()
            .filter(|field| {
                let value = match *field {
                    "guestName" => &form.guest_name,
                    "phone" => &form.phone,
                    _ => &form.attendance,
                };
                !is_present(value)
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }

    /// Validate and stamp the form with the current time
    pub fn validate(&self, form: &RsvpForm) -> Result<RsvpSubmission, ValidationError> {
        self.validate_at(form, Utc::now())
    }

    pub fn validate_at(
        &self,
        form: &RsvpForm,
        now: DateTime<Utc>,
    ) -> Result<RsvpSubmission, ValidationError> {
        self.check(form)?;

        Ok(RsvpSubmission {
            timestamp: iso_timestamp(now),
            guest_name: trimmed(&form.guest_name),
            phone: trimmed(&form.phone),
            attendance: trimmed(&form.attendance),
            message: trimmed(&form.message),
        })
    }
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g.
/// `2026-06-20T15:04:05.123Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn is_present(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(str::trim)
        .is_some_and(|value| !value.is_empty())
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}
