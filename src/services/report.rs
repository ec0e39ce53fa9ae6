use crate::models::rsvp::{Attendance, RsvpSubmission};
use crate::models::sheet::RsvpSummary;

/// Tally attendance over recorded responses.
///
/// Each attending response counts as one guest. Responses that are neither
/// "yes" nor "no" only count toward the total.
pub fn summarize<'a, I>(rows: I) -> RsvpSummary
where
    I: IntoIterator<Item = &'a RsvpSubmission>,
{
    let mut total_responses = 0;
    let mut attending = 0;
    let mut not_attending = 0;

    for row in rows {
        total_responses += 1;
        match row.attendance() {
            Attendance::Yes => attending += 1,
            Attendance::No => not_attending += 1,
            Attendance::Other(_) => {}
        }
    }

    RsvpSummary {
        total_responses,
        attending,
        not_attending,
        total_guests: attending,
        attendance_rate: attendance_rate(attending, total_responses),
    }
}

fn attendance_rate(attending: usize, total: usize) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", attending as f64 / total as f64 * 100.0)
}
