//! Development stand-in for the spreadsheet web-hook.
//!
//! Behaves like the deployed spreadsheet script: every POST appends one row
//! and the reply is always a 200 envelope, with `success: false` when the
//! row could not be stored.

use axum::{body::Bytes, extract::State, response::Json};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use crate::handlers::rsvp::{AppState, SUCCESS_MESSAGE};
use crate::models::rsvp::RsvpSubmission;
use crate::models::sheet::{SheetAck, SheetBanner};
use crate::validation::iso_timestamp;

pub async fn sheet_append(State(state): State<Arc<AppState>>, body: Bytes) -> Json<SheetAck> {
    let now = iso_timestamp(Utc::now());

    let result = match serde_json::from_slice::<Value>(&body) {
        Ok(data) => state
            .sheet
            .spawn_append(row_from_json(&data, &now))
            .await
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match result {
        Ok(()) => {
            info!("Sheet stand-in appended a row");
            Json(SheetAck {
                success: true,
                message: SUCCESS_MESSAGE.to_string(),
                timestamp: now,
            })
        }
        Err(err) => {
            error!("Error processing RSVP in sheet stand-in: {}", err);
            Json(SheetAck {
                success: false,
                message: format!("Error processing RSVP: {}", err),
                timestamp: now,
            })
        }
    }
}

pub async fn sheet_status() -> Json<SheetBanner> {
    Json(SheetBanner {
        message: "Wedding RSVP API is running".to_string(),
        timestamp: iso_timestamp(Utc::now()),
        instructions: "Use POST method to submit RSVP data".to_string(),
    })
}

// Missing or non-string fields become empty cells; a missing timestamp is "now"
fn row_from_json(data: &Value, now: &str) -> RsvpSubmission {
    let text = |key: &str| {
        data.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let timestamp = Some(text("timestamp"))
        .filter(|ts| !ts.is_empty())
        .unwrap_or_else(|| now.to_string());

    RsvpSubmission {
        timestamp,
        guest_name: text("guestName"),
        phone: text("phone"),
        attendance: text("attendance"),
        message: text("message"),
    }
}
