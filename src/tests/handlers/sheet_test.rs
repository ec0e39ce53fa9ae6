use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::config::WebhookFailurePolicy;
use crate::tests::common::fixtures::{build_state, temp_ledgers, test_server, unreachable_url};

/// Sheet stand-in tests
#[cfg(test)]
mod sheet_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_running_banner() {
        let ledgers = temp_ledgers();
        let server = test_server(
            build_state(&unreachable_url().await, WebhookFailurePolicy::Mask, false, &ledgers),
            false,
        );

        let response = server.get("/webhook/sheet").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["message"], "Wedding RSVP API is running");
        assert_eq!(body["instructions"], "Use POST method to submit RSVP data");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_post_appends_row_as_given() {
        let ledgers = temp_ledgers();
        let server = test_server(
            build_state(&unreachable_url().await, WebhookFailurePolicy::Mask, false, &ledgers),
            false,
        );

        let response = server
            .post("/webhook/sheet")
            .json(&json!({
                "timestamp": "2026-06-20T15:04:05.000Z",
                "guestName": "Jane",
                "attendance": "yes",
                "message": "Hello, friends"
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "RSVP submitted successfully");

        let rows = ledgers.sheet.read_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].timestamp, "2026-06-20T15:04:05.000Z");
        assert_eq!(rows[0].guest_name, "Jane");
        assert_eq!(rows[0].phone, "");
        assert_eq!(rows[0].message, "Hello, friends");
    }

    #[tokio::test]
    async fn test_post_without_timestamp_uses_now() {
        let ledgers = temp_ledgers();
        let server = test_server(
            build_state(&unreachable_url().await, WebhookFailurePolicy::Mask, false, &ledgers),
            false,
        );

        server
            .post("/webhook/sheet")
            .json(&json!({ "guestName": "John", "attendance": "no" }))
            .await;

        let rows = ledgers.sheet.read_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(chrono::DateTime::parse_from_rfc3339(&rows[0].timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_json_reports_failure_envelope() {
        let ledgers = temp_ledgers();
        let server = test_server(
            build_state(&unreachable_url().await, WebhookFailurePolicy::Mask, false, &ledgers),
            false,
        );

        let response = server.post("/webhook/sheet").text("{not json").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Error processing RSVP: "));
        assert!(ledgers.sheet.read_all().unwrap().is_empty());
    }
}
