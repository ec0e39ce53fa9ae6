use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::DateTime;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::error::SubmitError;
use crate::models::rsvp::RsvpForm;
use crate::submit::RsvpSubmitter;
use crate::tests::common::fixtures::{local_client, spawn_router, unreachable_url, RecordingWebhook};
use crate::validation::FormValidator;

/// Guest-side submission tests
#[cfg(test)]
mod submit_tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_form_never_reaches_network() {
        let hook = RecordingWebhook::accepting();
        let submitter = RsvpSubmitter::with_client(local_client(), hook.spawn().await);

        let forms = [
            RsvpForm::default(),
            RsvpForm::new("", "yes"),
            RsvpForm::new("Jane", "  "),
        ];
        for form in &forms {
            let err = submitter.submit(form).await.unwrap_err();
            assert!(matches!(err, SubmitError::Validation(_)));
            assert_eq!(err.to_string(), "Please fill in all required fields");
        }

        assert_eq!(hook.count(), 0);
        assert!(!submitter.is_in_flight());
    }

    #[tokio::test]
    async fn test_required_phone_is_checked_locally() {
        let hook = RecordingWebhook::accepting();
        let submitter = RsvpSubmitter::with_client(local_client(), hook.spawn().await)
            .with_validator(FormValidator::new(true));

        let err = submitter
            .submit(&RsvpForm::new("Jane", "yes"))
            .await
            .unwrap_err();

        match err {
            SubmitError::Validation(err) => assert_eq!(err.missing_fields(), &["phone"]),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(hook.count(), 0);
    }

    #[tokio::test]
    async fn test_valid_form_posts_exactly_once() {
        let hook = RecordingWebhook::accepting();
        let submitter = RsvpSubmitter::with_client(local_client(), hook.spawn().await);

        let outcome = submitter
            .submit(&RsvpForm::new("  Jane  ", "yes").with_message(" Yay "))
            .await
            .unwrap();

        assert_eq!(outcome.submission.guest_name, "Jane");
        assert_eq!(outcome.response["success"], true);

        let bodies = hook.bodies();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["guestName"], "Jane");
        assert_eq!(bodies[0]["message"], "Yay");
        assert_eq!(bodies[0]["phone"], "");
        let timestamp = bodies[0]["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(!submitter.is_in_flight());
    }

    #[tokio::test]
    async fn test_error_status_gives_generic_message() {
        let hook = RecordingWebhook::failing(StatusCode::INTERNAL_SERVER_ERROR);
        let submitter = RsvpSubmitter::with_client(local_client(), hook.spawn().await);

        let err = submitter
            .submit(&RsvpForm::new("Jane", "yes"))
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Failed(_)));
        assert_eq!(
            err.to_string(),
            "Failed to submit RSVP. Please try again later."
        );
        // No retry
        assert_eq!(hook.count(), 1);
        assert!(!submitter.is_in_flight());
    }

    #[tokio::test]
    async fn test_network_failure_gives_generic_message() {
        let submitter = RsvpSubmitter::with_client(local_client(), unreachable_url().await);

        let err = submitter
            .submit(&RsvpForm::new("Jane", "yes"))
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Failed(_)));
    }

    async fn hold_until_released(
        State(release): State<Arc<Notify>>,
        Json(_body): Json<Value>,
    ) -> Json<Value> {
        release.notified().await;
        Json(json!({ "success": true, "message": "RSVP submitted successfully" }))
    }

    #[tokio::test]
    async fn test_second_submit_rejected_while_in_flight() {
        let release = Arc::new(Notify::new());
        let router = Router::new()
            .route("/hook", post(hold_until_released))
            .with_state(Arc::clone(&release));
        let addr = spawn_router(router).await;

        let submitter = Arc::new(RsvpSubmitter::with_client(
            local_client(),
            format!("http://{}/hook", addr),
        ));

        let first = {
            let submitter = Arc::clone(&submitter);
            tokio::spawn(async move { submitter.submit(&RsvpForm::new("Jane", "yes")).await })
        };

        while !submitter.is_in_flight() {
            tokio::task::yield_now().await;
        }

        let err = submitter
            .submit(&RsvpForm::new("Jane", "yes"))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::InFlight));

        release.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert!(!submitter.is_in_flight());
    }
}
