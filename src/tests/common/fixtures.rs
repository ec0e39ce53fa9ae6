use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_test::{TestServer, TestServerConfig};
use reqwest::Client;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::{tempdir, TempDir};
use tokio::net::TcpListener;

use crate::client::SheetsClient;
use crate::config::WebhookFailurePolicy;
use crate::handlers::rsvp::AppState;
use crate::models::rsvp::RsvpSubmission;
use crate::routes::create_router;
use crate::services::ledger::RsvpLedger;
use crate::validation::FormValidator;

/// HTTP client that never goes through a proxy, for talking to local stubs
pub fn local_client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

/// Generate a sample submission for testing purposes
pub fn sample_submission(guest_name: &str, attendance: &str) -> RsvpSubmission {
    RsvpSubmission {
        timestamp: "2026-06-20T15:04:05.000Z".to_string(),
        guest_name: guest_name.to_string(),
        phone: "555-0100".to_string(),
        attendance: attendance.to_string(),
        message: "Can't wait!".to_string(),
    }
}

/// Fallback and sheet ledgers in a temporary directory
pub struct TestLedgers {
    pub dir: TempDir,
    pub fallback: Arc<RsvpLedger>,
    pub sheet: Arc<RsvpLedger>,
}

pub fn temp_ledgers() -> TestLedgers {
    let dir = tempdir().unwrap();
    let fallback = Arc::new(RsvpLedger::open(dir.path().join("fallback.csv")).unwrap());
    let sheet = Arc::new(RsvpLedger::open(dir.path().join("sheet.csv")).unwrap());
    TestLedgers {
        dir,
        fallback,
        sheet,
    }
}

/// Local client that gives up on the web-hook after `timeout`
pub fn local_client_with_timeout(timeout: Duration) -> Client {
    Client::builder().no_proxy().timeout(timeout).build().unwrap()
}

pub fn build_state(
    webhook_url: &str,
    failure_policy: WebhookFailurePolicy,
    require_phone: bool,
    ledgers: &TestLedgers,
) -> Arc<AppState> {
    build_state_with_client(local_client(), webhook_url, failure_policy, require_phone, ledgers)
}

pub fn build_state_with_client(
    client: Client,
    webhook_url: &str,
    failure_policy: WebhookFailurePolicy,
    require_phone: bool,
    ledgers: &TestLedgers,
) -> Arc<AppState> {
    Arc::new(AppState {
        sheets: SheetsClient::with_client(client, webhook_url),
        validator: FormValidator::new(require_phone),
        failure_policy,
        fallback: Arc::clone(&ledgers.fallback),
        sheet: Arc::clone(&ledgers.sheet),
        static_dir: None,
    })
}

pub fn test_server(app_state: Arc<AppState>, is_production: bool) -> TestServer {
    let router = create_router(app_state, is_production);
    let config = TestServerConfig::builder().mock_transport().build();
    TestServer::new_with_config(router, config).unwrap()
}

/// Serve `router` on an ephemeral local port
pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// URL of a local port nothing is listening on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/hook", addr)
}

async fn never_reply() -> StatusCode {
    std::future::pending::<()>().await;
    StatusCode::OK
}

/// URL of a web-hook that accepts the connection but never answers
pub async fn hanging_webhook_url() -> String {
    let router = Router::new().route("/hook", post(never_reply));
    let addr = spawn_router(router).await;
    format!("http://{}/hook", addr)
}

/// Stand-in web-hook that records every POST body and answers with a
/// fixed status and JSON reply
#[derive(Clone)]
pub struct RecordingWebhook {
    received: Arc<Mutex<Vec<Value>>>,
    status: StatusCode,
    reply: Value,
}

async fn record_post(
    State(hook): State<RecordingWebhook>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    hook.received.lock().unwrap().push(body);
    (hook.status, Json(hook.reply.clone()))
}

impl RecordingWebhook {
    fn new(status: StatusCode, reply: Value) -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            status,
            reply,
        }
    }

    /// Behaves like a healthy spreadsheet script
    pub fn accepting() -> Self {
        Self::new(
            StatusCode::OK,
            json!({
                "success": true,
                "message": "RSVP submitted successfully",
                "timestamp": "2026-06-20T15:04:05.000Z"
            }),
        )
    }

    pub fn failing(status: StatusCode) -> Self {
        Self::new(status, json!({ "error": "spreadsheet exploded" }))
    }

    /// Answers 200 but reports that the row was not stored
    pub fn rejecting() -> Self {
        Self::new(
            StatusCode::OK,
            json!({
                "success": false,
                "message": "Error processing RSVP: sheet is locked",
                "timestamp": "2026-06-20T15:04:05.000Z"
            }),
        )
    }

    /// Start serving and return the web-hook URL
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/hook", post(record_post))
            .with_state(self.clone());
        let addr = spawn_router(router).await;
        format!("http://{}/hook", addr)
    }

    pub fn count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}
