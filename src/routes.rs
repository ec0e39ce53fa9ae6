use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderName, Method, StatusCode},
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::{BoxError, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::handlers::health::health_check;
use crate::handlers::rsvp::{handle_rsvp, rsvp_summary, AppState};
use crate::handlers::sheet::{sheet_append, sheet_status};

/// CORS policy of the RSVP endpoint: any origin, the usual methods and the
/// headers browsers send with a JSON POST
pub fn rsvp_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-requested-with"),
            header::ACCEPT,
            HeaderName::from_static("accept-version"),
            header::CONTENT_LENGTH,
            HeaderName::from_static("content-md5"),
            header::CONTENT_TYPE,
            header::DATE,
            HeaderName::from_static("x-api-version"),
        ])
}

pub fn create_router(app_state: Arc<AppState>, is_production: bool) -> Router {
    let mut router = Router::new();

    // Health check is always available
    let health_route = Router::new().route("/health", get(health_check));
    router = router.merge(health_route);

    // RSVP relay is always available
    let rsvp_route = Router::new()
        .route("/api/rsvp", any(handle_rsvp))
        .layer(rsvp_cors());
    router = router.merge(rsvp_route);

    // Only add the sheet stand-in and the summary if not in production mode
    if !is_production {
        let dev_routes = Router::new()
            .route("/api/rsvp/summary", get(rsvp_summary))
            .route("/webhook/sheet", get(sheet_status).post(sheet_append));

        router = router.merge(dev_routes);

        info!("Development routes enabled - sheet stand-in and RSVP summary are exposed");
    } else {
        info!("Running in production mode - only the RSVP relay, health and pages are exposed");
    }

    let static_dir = app_state.static_dir.clone();
    let router = router.with_state(app_state);

    // Invitation pages
    match static_dir {
        Some(dir) if dir.is_dir() => {
            info!("Serving invitation pages from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        Some(dir) => {
            warn!("Static directory {} not found - pages will not be served", dir.display());
            router
        }
        None => router,
    }
}

// Error handler
async fn handle_error(error: BoxError) -> (StatusCode, String) {
    if error.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            "Request took too long".to_string(),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {}", error),
        )
    }
}

/// Server-wide layers: load shedding, a concurrency cap, the whole-request
/// timeout and request tracing
pub fn with_service_layers(router: Router, request_timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_error))
            .load_shed()
            .concurrency_limit(64)
            .timeout(request_timeout)
            .layer(TraceLayer::new_for_http()),
    )
}
