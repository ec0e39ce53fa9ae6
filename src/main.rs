use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use wedding_rsvp_service::{
    create_router, routes::with_service_layers, services::ledger::open_shared_ledger,
    validation::FormValidator, AppState, Config, SheetsClient,
};

#[tokio::main]
async fn main() {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    #[cfg(feature = "sentry-monitoring")]
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        info!("Sentry error tracking enabled");
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    // Initialize the spreadsheet web-hook client
    let sheets = SheetsClient::from_config(&config).expect("Failed to build HTTP client");
    info!("Forwarding RSVPs to {}", sheets.url());

    info!(
        "Web-hook timeout {:?}, request timeout {:?}",
        config.sheets_timeout, config.request_timeout
    );

    if config.require_phone {
        info!("Phone number is a required RSVP field");
    }

    info!(
        "Web-hook failure policy: {} (RSVP_ON_WEBHOOK_FAILURE)",
        config.failure_policy
    );

    // Open the local ledgers
    let fallback =
        open_shared_ledger(&config.fallback_path).expect("Failed to open fallback ledger");
    let sheet = open_shared_ledger(&config.sheet_path).expect("Failed to open sheet ledger");
    info!(
        "Ledgers ready: fallback at {}, sheet stand-in at {}",
        fallback.path().display(),
        sheet.path().display()
    );

    if config.is_production {
        info!("Running in PRODUCTION mode - restricting available endpoints");
    } else {
        info!("Running in DEVELOPMENT mode - all endpoints will be available");
    }

    // Create shared application state
    let app_state = Arc::new(AppState {
        sheets,
        validator: FormValidator::new(config.require_phone),
        failure_policy: config.failure_policy,
        fallback,
        sheet,
        static_dir: Some(config.static_dir.clone()),
    });

    // Create router with appropriate routes based on environment
    let app = with_service_layers(
        create_router(app_state, config.is_production),
        config.request_timeout,
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    // Set up signal handler for graceful shutdown
    let shutdown = async {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received interrupt signal, starting graceful shutdown");
            },
            _ = terminate => {
                info!("Received terminate signal, starting graceful shutdown");
            },
        }
    };

    // Start server with graceful shutdown
    info!("Server is ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .expect("Failed to start server");

    info!("Server has been gracefully shut down");
}
