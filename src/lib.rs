//! Wedding RSVP Service
//!
//! This library backs a static, multi-page wedding invitation site with an
//! RSVP relay. Guests fill in a short form; the relay validates it and
//! forwards one row to a spreadsheet web-hook, falling back to a local CSV
//! ledger when the web-hook cannot be reached.
//!
//! # Modules
//!
//! - `config`: environment-driven settings for the server and the relay
//! - `validation`: required-field checks and trimming for RSVP forms
//! - `client`: `SheetsClient` for the outbound spreadsheet web-hook
//! - `submit`: `RsvpSubmitter`, the browser-side submission flow
//! - `invitation`: page navigation and modal state for the invitation pages
//! - `services`: forwarding with fallback, CSV ledgers and the summary report
//! - `handlers` / `routes`: the axum surface
//!
//! # Failure masking
//!
//! When the web-hook fails the relay still answers `success: true` with a
//! "(saved locally)" message unless `RSVP_ON_WEBHOOK_FAILURE=surface` is set.
//! See [`config::WebhookFailurePolicy`].

pub mod client;
pub mod config;
pub mod error;
pub mod invitation;
pub mod routes;
pub mod submit;
pub mod validation;

pub mod models {
    pub mod rsvp;
    pub mod sheet;
}

pub mod services {
    pub mod ledger;
    pub mod relay;
    pub mod report;
}

pub mod handlers {
    pub mod health;
    pub mod rsvp;
    pub mod sheet;
}


// Re-export the main API types for ease of use
pub use client::SheetsClient;
pub use config::{Config, WebhookFailurePolicy};
pub use handlers::rsvp::AppState;
pub use models::rsvp::{RsvpForm, RsvpSubmission};
pub use routes::create_router;
pub use submit::RsvpSubmitter;
