use dotenv::dotenv;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Spreadsheet script the relay forwards to when `GOOGLE_SHEETS_URL` is unset
pub const DEFAULT_SHEETS_URL: &str =
    "https://script.google.com/macros/s/AKfycbwfqFxoap2pk-hQo8gaX31pFgDbQ9ONy49nrVR9xfm6GJDHHrjvSltcOIpugxZSpLxV/exec";

pub const DEFAULT_FALLBACK_PATH: &str = "data/rsvp_fallback.csv";
pub const DEFAULT_SHEET_PATH: &str = "data/rsvp_sheet.csv";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_PORT: u16 = 3000;

/// Whole-request timeout applied by the server's layer stack
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound web-hook timeout. Always shorter than `REQUEST_TIMEOUT` so a
/// stalled web-hook ends in the fallback path instead of a dropped request.
pub const DEFAULT_SHEETS_TIMEOUT: Duration = Duration::from_secs(8);

/// What the relay tells the guest when the spreadsheet web-hook fails.
///
/// `Mask` keeps the long-standing behavior: the row goes to the local
/// fallback ledger and the guest still sees `success: true` with a
/// "(saved locally)" message. Whether guests should be told about a failed
/// downstream write is an open product decision, so the choice lives here
/// rather than being baked into the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WebhookFailurePolicy {
    #[default]
    Mask,
    Surface,
}

impl FromStr for WebhookFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mask" => Ok(Self::Mask),
            "surface" => Ok(Self::Surface),
            other => Err(format!("unknown webhook failure policy: {}", other)),
        }
    }
}

impl fmt::Display for WebhookFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mask => f.write_str("mask"),
            Self::Surface => f.write_str("surface"),
        }
    }
}

/// Runtime settings for the RSVP server
#[derive(Debug, Clone)]
pub struct Config {
    pub sheets_url: String,
    pub sheets_timeout: Duration,
    pub request_timeout: Duration,
    pub require_phone: bool,
    pub failure_policy: WebhookFailurePolicy,
    pub fallback_path: PathBuf,
    pub sheet_path: PathBuf,
    pub static_dir: PathBuf,
    pub is_production: bool,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheets_url: DEFAULT_SHEETS_URL.to_string(),
            sheets_timeout: DEFAULT_SHEETS_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
            require_phone: false,
            failure_policy: WebhookFailurePolicy::default(),
            fallback_path: PathBuf::from(DEFAULT_FALLBACK_PATH),
            sheet_path: PathBuf::from(DEFAULT_SHEET_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            is_production: false,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load settings from the process environment (and `.env` if present)
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup. Unparseable values fall back to
    /// their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sheets_url = lookup("GOOGLE_SHEETS_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.sheets_url);

        let sheets_timeout = lookup("SHEETS_TIMEOUT_SECS")
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    warn!("Ignoring invalid SHEETS_TIMEOUT_SECS value: {}", raw);
                    None
                }
            })
            .map(|timeout| {
                if timeout >= defaults.request_timeout {
                    warn!(
                        "SHEETS_TIMEOUT_SECS must be below the {:?} request timeout; using {:?}",
                        defaults.request_timeout, defaults.sheets_timeout
                    );
                    defaults.sheets_timeout
                } else {
                    timeout
                }
            })
            .unwrap_or(defaults.sheets_timeout);

        let require_phone = lookup("RSVP_REQUIRE_PHONE")
            .map(|val| val.trim().to_lowercase() == "true")
            .unwrap_or(defaults.require_phone);

        let failure_policy = lookup("RSVP_ON_WEBHOOK_FAILURE")
            .map(|raw| {
                raw.parse().unwrap_or_else(|e| {
                    warn!("{}; using {}", e, defaults.failure_policy);
                    defaults.failure_policy
                })
            })
            .unwrap_or(defaults.failure_policy);

        let fallback_path = lookup("RSVP_FALLBACK_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.fallback_path);

        let sheet_path = lookup("RSVP_SHEET_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.sheet_path);

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let is_production = lookup("ENVIRONMENT")
            .map(|val| val.to_lowercase() == "production")
            .unwrap_or(false);

        let port = lookup("PORT")
            .and_then(|raw| match raw.trim().parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("Ignoring invalid PORT value: {}", raw);
                    None
                }
            })
            .unwrap_or(defaults.port);

        Self {
            sheets_url,
            sheets_timeout,
            request_timeout: defaults.request_timeout,
            require_phone,
            failure_policy,
            fallback_path,
            sheet_path,
            static_dir,
            is_production,
            port,
        }
    }
}
