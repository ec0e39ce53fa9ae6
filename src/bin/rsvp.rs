//! Submit an RSVP from the terminal.
//!
//! Goes through the same validation and single-POST flow as the invitation
//! page, against either the relay endpoint or the spreadsheet web-hook.

use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use wedding_rsvp_service::{
    error::SubmitError, models::sheet::RsvpSummary, validation::FormValidator, RsvpForm,
    RsvpSubmitter,
};

#[derive(Debug, Parser)]
#[command(name = "rsvp", about = "Wedding RSVP command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AttendanceArg {
    Yes,
    No,
}

impl AttendanceArg {
    fn as_str(self) -> &'static str {
        match self {
            AttendanceArg::Yes => "yes",
            AttendanceArg::No => "no",
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit one RSVP
    Submit {
        /// Relay endpoint or spreadsheet web-hook URL
        #[arg(long, env = "RSVP_ENDPOINT", default_value = "http://localhost:3000/api/rsvp")]
        endpoint: String,

        /// Guest name
        #[arg(long)]
        name: String,

        /// Whether the guest will attend
        #[arg(long, value_enum)]
        attendance: AttendanceArg,

        /// Contact phone number
        #[arg(long)]
        phone: Option<String>,

        /// Message for the couple
        #[arg(long)]
        message: Option<String>,

        /// Refuse to submit without a phone number
        #[arg(long)]
        require_phone: bool,
    },

    /// Print attendance totals from a development server
    Summary {
        /// Base URL of the RSVP server
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Submit {
            endpoint,
            name,
            attendance,
            phone,
            message,
            require_phone,
        } => {
            let form = RsvpForm {
                guest_name: Some(name),
                phone,
                attendance: Some(attendance.as_str().to_string()),
                message,
            };

            let submitter =
                RsvpSubmitter::new(endpoint).with_validator(FormValidator::new(require_phone));

            match submitter.submit(&form).await {
                Ok(outcome) => {
                    println!(
                        "Thank you, {}! Your RSVP was sent at {}.",
                        outcome.submission.guest_name, outcome.submission.timestamp
                    );
                    if let Some(message) = outcome.response.get("message").and_then(|m| m.as_str()) {
                        println!("{}", message);
                    }
                    ExitCode::SUCCESS
                }
                Err(SubmitError::Validation(err)) => {
                    eprintln!("Error: {} ({})", err, err.missing_fields().join(", "));
                    ExitCode::from(2)
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Summary { server } => {
            let url = format!("{}/api/rsvp/summary", server.trim_end_matches('/'));
            let result: Result<RsvpSummary, reqwest::Error> = async {
                reqwest::get(&url)
                    .await?
                    .error_for_status()?
                    .json::<RsvpSummary>()
                    .await
            }
            .await;

            match result {
                Ok(summary) => {
                    println!("Responses:     {}", summary.total_responses);
                    println!("Attending:     {}", summary.attending);
                    println!("Not attending: {}", summary.not_attending);
                    println!("Guests:        {}", summary.total_guests);
                    println!("Rate:          {}%", summary.attendance_rate);
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Error: failed to fetch summary from {}: {}", url, err);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
