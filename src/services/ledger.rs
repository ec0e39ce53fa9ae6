use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{error, info};

use crate::error::LedgerError;
use crate::models::rsvp::RsvpSubmission;

/// Header row of every ledger, in column order
pub const LEDGER_HEADERS: [&str; 5] = ["Timestamp", "Guest Name", "Phone", "Attendance", "Message"];

/// Append-only CSV file of RSVP rows.
///
/// Used both as the relay's local fallback when the spreadsheet web-hook
/// fails and as the backing sheet of the development web-hook stand-in.
#[derive(Debug)]
pub struct RsvpLedger {
    path: PathBuf,
    file_mutex: Mutex<()>,
}

impl RsvpLedger {
    /// Open the ledger at `path`, creating parent directories and the
    /// header row if the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            info!("Creating new RSVP ledger at {}", path.display());

            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }

            let file = File::create(&path)?;
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
            writer.write_record(LEDGER_HEADERS)?;
            writer.flush()?;
        }

        Ok(Self {
            path,
            file_mutex: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, submission: &RsvpSubmission) -> Result<(), LedgerError> {
        let _lock = self.file_mutex.lock().map_err(|_| LedgerError::Poisoned)?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        writer.write_record([
            submission.timestamp.as_str(),
            submission.guest_name.as_str(),
            submission.phone.as_str(),
            submission.attendance.as_str(),
            submission.message.as_str(),
        ])?;
        writer.flush()?;

        info!(
            "Stored RSVP row for {} in {}",
            submission.guest_name,
            self.path.display()
        );

        Ok(())
    }

    /// `append` on the blocking thread pool, for use from async handlers
    pub async fn spawn_append(
        self: &Arc<Self>,
        submission: RsvpSubmission,
    ) -> Result<(), LedgerError> {
        let ledger = Arc::clone(self);
        tokio::task::spawn_blocking(move || ledger.append(&submission)).await?
    }

    /// `read_all` on the blocking thread pool
    pub async fn spawn_read_all(self: &Arc<Self>) -> Result<Vec<RsvpSubmission>, LedgerError> {
        let ledger = Arc::clone(self);
        tokio::task::spawn_blocking(move || ledger.read_all()).await?
    }

    /// Every row below the header, oldest first
    pub fn read_all(&self) -> Result<Vec<RsvpSubmission>, LedgerError> {
        let _lock = self.file_mutex.lock().map_err(|_| LedgerError::Poisoned)?;

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            rows.push(record_to_submission(&result?));
        }

        Ok(rows)
    }
}

// Short rows are padded with empty strings
fn record_to_submission(record: &StringRecord) -> RsvpSubmission {
    let field = |index: usize| record.get(index).unwrap_or_default().to_string();

    RsvpSubmission {
        timestamp: field(0),
        guest_name: field(1),
        phone: field(2),
        attendance: field(3),
        message: field(4),
    }
}

/// Open a shared ledger, logging the path on failure
pub fn open_shared_ledger(path: &Path) -> Result<Arc<RsvpLedger>, LedgerError> {
    RsvpLedger::open(path).map(Arc::new).map_err(|e| {
        error!("Failed to open RSVP ledger at {}: {}", path.display(), e);
        e
    })
}
