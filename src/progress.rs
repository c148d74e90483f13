// Milestone log
// One timestamped line per pipeline milestone, append-only

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Timestamp layout: Year-MonthAbbrev-Day-Hour:Minute:Second
const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Append-only progress log.
///
/// Records forward progress only - errors are surfaced through the
/// terminating failure itself, never through this file. Each call appends
/// one `<timestamp>:<message>` line.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one milestone line. The file is created on first use.
    pub fn record(&self, message: &str) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}:{}", timestamp, message)?;
        Ok(())
    }
}
