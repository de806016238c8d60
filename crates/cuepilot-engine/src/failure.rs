//! Append-only failure log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::{error, warn};

/// Durable record of cues whose dispatch was abandoned.
///
/// Recording must never take the run down: a failed write degrades to a
/// console warning and the schedule keeps progressing.
pub struct FailureSink {
    path: PathBuf,
}

impl FailureSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one `<timestamp>: <message>` line and notify the operator.
    pub fn record(&self, at: DateTime<Local>, message: &str) {
        error!("{message} (recorded in {})", self.path.display());
        if let Err(e) = self.append(at, message) {
            warn!(path = %self.path.display(), "failure log write failed: {e}");
        }
    }

    fn append(&self, at: DateTime<Local>, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}: {}", at.format("%Y-%m-%d %H:%M:%S"), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn appends_one_line_per_record() {
        let path = std::env::temp_dir().join("cuepilot-failure-log.txt");
        std::fs::remove_file(&path).ok();

        let sink = FailureSink::new(&path);
        let at = Local.with_ymd_and_hms(2025, 1, 22, 16, 45, 2).unwrap();
        sink.record(at, "connect column 1 failed");
        sink.record(at, "connect column 2 failed");

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2025-01-22 16:45:02: "));
        assert!(lines[1].ends_with("connect column 2 failed"));
    }

    #[test]
    fn unwritable_path_does_not_panic() {
        // A directory is not appendable; record must swallow the error.
        let sink = FailureSink::new(std::env::temp_dir());
        sink.record(Local::now(), "goes nowhere");
    }
}
