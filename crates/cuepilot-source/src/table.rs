//! CSV cue sheet: `column,yyyy/mm/dd,hh:mm:ss` rows.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use cuepilot_core::{CueCommand, RawCue, RawTrigger};

use crate::error::{Result, SourceError};
use crate::ScheduleSource;

const DATE_FORMAT: &str = "%Y/%m/%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Tabular cue sheet. Each data row schedules one column connect at an
/// absolute date + time.
pub struct TableSource {
    path: PathBuf,
}

impl TableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_row(record: &csv::StringRecord) -> std::result::Result<RawCue, String> {
        let column_field = record.get(0).ok_or("missing column field")?;
        let date_field = record.get(1).ok_or("missing date field")?;
        let time_field = record.get(2).ok_or("missing time field")?;

        let column: u32 = column_field
            .trim()
            .parse()
            .map_err(|_| format!("invalid column index: {:?}", column_field))?;
        let date = NaiveDate::parse_from_str(date_field.trim(), DATE_FORMAT)
            .map_err(|_| format!("invalid date: {:?} (expected yyyy/mm/dd)", date_field))?;
        let time = NaiveTime::parse_from_str(time_field.trim(), TIME_FORMAT)
            .map_err(|_| format!("invalid time: {:?} (expected hh:mm:ss)", time_field))?;

        Ok(RawCue {
            trigger: RawTrigger::Absolute(date.and_time(time)),
            command: CueCommand::ConnectColumn { column },
        })
    }
}

impl ScheduleSource for TableSource {
    fn describe(&self) -> String {
        format!("table cue sheet {}", self.path.display())
    }

    fn load(&self) -> Result<Vec<RawCue>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| map_csv_open_error(&self.path, e))?;

        let mut cues = Vec::new();
        // Data rows start at line 2; line 1 is the header.
        for (index, record) in reader.records().enumerate() {
            let line = index + 2;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!(line, "skipping unreadable row: {e}");
                    continue;
                }
            };
            match Self::parse_row(&record) {
                Ok(cue) => cues.push(cue),
                Err(reason) => warn!(line, "skipping row: {reason}"),
            }
        }
        Ok(cues)
    }
}

fn map_csv_open_error(path: &Path, e: csv::Error) -> SourceError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => SourceError::Io {
            path: path.to_path_buf(),
            source: io,
        },
        other => SourceError::Format {
            path: path.to_path_buf(),
            reason: format!("{:?}", other),
        },
    }
}
