//! Time-list cue sheet: one `HH:MM` per line, optionally `column,HH:MM`.

use std::path::PathBuf;

use chrono::NaiveTime;
use tracing::warn;

use cuepilot_core::{CueCommand, RawCue, RawTrigger};

use crate::error::{Result, SourceError};
use crate::ScheduleSource;

/// Newline-delimited times of day. A bare `HH:MM` line fires column 1;
/// `column,HH:MM` selects the column explicitly. Both forms share the
/// roll-forward resolution.
pub struct TimeListSource {
    path: PathBuf,
}

impl TimeListSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_line(line: &str) -> std::result::Result<RawCue, String> {
        let (column, time_text) = match line.split_once(',') {
            Some((index, rest)) => {
                let column: u32 = index
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid column index: {:?}", index.trim()))?;
                (column, rest.trim())
            }
            None => (1, line),
        };

        let time = NaiveTime::parse_from_str(time_text, "%H:%M")
            .map_err(|_| format!("invalid time: {:?} (expected HH:MM)", time_text))?;

        Ok(RawCue {
            trigger: RawTrigger::TimeOfDay(time),
            command: CueCommand::ConnectColumn { column },
        })
    }
}

impl ScheduleSource for TimeListSource {
    fn describe(&self) -> String {
        format!("time-list cue sheet {}", self.path.display())
    }

    fn load(&self) -> Result<Vec<RawCue>> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| SourceError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        let mut cues = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Self::parse_line(line) {
                Ok(cue) => cues.push(cue),
                Err(reason) => warn!(line = index + 1, "skipping line: {reason}"),
            }
        }
        Ok(cues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_sheet(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn bare_times_default_to_column_one() {
        let path = write_sheet("cuepilot-tl-bare.txt", "16:45\n17:00\n");
        let cues = TimeListSource::new(&path).load().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cues.len(), 2);
        assert!(cues
            .iter()
            .all(|c| c.command == CueCommand::ConnectColumn { column: 1 }));
    }

    #[test]
    fn indexed_pairs_select_their_column() {
        let path = write_sheet("cuepilot-tl-pairs.txt", "2,16:45\n5,09:30\n");
        let cues = TimeListSource::new(&path).load().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cues[0].command, CueCommand::ConnectColumn { column: 2 });
        assert_eq!(cues[1].command, CueCommand::ConnectColumn { column: 5 });
        assert_eq!(
            cues[1].trigger,
            RawTrigger::TimeOfDay(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
        );
    }

    #[test]
    fn bad_lines_are_skipped() {
        let path = write_sheet("cuepilot-tl-bad.txt", "16:45\nnot-a-time\n24:10\n,\n17:15\n");
        let cues = TimeListSource::new(&path).load().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cues.len(), 2);
    }
}
