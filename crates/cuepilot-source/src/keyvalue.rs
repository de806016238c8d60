//! Key-value cue sheet: `hours: N` and `minutes: N` lines, one cue.
//!
//! Optional keys pick the target: `column: N` connects a column, and a
//! `layer: N` / `clip: N` pair plays a single clip (select, play-direction,
//! connect). With no target keys the cue connects column 1.

use std::path::PathBuf;

use chrono::NaiveTime;
use tracing::warn;

use cuepilot_core::{CueCommand, RawCue, RawTrigger};

use crate::error::{Result, SourceError};
use crate::ScheduleSource;

/// The simplest sheet: a single time of day. The trigger resolves to today
/// or rolls forward to tomorrow at load time.
pub struct KeyValueSource {
    path: PathBuf,
}

impl KeyValueSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn format_err(&self, reason: impl Into<String>) -> SourceError {
        SourceError::Format {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    fn command_for(
        &self,
        column: Option<u32>,
        layer: Option<u32>,
        clip: Option<u32>,
    ) -> Result<CueCommand> {
        match (column, layer, clip) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                Err(self.format_err("column conflicts with layer/clip"))
            }
            (_, Some(layer), Some(clip)) => Ok(CueCommand::PlayClip { layer, clip }),
            (_, Some(_), None) | (_, None, Some(_)) => {
                Err(self.format_err("layer and clip must be given together"))
            }
            (Some(column), None, None) => Ok(CueCommand::ConnectColumn { column }),
            (None, None, None) => Ok(CueCommand::ConnectColumn { column: 1 }),
        }
    }
}

impl ScheduleSource for KeyValueSource {
    fn describe(&self) -> String {
        format!("key-value cue sheet {}", self.path.display())
    }

    fn load(&self) -> Result<Vec<RawCue>> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| SourceError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        let mut hours: Option<u32> = None;
        let mut minutes: Option<u32> = None;
        let mut column: Option<u32> = None;
        let mut layer: Option<u32> = None;
        let mut clip: Option<u32> = None;

        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                warn!(line = index + 1, "skipping line without key: value form");
                continue;
            };
            let value: u32 = match value.trim().parse() {
                Ok(v) => v,
                Err(_) => {
                    warn!(line = index + 1, "skipping line: {:?} is not a number", value.trim());
                    continue;
                }
            };
            match key.trim() {
                "hours" => hours = Some(value),
                "minutes" => minutes = Some(value),
                "column" => column = Some(value),
                "layer" => layer = Some(value),
                "clip" => clip = Some(value),
                other => warn!(line = index + 1, "skipping unknown key {:?}", other),
            }
        }

        let hours = hours.ok_or_else(|| self.format_err("missing hours line"))?;
        let minutes = minutes.ok_or_else(|| self.format_err("missing minutes line"))?;
        let time = NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(|| {
            self.format_err(format!("time {:02}:{:02} is out of range", hours, minutes))
        })?;
        let command = self.command_for(column, layer, clip)?;

        Ok(vec![RawCue {
            trigger: RawTrigger::TimeOfDay(time),
            command,
        }])
    }
}
