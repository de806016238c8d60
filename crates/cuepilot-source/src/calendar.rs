//! Calendar feed backend.
//!
//! Consumes a pre-fetched JSON event list (the shape a calendar API's
//! `events.list` returns, or a bare array of events). Fetching and the
//! OAuth/token lifecycle live outside the engine; the feed file is the
//! contract boundary.
//!
//! Event summaries are `"<identity>,<command>"`. Only events addressed to
//! this machine's configured identity are considered, and `command` maps
//! `run` to a column connect and `stop` to a column disconnect.

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::Deserialize;
use tracing::warn;

use cuepilot_core::{CueCommand, RawCue, RawTrigger};

use crate::error::{Result, SourceError};
use crate::ScheduleSource;

/// Column addressed by calendar commands. The feed names machines, not
/// columns, so the convention pins column 1.
const CALENDAR_COLUMN: u32 = 1;

pub struct CalendarSource {
    path: PathBuf,
    identity: String,
}

impl CalendarSource {
    pub fn new(path: impl Into<PathBuf>, identity: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            identity: identity.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Feed {
    Wrapped { items: Vec<CalendarEvent> },
    Bare(Vec<CalendarEvent>),
}

#[derive(Debug, Deserialize)]
struct CalendarEvent {
    #[serde(default)]
    summary: String,
    start: EventStart,
}

#[derive(Debug, Deserialize)]
struct EventStart {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    /// All-day events carry a bare date; they resolve to local midnight.
    date: Option<String>,
}

impl EventStart {
    fn resolve(&self) -> std::result::Result<DateTime<Local>, String> {
        if let Some(ref instant) = self.date_time {
            return DateTime::parse_from_rfc3339(instant)
                .map(|dt| dt.with_timezone(&Local))
                .map_err(|_| format!("invalid start dateTime: {:?}", instant));
        }
        if let Some(ref day) = self.date {
            let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map_err(|_| format!("invalid start date: {:?}", day))?;
            return date
                .and_hms_opt(0, 0, 0)
                .and_then(|naive| Local.from_local_datetime(&naive).earliest())
                .ok_or_else(|| format!("start date {:?} has no local midnight", day));
        }
        Err("event has no start time".to_string())
    }
}

impl ScheduleSource for CalendarSource {
    fn describe(&self) -> String {
        format!(
            "calendar feed {} (identity {:?})",
            self.path.display(),
            self.identity
        )
    }

    fn load(&self) -> Result<Vec<RawCue>> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| SourceError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        let feed: Feed = serde_json::from_str(&contents).map_err(|e| SourceError::Format {
            path: self.path.clone(),
            reason: format!("invalid event feed JSON: {e}"),
        })?;
        let events = match feed {
            Feed::Wrapped { items } => items,
            Feed::Bare(events) => events,
        };

        let mut cues = Vec::new();
        for event in events {
            let Some((name, command)) = event.summary.split_once(',') else {
                warn!("skipping event: summary is not \"identity,command\"");
                continue;
            };
            // Events addressed to other machines are dropped without
            // logging their contents.
            if name.trim() != self.identity {
                continue;
            }

            let command = match command.trim() {
                "run" => CueCommand::ConnectColumn {
                    column: CALENDAR_COLUMN,
                },
                "stop" => CueCommand::DisconnectColumn {
                    column: CALENDAR_COLUMN,
                },
                other => {
                    warn!(identity = %self.identity, "skipping event: unknown command {:?}", other);
                    continue;
                }
            };

            match event.start.resolve() {
                Ok(start) => cues.push(RawCue {
                    trigger: RawTrigger::Absolute(start.naive_local()),
                    command,
                }),
                Err(reason) => warn!(identity = %self.identity, "skipping event: {reason}"),
            }
        }
        Ok(cues)
    }
}
