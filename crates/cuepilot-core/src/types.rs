use chrono::{DateTime, Local, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The command a cue fires at the receiver.
///
/// Opaque to the scheduling logic: the wait loop and orchestrator never look
/// inside, only the dispatcher maps a command to wire messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CueCommand {
    /// Connect a composition column (selects the playback unit by index).
    ConnectColumn { column: u32 },

    /// Disconnect a composition column.
    DisconnectColumn { column: u32 },

    /// Select and connect a single clip. Dispatch also sends the auxiliary
    /// play-direction messages so the clip starts in forward transport.
    PlayClip { layer: u32, clip: u32 },
}

impl fmt::Display for CueCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueCommand::ConnectColumn { column } => write!(f, "connect column {}", column),
            CueCommand::DisconnectColumn { column } => write!(f, "disconnect column {}", column),
            CueCommand::PlayClip { layer, clip } => write!(f, "play layer {} clip {}", layer, clip),
        }
    }
}

/// A trigger as a source file states it, before resolution against "now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTrigger {
    /// Full date + time, second resolution, local timezone.
    Absolute(NaiveDateTime),

    /// Time of day only. Resolves to today, or tomorrow when today's
    /// occurrence has already passed.
    TimeOfDay(NaiveTime),
}

/// One row as emitted by a schedule source backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCue {
    pub trigger: RawTrigger,
    pub command: CueCommand,
}

/// A resolved, runnable cue. Immutable once the runnable set is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueEntry {
    pub trigger_at: DateTime<Local>,
    pub command: CueCommand,
}

impl fmt::Display for CueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.trigger_at.format("%Y/%m/%d %H:%M:%S"),
            self.command
        )
    }
}
