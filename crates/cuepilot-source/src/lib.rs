//! `cuepilot-source` - schedule sources and the runnable cue set.
//!
//! # Overview
//!
//! A [`ScheduleSource`] backend reads one cue-sheet format and emits raw
//! rows; [`schedule::runnable_set`] then resolves time-of-day triggers
//! against "now", drops anything already past, and sorts what remains.
//! Malformed rows are skipped with a warning so one bad line never sinks
//! the whole sheet.
//!
//! # Backends
//!
//! | Backend    | Format                                        |
//! |------------|-----------------------------------------------|
//! | `table`    | CSV rows of `column,yyyy/mm/dd,hh:mm:ss`      |
//! | `keyvalue` | `hours: N` / `minutes: N` lines, single cue; optional `column:` or `layer:`/`clip:` target |
//! | `timelist` | newline `HH:MM` entries, optional column index |
//! | `calendar` | pre-fetched JSON event feed, `"name,command"` summaries |

pub mod calendar;
pub mod discover;
pub mod error;
pub mod keyvalue;
pub mod schedule;
pub mod table;
pub mod timelist;

use chrono::{DateTime, Local};
use tracing::info;

use cuepilot_core::{CueEntry, RawCue};

pub use discover::{resolve_source, SourceKind};
pub use error::{Result, SourceError};

/// One interchangeable cue-sheet backend.
pub trait ScheduleSource {
    /// Human-readable label for logs ("table cue sheet show.csv").
    fn describe(&self) -> String;

    /// Read and parse the source. Malformed rows are skipped (warned), so
    /// an `Err` here means the source itself was unreadable.
    fn load(&self) -> Result<Vec<RawCue>>;
}

/// Load a source and build the runnable set for this run.
pub fn load_runnable(
    source: &dyn ScheduleSource,
    now: DateTime<Local>,
) -> Result<Vec<CueEntry>> {
    let raws = source.load()?;
    info!(source = %source.describe(), rows = raws.len(), "schedule source loaded");
    Ok(schedule::runnable_set(raws, now))
}
