//! Trigger resolution and runnable-set validation.
//!
//! Pure functions over a caller-supplied "now" so the same sheet always
//! resolves the same way for a given load instant.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone};
use tracing::warn;

use cuepilot_core::{CueEntry, RawCue, RawTrigger};

/// Resolve a raw trigger to an absolute local instant.
///
/// Time-of-day triggers resolve against today's date and roll forward
/// exactly one day when today's occurrence is not in the future. Returns
/// `None` for a local time that does not exist (DST spring-forward gap);
/// the caller skips such rows rather than guessing.
pub fn resolve_trigger(trigger: &RawTrigger, now: DateTime<Local>) -> Option<DateTime<Local>> {
    match trigger {
        RawTrigger::Absolute(naive) => resolve_local(*naive),

        RawTrigger::TimeOfDay(tod) => {
            let today = now.date_naive();
            match resolve_local(today.and_time(*tod)) {
                Some(candidate) if candidate > now => Some(candidate),
                // Today's occurrence has passed (or fell in a DST gap):
                // advance to tomorrow.
                _ => resolve_local((today + Duration::days(1)).and_time(*tod)),
            }
        }
    }
}

fn resolve_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&naive).earliest()
}

/// Build the runnable set: resolve every row, drop past-due cues with a
/// warning, and sort ascending by trigger time. Entries are immutable from
/// here on - the engine never reorders or rewrites them.
pub fn runnable_set(raws: Vec<RawCue>, now: DateTime<Local>) -> Vec<CueEntry> {
    let mut entries: Vec<CueEntry> = Vec::with_capacity(raws.len());

    for raw in raws {
        let Some(trigger_at) = resolve_trigger(&raw.trigger, now) else {
            warn!(command = %raw.command, "skipping cue: trigger is not a valid local time");
            continue;
        };
        if trigger_at <= now {
            warn!(
                trigger = %trigger_at.format("%Y/%m/%d %H:%M:%S"),
                command = %raw.command,
                "skipping cue: trigger time already passed"
            );
            continue;
        }
        entries.push(CueEntry {
            trigger_at,
            command: raw.command,
        });
    }

    entries.sort_by_key(|entry| entry.trigger_at);
    entries
}
