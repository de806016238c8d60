//! Countdown wait loop.
//!
//! Two states: waiting and due. While waiting, the loop sleeps in
//! one-second quanta and repaints a single status line (carriage return,
//! no newline). The sleep is the engine's only suspension point, and an
//! external shutdown observed there ends the wait immediately.

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::watch;

use cuepilot_core::config::TICK_SECS;
use cuepilot_core::{Clock, CueEntry};

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The trigger time has arrived (observed within one quantum of it).
    Due,
    /// Shutdown was requested; the cue was not dispatched.
    Interrupted,
}

/// Block until `entry` is due or shutdown fires.
///
/// The countdown line is purely observational: it never delays the due
/// check, which happens against the clock at the top of every quantum.
pub async fn wait_until(
    clock: &dyn Clock,
    entry: &CueEntry,
    shutdown: &mut watch::Receiver<bool>,
) -> WaitOutcome {
    let mut painted = false;
    loop {
        let now = clock.now();
        if now >= entry.trigger_at {
            if painted {
                println!();
            }
            return WaitOutcome::Due;
        }

        print!("\r{}", format_countdown(now, entry));
        let _ = std::io::stdout().flush();
        painted = true;

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(TICK_SECS)) => {}
            changed = shutdown.changed() => {
                match changed {
                    Ok(()) if *shutdown.borrow() => {
                        println!();
                        return WaitOutcome::Interrupted;
                    }
                    Ok(()) => {}
                    // Sender gone: shutdown can never fire again, so fall
                    // back to a plain quantum sleep.
                    Err(_) => tokio::time::sleep(Duration::from_secs(TICK_SECS)).await,
                }
            }
        }
    }
}

/// One status line: current time, target time, and the remaining span
/// broken into days/hours/minutes/seconds. Days appear only when non-zero.
pub fn format_countdown(now: DateTime<Local>, entry: &CueEntry) -> String {
    let remaining = (entry.trigger_at - now).num_seconds().max(0);
    let (days, hours, minutes, seconds) = decompose(remaining);

    let remaining_text = if days > 0 {
        format!("{}d {:02}h {:02}m {:02}s", days, hours, minutes, seconds)
    } else {
        format!("{:02}h {:02}m {:02}s", hours, minutes, seconds)
    };

    format!(
        "Now {} | cue {} at {} | remaining {}",
        now.format("%Y/%m/%d %H:%M:%S"),
        entry.command,
        entry.trigger_at.format("%Y/%m/%d %H:%M:%S"),
        remaining_text
    )
}

fn decompose(total_secs: i64) -> (i64, i64, i64, i64) {
    let days = total_secs / 86_400;
    let rest = total_secs % 86_400;
    (days, rest / 3_600, (rest % 3_600) / 60, rest % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use cuepilot_core::CueCommand;
    use std::sync::Mutex;

    fn local(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 22, h, m, s).unwrap()
    }

    fn entry_at(trigger_at: DateTime<Local>) -> CueEntry {
        CueEntry {
            trigger_at,
            command: CueCommand::ConnectColumn { column: 1 },
        }
    }

    /// Advances one second per `now()` call, mirroring the real loop's
    /// one-call-per-quantum cadence.
    struct SteppingClock(Mutex<DateTime<Local>>);

    impl SteppingClock {
        fn new(start: DateTime<Local>) -> Self {
            Self(Mutex::new(start))
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Local> {
            let mut guard = self.0.lock().unwrap();
            let current = *guard;
            *guard = current + ChronoDuration::seconds(1);
            current
        }
    }

    /// Never advances: the wait would spin forever without a shutdown.
    struct FrozenClock(DateTime<Local>);

    impl Clock for FrozenClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    #[test]
    fn decompose_splits_days_hours_minutes_seconds() {
        assert_eq!(decompose(0), (0, 0, 0, 0));
        assert_eq!(decompose(59), (0, 0, 0, 59));
        assert_eq!(decompose(3_661), (0, 1, 1, 1));
        assert_eq!(decompose(90_000), (1, 1, 0, 0));
    }

    #[test]
    fn countdown_hides_days_when_zero() {
        let now = local(16, 44, 10);
        let line = format_countdown(now, &entry_at(local(16, 45, 0)));
        assert!(line.contains("remaining 00h 00m 50s"));
        assert!(!line.contains("d "));
    }

    #[test]
    fn countdown_shows_days_when_nonzero() {
        let now = local(16, 45, 0);
        let trigger = now + ChronoDuration::days(2) + ChronoDuration::seconds(5);
        let line = format_countdown(now, &entry_at(trigger));
        assert!(line.contains("remaining 2d 00h 00m 05s"));
    }

    #[tokio::test(start_paused = true)]
    async fn due_immediately_when_trigger_passed() {
        let start = local(12, 0, 0);
        let clock = FrozenClock(start);
        let (_tx, mut rx) = watch::channel(false);

        let outcome = wait_until(&clock, &entry_at(start), &mut rx).await;
        assert_eq!(outcome, WaitOutcome::Due);
    }

    #[tokio::test(start_paused = true)]
    async fn reaches_due_within_one_quantum_of_trigger() {
        let start = local(12, 0, 0);
        let clock = SteppingClock::new(start);
        let trigger = start + ChronoDuration::seconds(3);
        let (_tx, mut rx) = watch::channel(false);

        let outcome = wait_until(&clock, &entry_at(trigger), &mut rx).await;
        assert_eq!(outcome, WaitOutcome::Due);
        // The clock stepped once per quantum: due was observed on the first
        // check at or past the trigger, never later.
        assert!(*clock.0.lock().unwrap() <= trigger + ChronoDuration::seconds(1));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_interrupts_the_sleep() {
        let start = local(12, 0, 0);
        let clock = FrozenClock(start);
        let trigger = start + ChronoDuration::hours(1);
        let (tx, mut rx) = watch::channel(false);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            let _ = tx.send(true);
        });

        let outcome = wait_until(&clock, &entry_at(trigger), &mut rx).await;
        assert_eq!(outcome, WaitOutcome::Interrupted);
    }
}
