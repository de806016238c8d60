//! Sequential run orchestration.

use tokio::sync::watch;
use tracing::info;

use cuepilot_core::{Clock, CueEntry};

use crate::dispatch::Dispatcher;
use crate::failure::FailureSink;
use crate::wait::{self, WaitOutcome};

/// What happened over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub dispatched: usize,
    pub failed: usize,
    pub interrupted: bool,
}

/// Drives the runnable list strictly in order: wait, dispatch, move on.
///
/// A cue's outcome never stops the schedule; an exhausted dispatch is
/// recorded and the next cue proceeds. Because execution is sequential, a
/// later cue can start late when an earlier one overruns its nominal time -
/// an accepted approximation of the one-second precision contract.
pub struct Orchestrator {
    dispatcher: Dispatcher,
    sink: FailureSink,
    clock: Box<dyn Clock>,
}

impl Orchestrator {
    pub fn new(dispatcher: Dispatcher, sink: FailureSink, clock: Box<dyn Clock>) -> Self {
        Self {
            dispatcher,
            sink,
            clock,
        }
    }

    /// Run the schedule to completion (or interruption). Emits exactly one
    /// closing notice: completion, interruption, or nothing-to-run.
    pub async fn run(
        &self,
        entries: &[CueEntry],
        mut shutdown: watch::Receiver<bool>,
    ) -> RunSummary {
        let mut summary = RunSummary::default();

        if entries.is_empty() {
            info!("nothing to run: no cue survived loading");
            println!("Nothing to run.");
            return summary;
        }

        info!(count = entries.len(), "run started");
        for entry in entries {
            // A shutdown between cues is observed here; during a wait it is
            // observed at the sleep.
            if *shutdown.borrow() {
                summary.interrupted = true;
                break;
            }

            match wait::wait_until(self.clock.as_ref(), entry, &mut shutdown).await {
                WaitOutcome::Interrupted => {
                    summary.interrupted = true;
                    break;
                }
                WaitOutcome::Due => {}
            }

            match self.dispatcher.dispatch(&entry.command).await {
                Ok(()) => {
                    summary.dispatched += 1;
                    println!("Sent: {}", entry.command);
                }
                Err(e) => {
                    summary.failed += 1;
                    self.sink
                        .record(self.clock.now(), &format!("{}: {e}", entry.command));
                }
            }
        }

        if summary.interrupted {
            info!(
                dispatched = summary.dispatched,
                failed = summary.failed,
                "run interrupted"
            );
            println!("Run interrupted before the schedule finished.");
        } else {
            info!(
                dispatched = summary.dispatched,
                failed = summary.failed,
                "run complete"
            );
            println!("All cues have finished.");
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::OscSender;
    use crate::retry::RetryPolicy;
    use chrono::Duration as ChronoDuration;
    use cuepilot_core::{CueCommand, SystemClock};
    use tokio::net::UdpSocket;

    fn due_entry(column: u32) -> CueEntry {
        // Already past: the wait loop yields Due on its first check.
        CueEntry {
            trigger_at: chrono::Local::now() - ChronoDuration::seconds(1),
            command: CueCommand::ConnectColumn { column },
        }
    }

    fn orchestrator(sender: OscSender, log_name: &str) -> (Orchestrator, std::path::PathBuf) {
        let log = std::env::temp_dir().join(log_name);
        std::fs::remove_file(&log).ok();
        let orchestrator = Orchestrator::new(
            Dispatcher::new(sender, RetryPolicy::default()),
            FailureSink::new(&log),
            Box::new(SystemClock),
        );
        (orchestrator, log)
    }

    #[tokio::test]
    async fn dispatches_entries_in_order() {
        let listener = UdpSocket::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let sender = OscSender::bind(addr).await.unwrap();
        let (orchestrator, log) = orchestrator(sender, "cuepilot-run-order.txt");

        let entries = vec![due_entry(1), due_entry(2)];
        let (_tx, rx) = watch::channel(false);
        let summary = orchestrator.run(&entries, rx).await;

        assert_eq!(summary.dispatched, 2);
        assert_eq!(summary.failed, 0);
        assert!(!summary.interrupted);

        let mut buf = [0u8; 128];
        let (len, _) = listener.recv_from(&mut buf).await.unwrap();
        assert!(buf[..len].starts_with(b"/composition/columns/1/connect"));
        let (len, _) = listener.recv_from(&mut buf).await.unwrap();
        assert!(buf[..len].starts_with(b"/composition/columns/2/connect"));
        std::fs::remove_file(&log).ok();
    }

    #[tokio::test(start_paused = true)]
    async fn failed_cue_is_recorded_and_run_continues() {
        // Port 0 makes every send fail locally, exhausting the retry budget.
        let sender = OscSender::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let (orchestrator, log) = orchestrator(sender, "cuepilot-run-failures.txt");

        let entries = vec![due_entry(1), due_entry(2)];
        let (_tx, rx) = watch::channel(false);
        let summary = orchestrator.run(&entries, rx).await;

        assert_eq!(summary.dispatched, 0);
        assert_eq!(summary.failed, 2);
        assert!(!summary.interrupted);

        let contents = std::fs::read_to_string(&log).unwrap();
        assert_eq!(contents.lines().count(), 2);
        std::fs::remove_file(&log).ok();
    }

    #[tokio::test]
    async fn empty_schedule_reports_nothing_to_run() {
        let listener = UdpSocket::bind(("127.0.0.1", 0)).await.unwrap();
        let sender = OscSender::bind(listener.local_addr().unwrap()).await.unwrap();
        let (orchestrator, log) = orchestrator(sender, "cuepilot-run-empty.txt");

        let (_tx, rx) = watch::channel(false);
        let summary = orchestrator.run(&[], rx).await;

        assert_eq!(summary, RunSummary::default());
        std::fs::remove_file(&log).ok();
    }

    #[tokio::test]
    async fn pre_signalled_shutdown_dispatches_nothing() {
        let listener = UdpSocket::bind(("127.0.0.1", 0)).await.unwrap();
        let sender = OscSender::bind(listener.local_addr().unwrap()).await.unwrap();
        let (orchestrator, log) = orchestrator(sender, "cuepilot-run-shutdown.txt");

        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        let summary = orchestrator.run(&[due_entry(1)], rx).await;

        assert!(summary.interrupted);
        assert_eq!(summary.dispatched, 0);
        std::fs::remove_file(&log).ok();
    }
}
