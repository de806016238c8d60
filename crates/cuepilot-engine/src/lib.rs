//! `cuepilot-engine` - the wait/dispatch engine.
//!
//! # Overview
//!
//! The [`run::Orchestrator`] drives a pre-sorted cue list strictly in
//! sequence: [`wait::wait_until`] blocks in one-second quanta until a cue
//! is due (the only suspension and cancellation point), then
//! [`dispatch::Dispatcher`] sends the cue's OSC command with bounded retry.
//! Exhausted retries land in the [`failure::FailureSink`] and the run moves
//! on - the schedule keeps progressing no matter what a single cue does.
//!
//! The transport is connectionless UDP: a "successful" dispatch means the
//! local send call did not fail. There is no delivery acknowledgment.

pub mod dispatch;
pub mod error;
pub mod failure;
pub mod retry;
pub mod run;
pub mod wait;

pub use dispatch::{Dispatcher, OscSender};
pub use error::{EngineError, Result};
pub use failure::FailureSink;
pub use retry::RetryPolicy;
pub use run::{Orchestrator, RunSummary};
