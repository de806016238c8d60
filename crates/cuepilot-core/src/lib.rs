//! `cuepilot-core` - shared types, configuration, and the engine's time seam.
//!
//! Everything the other crates agree on lives here: the cue data model
//! ([`types::CueEntry`], [`types::CueCommand`]), the TOML + env configuration
//! layer ([`config::CuepilotConfig`]), and the [`clock::Clock`] trait that is
//! the only wall-clock source the engine trusts.

pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use config::CuepilotConfig;
pub use error::{CoreError, Result};
pub use types::{CueCommand, CueEntry, RawCue, RawTrigger};
