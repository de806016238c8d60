//! `cuepilot-protocol` - OSC 1.0 messages for a Resolume-style receiver.
//!
//! # Overview
//!
//! The receiver speaks plain OSC over UDP: an address path, a type tag
//! string, and a small argument list, all 4-byte aligned. Cuepilot only ever
//! *emits* messages - the protocol is connectionless and unacknowledged, so
//! there is nothing to decode and no delivery confirmation to wait for.
//!
//! [`message`] holds the wire model and binary encoder; [`address`] holds
//! the well-known composition paths and argument constants.

pub mod address;
pub mod message;

pub use message::{OscArg, OscMessage};
