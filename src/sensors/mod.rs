//! Sensor telemetry arriving over the serial link.
//!
//! The microcontroller samples soil moisture, tank level, and the overflow
//! float switch, and prints one line per sample. [`frame`] turns a raw
//! chunk of those bytes into a validated [`Reading`].

pub mod frame;

pub use frame::{Reading, parse};

/// Upper bound on bytes consumed per serial read.
pub const MAX_CHUNK_LEN: usize = 256;
