//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them.

use crate::control::Decision;
use crate::error::Error;
use crate::sensors::Reading;

use super::service::LinkState;

/// Which policy produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    /// Threshold policy on a fresh reading.
    Sensor,
    /// Elapsed-time policy while the link is down.
    Fallback,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The loop has initialised the pump pin and is waiting for the link.
    Started { pump_pin: u8 },

    /// The link state machine moved.
    LinkChanged { from: LinkState, to: LinkState },

    /// A frame parsed cleanly.
    ReadingAccepted(Reading),

    /// A read produced no usable reading this cycle.
    ReadFailed(Error),

    /// A policy produced a decision (after the cooldown gate).
    Decided { source: DecisionSource, decision: Decision },

    /// A full actuation cycle finished.
    PumpCycleCompleted { hold_secs: u64 },

    /// First fallback watering request of an outage. `idle_secs` is `None`
    /// when the pump has never run.
    FallbackEngaged { idle_secs: Option<u64> },

    /// No frame accepted within the startup grace period.
    WatchdogExpired { elapsed_secs: u64 },
}
