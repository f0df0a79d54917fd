//! Pump activation bookkeeping and the cooldown gate.
//!
//! [`PumpState`] holds the single piece of shared mutable state in the
//! controller: when the pump last ran. The normal policy and the fallback
//! timer both go through [`CooldownGate::try_activate`], whose
//! check-and-set runs inside one critical section, so two decision paths on
//! separate threads can never both win the same cooldown window.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Timestamp (seconds, controller clock) of the last real activation.
///
/// Starts as "never activated" and is never reset for the life of the
/// process.
pub struct PumpState {
    last_activation: Mutex<CriticalSectionRawMutex, Cell<Option<u64>>>,
}

impl Default for PumpState {
    fn default() -> Self {
        Self::new()
    }
}

impl PumpState {
    pub const fn new() -> Self {
        Self {
            last_activation: Mutex::new(Cell::new(None)),
        }
    }

    /// Seed a known prior activation (tests and simulations).
    pub const fn activated_at(secs: u64) -> Self {
        Self {
            last_activation: Mutex::new(Cell::new(Some(secs))),
        }
    }

    pub fn last_activation(&self) -> Option<u64> {
        self.last_activation.lock(Cell::get)
    }

    /// Seconds since the last activation, `None` if the pump never ran.
    pub fn idle_secs(&self, now: u64) -> Option<u64> {
        self.last_activation().map(|last| now.saturating_sub(last))
    }
}

/// Enforces the minimum interval between two pump activations.
#[derive(Default)]
pub struct CooldownGate {
    state: PumpState,
}

impl CooldownGate {
    pub fn new(state: PumpState) -> Self {
        Self { state }
    }

    /// Claim an activation slot at `now`.
    ///
    /// Returns `false` when the previous activation is less than
    /// `cooldown_seconds` old. Otherwise records `now` and returns `true`.
    pub fn try_activate(&self, now: u64, cooldown_seconds: u64) -> bool {
        self.state.last_activation.lock(|cell| match cell.get() {
            Some(last) if now.saturating_sub(last) < cooldown_seconds => false,
            _ => {
                cell.set(Some(now));
                true
            }
        })
    }

    /// Read-only view for the fallback timer and diagnostics.
    pub fn state(&self) -> &PumpState {
        &self.state
    }
}
