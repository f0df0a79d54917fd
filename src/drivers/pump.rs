//! Pump relay actuation cycle.
//!
//! One activation walks a fixed sequence of phases:
//!
//! ```text
//! Assert ──▶ Hold1 ──▶ Hold2 ──▶ Deassert ──▶ Settle ──▶ Done
//!  HIGH     sleep d   sleep d      LOW        sleep 3s
//!  metric=1
//! ```
//!
//! The two hold phases are part of the relay contract, not a retry. The
//! cycle is synchronous and runs to completion; there is no cancellation.
//!
//! ## Safety contract
//!
//! The pump must never run on overflow or a low tank. Enforced by the
//! watering policy; this driver is a dumb actuator.

use log::debug;

use crate::app::ports::{GpioPort, Level, MetricsPort, TimePort};

/// Fixed pause after deasserting, before control returns to the loop.
pub const SETTLE_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Assert,
    Hold1,
    Hold2,
    Deassert,
    Settle,
    Done,
}

impl Phase {
    pub fn next(self) -> Self {
        match self {
            Self::Assert => Self::Hold1,
            Self::Hold1 => Self::Hold2,
            Self::Hold2 => Self::Deassert,
            Self::Deassert => Self::Settle,
            Self::Settle | Self::Done => Self::Done,
        }
    }
}

/// Drives the pump pin through complete actuation cycles.
pub struct PumpActuator {
    pin: u8,
    metric_key: String,
    cycles: u64,
}

impl PumpActuator {
    pub fn new(pin: u8, metric_key: impl Into<String>) -> Self {
        Self {
            pin,
            metric_key: metric_key.into(),
            cycles: 0,
        }
    }

    /// Configure the pin as an output and make sure the pump is off.
    pub fn init(&self, gpio: &mut impl GpioPort) {
        gpio.set_mode(self.pin);
        gpio.set_pin(self.pin, Level::Low);
    }

    /// Run one full cycle holding the pin high for `2 * duration_secs`.
    ///
    /// Blocks for `2 * duration_secs + SETTLE_SECS` on the injected clock.
    pub fn activate(
        &mut self,
        gpio: &mut impl GpioPort,
        clock: &mut impl TimePort,
        metrics: &mut impl MetricsPort,
        duration_secs: u64,
    ) {
        let mut phase = Phase::Assert;
        while phase != Phase::Done {
            self.run_phase(phase, gpio, clock, metrics, duration_secs);
            phase = phase.next();
        }
        self.cycles += 1;
        debug!("Pump complete ({} cycles total)", self.cycles);
    }

    fn run_phase(
        &self,
        phase: Phase,
        gpio: &mut impl GpioPort,
        clock: &mut impl TimePort,
        metrics: &mut impl MetricsPort,
        duration_secs: u64,
    ) {
        match phase {
            Phase::Assert => {
                metrics.send(&self.metric_key, 1);
                debug!("Setting pump pin {} HIGH", self.pin);
                gpio.set_pin(self.pin, Level::High);
            }
            Phase::Hold1 | Phase::Hold2 => clock.sleep_secs(duration_secs),
            Phase::Deassert => gpio.set_pin(self.pin, Level::Low),
            Phase::Settle => clock.sleep_secs(SETTLE_SECS),
            Phase::Done => {}
        }
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Completed activation cycles since startup.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
