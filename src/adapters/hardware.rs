//! Hardware adapter: bridges the board's peripherals to domain port traits.
//!
//! Owns the serial link, the pump GPIO, and the telemetry writer and
//! exposes them through [`LinkPort`], [`GpioPort`] and [`TelemetryPort`],
//! so the control loop can take a single `hw` handle.

use crate::app::ports::{GpioPort, Level, LinkPort, TelemetryPort};
use crate::error::LinkError;
use crate::sensors::Reading;

pub struct HardwareAdapter<L, G, R> {
    link: L,
    gpio: G,
    telemetry: R,
}

impl<L, G, R> HardwareAdapter<L, G, R> {
    pub fn new(link: L, gpio: G, telemetry: R) -> Self {
        Self {
            link,
            gpio,
            telemetry,
        }
    }
}

// ── LinkPort implementation ───────────────────────────────────

impl<L: LinkPort, G, R> LinkPort for HardwareAdapter<L, G, R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        self.link.read(buf)
    }
}

// ── GpioPort implementation ───────────────────────────────────

impl<L, G: GpioPort, R> GpioPort for HardwareAdapter<L, G, R> {
    fn set_mode(&mut self, pin: u8) {
        self.gpio.set_mode(pin);
    }

    fn set_pin(&mut self, pin: u8, level: Level) {
        self.gpio.set_pin(pin, level);
    }
}

// ── TelemetryPort implementation ──────────────────────────────

impl<L, G, R: TelemetryPort> TelemetryPort for HardwareAdapter<L, G, R> {
    fn publish(&mut self, reading: &Reading) {
        self.telemetry.publish(reading);
    }
}
