//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (serial link, GPIO, clock, metrics, telemetry files,
//! settings) implement these traits. The
//! [`ControlLoop`](super::service::ControlLoop) consumes them via generics,
//! so the domain core never touches hardware, processes, or files directly.

use crate::config::SystemConfig;
use crate::error::LinkError;
use crate::sensors::Reading;

// ───────────────────────────────────────────────────────────────
// Serial link port (driven adapter: microcontroller → domain)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented link to the sensor board.
pub trait LinkPort {
    /// Read up to `buf.len()` bytes.
    ///
    /// `Ok(0)` means the read timed out with nothing to deliver; the link is
    /// still considered healthy. `Err` means the transport is closed.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError>;
}

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain → pump relay)
// ───────────────────────────────────────────────────────────────

/// Logic level on an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

/// Minimal pin-driving capability.
///
/// Fail-silent by contract: implementations log hardware faults and carry
/// on, the control loop never sees them.
pub trait GpioPort {
    /// Configure `pin` as an output.
    fn set_mode(&mut self, pin: u8);

    /// Drive `pin` to `level`.
    fn set_pin(&mut self, pin: u8, level: Level);
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: clock + blocking sleep)
// ───────────────────────────────────────────────────────────────

/// Monotonic clock and sleep, injected so tests can run actuation cycles
/// without real delays.
pub trait TimePort {
    /// Seconds since the controller started (monotonic).
    fn now_secs(&self) -> u64;

    /// Block the caller for `secs` seconds.
    fn sleep_secs(&mut self, secs: u64);
}

// ───────────────────────────────────────────────────────────────
// Metrics port (driven adapter: domain → monitoring)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget metric delivery. `1` = pump ran, `0` = suppressed.
pub trait MetricsPort {
    fn send(&mut self, metric_key: &str, value: i64);
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: domain → last-known values)
// ───────────────────────────────────────────────────────────────

/// Publishes the latest accepted reading for external consumers.
pub trait TelemetryPort {
    fn publish(&mut self, reading: &Reading);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: settings store → domain)
// ───────────────────────────────────────────────────────────────

/// Loads system configuration once at startup.
///
/// Implementations MUST run [`SystemConfig::validate`] before returning.
pub trait ConfigPort {
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No settings found (first run).
    NotFound,
    /// Stored settings failed to deserialize.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the settings backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
