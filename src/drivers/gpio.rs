//! GPIO output lines.
//!
//! [`SysfsPin`] drives a kernel GPIO line through `/sys/class/gpio` and
//! implements the `embedded-hal` [`OutputPin`] trait. [`OutputPinGpio`]
//! adapts any `OutputPin` to the domain's [`GpioPort`], swallowing and
//! logging pin errors so the control loop never sees them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};
use log::{debug, info, warn};

use crate::app::ports::{GpioPort, Level};

pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

// ── Sysfs error ───────────────────────────────────────────────

#[derive(Debug)]
pub struct SysfsError(pub io::Error);

impl core::fmt::Display for SysfsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "sysfs gpio: {}", self.0)
    }
}

impl digital::Error for SysfsError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

// ── SysfsPin ──────────────────────────────────────────────────

/// One exported GPIO line configured as an output.
pub struct SysfsPin {
    value_path: PathBuf,
}

impl SysfsPin {
    /// Export `line` under `root` (if not yet exported) and set it as output.
    pub fn open(root: impl AsRef<Path>, line: u8) -> io::Result<Self> {
        let root = root.as_ref();
        let line_dir = root.join(format!("gpio{line}"));
        if !line_dir.exists() {
            fs::write(root.join("export"), line.to_string())?;
        }
        // "low" sets direction and initial level in one write.
        fs::write(line_dir.join("direction"), "low")?;
        info!("GPIO line {} exported as output", line);
        Ok(Self {
            value_path: line_dir.join("value"),
        })
    }

    fn write_value(&self, high: bool) -> Result<(), SysfsError> {
        fs::write(&self.value_path, if high { "1" } else { "0" }).map_err(SysfsError)
    }
}

impl ErrorType for SysfsPin {
    type Error = SysfsError;
}

impl OutputPin for SysfsPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write_value(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write_value(true)
    }
}

// ── OutputPinGpio ─────────────────────────────────────────────

/// Single-line [`GpioPort`] backed by an `embedded-hal` output pin.
pub struct OutputPinGpio<P> {
    line: u8,
    pin: P,
}

impl<P: OutputPin> OutputPinGpio<P> {
    pub fn new(line: u8, pin: P) -> Self {
        Self { line, pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> GpioPort for OutputPinGpio<P> {
    fn set_mode(&mut self, pin: u8) {
        // The pin type is output by construction; nothing to reconfigure.
        debug!("GPIO {} mode: output", pin);
    }

    fn set_pin(&mut self, pin: u8, level: Level) {
        if pin != self.line {
            warn!("GPIO {} not managed (owned line is {}), ignoring", pin, self.line);
            return;
        }
        let result = match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        };
        if let Err(e) = result {
            warn!("GPIO {} write {:?} failed: {:?}", pin, level, e);
        }
    }
}
