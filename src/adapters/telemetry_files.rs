//! Last-known readings as plain files.
//!
//! After every accepted frame the three values are written to
//! `soil.info`, `water_tank.info` and `overflow.info` in the telemetry
//! directory, one decimal number per file, for external scrapers.

use core::fmt::Write;
use std::fs;
use std::path::PathBuf;

use log::{debug, warn};

use crate::app::ports::TelemetryPort;
use crate::sensors::Reading;

pub const SOIL_FILE: &str = "soil.info";
pub const WATER_TANK_FILE: &str = "water_tank.info";
pub const OVERFLOW_FILE: &str = "overflow.info";

pub struct TelemetryFiles {
    dir: PathBuf,
}

impl TelemetryFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn write_value(&self, name: &str, value: u32) {
        let mut text = heapless::String::<12>::new();
        let _ = write!(text, "{value}");
        let path = self.dir.join(name);
        if let Err(e) = fs::write(&path, text.as_bytes()) {
            warn!("Telemetry write {} failed: {}", path.display(), e);
        }
    }
}

impl TelemetryPort for TelemetryFiles {
    fn publish(&mut self, reading: &Reading) {
        debug!("Writing stats to info files in {}", self.dir.display());
        self.write_value(SOIL_FILE, reading.soil_moisture);
        self.write_value(WATER_TANK_FILE, reading.water_tank_level);
        self.write_value(OVERFLOW_FILE, u32::from(reading.overflow));
    }
}
