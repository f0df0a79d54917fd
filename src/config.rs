//! System configuration parameters
//!
//! All tunable parameters for the irrigation controller. Loaded once from
//! `settings.json` before the control loop starts and never mutated after.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Watering thresholds and timing consumed by the decision policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Moisture level the controller tries to reach.
    pub desired_humidity: u32,
    /// Moisture ceiling; at or above it the pump never runs.
    pub max_humidity: u32,
    /// Minimum tank reserve required before pumping.
    pub min_tank_level: u32,
    /// Hold phase length (seconds) for a full watering.
    pub normal_pump_seconds: u64,
    /// Hold phase length (seconds) for a top-up watering.
    pub minimal_pump_seconds: u64,
    /// Minimum interval between two activations.
    pub cooldown_seconds: u64,
    /// Idle time after which the fallback timer forces a watering.
    pub fallback_idle_seconds: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            desired_humidity: 40,
            max_humidity: 60,
            min_tank_level: 50,
            normal_pump_seconds: 6,
            minimal_pump_seconds: 2,
            cooldown_seconds: 1200,    // 20 min
            fallback_idle_seconds: 300, // 5 min
        }
    }
}

/// Zabbix trapper endpoint for activation metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZabbixConfig {
    pub server: String,
    #[serde(default = "default_zabbix_port")]
    pub port: u16,
    /// Host name as registered in Zabbix.
    pub host_name: String,
}

fn default_zabbix_port() -> u16 {
    10051
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Serial link ---
    /// Device path of the microcontroller's serial port.
    pub serial_port: String,
    pub serial_baud: u32,
    /// Read timeout; a read that times out with no bytes is an idle cycle.
    pub serial_timeout_secs: u64,
    /// Maximum bytes consumed per read.
    pub frame_chunk_len: usize,

    // --- Pump ---
    /// Kernel GPIO line number driving the pump relay.
    pub pump_pin: u8,

    // --- Policy ---
    pub thresholds: Thresholds,

    // --- Reporting ---
    /// Metric key sent with every activation report.
    pub metric_key: String,
    /// Zabbix sink; `None` logs metrics instead of sending them.
    pub zabbix: Option<ZabbixConfig>,
    /// Directory receiving `soil.info`, `water_tank.info`, `overflow.info`.
    pub telemetry_dir: String,

    // --- Timing ---
    /// Startup grace before warning that no frame has been accepted.
    pub watchdog_grace_secs: u64,
    /// Pause between iterations while the link is down.
    pub link_retry_secs: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            serial_port: "/dev/ttyUSB0".into(),
            serial_baud: 9600,
            serial_timeout_secs: 3,
            frame_chunk_len: 50,

            pump_pin: 17,

            thresholds: Thresholds::default(),

            metric_key: "pump.activation".into(),
            zabbix: None,
            telemetry_dir: "/tmp".into(),

            watchdog_grace_secs: 35,
            link_retry_secs: 3,
        }
    }
}

impl SystemConfig {
    /// Range-check every field the control loop depends on.
    ///
    /// Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if t.desired_humidity >= t.max_humidity {
            return Err(ConfigError::ValidationFailed(
                "desired_humidity must be below max_humidity",
            ));
        }
        if t.normal_pump_seconds == 0 || t.minimal_pump_seconds == 0 {
            return Err(ConfigError::ValidationFailed(
                "pump durations must be non-zero",
            ));
        }
        if t.minimal_pump_seconds > t.normal_pump_seconds {
            return Err(ConfigError::ValidationFailed(
                "minimal_pump_seconds must not exceed normal_pump_seconds",
            ));
        }
        if self.serial_port.is_empty() {
            return Err(ConfigError::ValidationFailed("serial_port is empty"));
        }
        if self.frame_chunk_len == 0 || self.frame_chunk_len > crate::sensors::MAX_CHUNK_LEN {
            return Err(ConfigError::ValidationFailed(
                "frame_chunk_len must be 1..=MAX_CHUNK_LEN",
            ));
        }
        if self.metric_key.is_empty() {
            return Err(ConfigError::ValidationFailed("metric_key is empty"));
        }
        Ok(())
    }
}
