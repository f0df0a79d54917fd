//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter           | Implements        | Connects to                 |
//! |-------------------|-------------------|-----------------------------|
//! | `hardware`        | LinkPort          | composite of the three below|
//! |                   | GpioPort          |                             |
//! |                   | TelemetryPort     |                             |
//! | `serial`          | LinkPort          | sensor board UART           |
//! | `telemetry_files` | TelemetryPort     | `*.info` files              |
//! | `zabbix`          | MetricsPort       | `zabbix_sender` / log       |
//! | `settings_file`   | ConfigPort        | `settings.json`             |
//! | `log_sink`        | EventSink         | `log` facade                |
//! | `time`            | TimePort          | `std::time::Instant`        |
//!
//! The GPIO side lives in [`crate::drivers::gpio`].

pub mod hardware;
pub mod log_sink;
#[cfg(feature = "serial")]
pub mod serial;
pub mod settings_file;
pub mod telemetry_files;
pub mod time;
pub mod zabbix;
