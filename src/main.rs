//! Tomato Irrigator main entry point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter            LogEventSink    JsonSettingsFile   │
//! │  (SerialLink + SysfsPin     (EventSink)     (ConfigPort)       │
//! │   + TelemetryFiles)         SystemClock     ZabbixSender       │
//! │                             (TimePort)      (MetricsPort)      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              ControlLoop (pure logic)                  │    │
//! │  │  parse · policy · cooldown gate · fallback · pump      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use irrigator::adapters::hardware::HardwareAdapter;
use irrigator::adapters::log_sink::LogEventSink;
use irrigator::adapters::serial::SerialLink;
use irrigator::adapters::settings_file::{DEFAULT_SETTINGS_PATH, JsonSettingsFile};
use irrigator::adapters::telemetry_files::TelemetryFiles;
use irrigator::adapters::time::SystemClock;
use irrigator::adapters::zabbix::{LogMetrics, ZabbixSender};
use irrigator::app::ports::{ConfigError, ConfigPort, MetricsPort};
use irrigator::app::service::ControlLoop;
use irrigator::config::SystemConfig;
use irrigator::drivers::gpio::{OutputPinGpio, SYSFS_GPIO_ROOT, SysfsPin};

#[derive(Parser, Debug)]
#[command(name = "irrigator", version, about = "Soil irrigation controller")]
struct Args {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(long, short)]
    debug: bool,

    /// Path to the JSON settings file
    #[arg(long, env = "IRRIGATOR_SETTINGS", default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,
}

// ── Metrics sink selection ────────────────────────────────────

enum Metrics {
    Zabbix(ZabbixSender),
    Log(LogMetrics),
}

impl MetricsPort for Metrics {
    fn send(&mut self, metric_key: &str, value: i64) {
        match self {
            Self::Zabbix(sender) => sender.send(metric_key, value),
            Self::Log(sink) => sink.send(metric_key, value),
        }
    }
}

fn load_config(args: &Args) -> Result<SystemConfig> {
    match JsonSettingsFile::new(&args.settings).load() {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound) => {
            warn!("{} not found, using built-in defaults", args.settings.display());
            Ok(SystemConfig::default())
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!("loading {}", args.settings.display()))),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_target(false)
        .init();

    info!("Tomato irrigator v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;

    // ── Adapters ──────────────────────────────────────────────
    let pin = SysfsPin::open(SYSFS_GPIO_ROOT, config.pump_pin)
        .with_context(|| format!("exporting GPIO {}", config.pump_pin))?;
    let mut hw = HardwareAdapter::new(
        SerialLink::from_config(&config),
        OutputPinGpio::new(config.pump_pin, pin),
        TelemetryFiles::new(&config.telemetry_dir),
    );
    let mut clock = SystemClock::new();
    let mut metrics = match config.zabbix.clone() {
        Some(zabbix) => {
            info!("Reporting to Zabbix at {}:{}", zabbix.server, zabbix.port);
            Metrics::Zabbix(ZabbixSender::new(zabbix))
        }
        None => Metrics::Log(LogMetrics::default()),
    };
    let mut sink = LogEventSink::new();

    // ── Control loop ──────────────────────────────────────────
    let mut control = ControlLoop::new(config);
    control.start(&mut hw, &clock, &mut sink);
    control.run(&mut hw, &mut clock, &mut metrics, &mut sink)
}
