//! Metrics adapters.
//!
//! [`ZabbixSender`] shells out to the `zabbix_sender` utility once per
//! metric. Delivery is fire-and-forget: a failed send is logged and
//! counted, never retried. [`LogMetrics`] stands in when no Zabbix server
//! is configured.

use std::process::Command;

use log::{debug, info, warn};

use crate::app::ports::MetricsPort;
use crate::config::ZabbixConfig;

const SENDER_BINARY: &str = "zabbix_sender";

pub struct ZabbixSender {
    config: ZabbixConfig,
    binary: String,
    sent: u64,
    failed: u64,
}

impl ZabbixSender {
    pub fn new(config: ZabbixConfig) -> Self {
        Self::with_binary(config, SENDER_BINARY)
    }

    /// Use a different executable (tests, non-standard installs).
    pub fn with_binary(config: ZabbixConfig, binary: impl Into<String>) -> Self {
        Self {
            config,
            binary: binary.into(),
            sent: 0,
            failed: 0,
        }
    }

    fn command(&self, metric_key: &str, value: i64) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-z")
            .arg(&self.config.server)
            .arg("-p")
            .arg(self.config.port.to_string())
            .arg("-s")
            .arg(&self.config.host_name)
            .arg("-k")
            .arg(metric_key)
            .arg("-o")
            .arg(value.to_string());
        cmd
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }
}

impl MetricsPort for ZabbixSender {
    fn send(&mut self, metric_key: &str, value: i64) {
        let mut cmd = self.command(metric_key, value);
        debug!("Sending: {:?}", cmd);
        match cmd.output() {
            Ok(out) if out.status.success() => self.sent += 1,
            Ok(out) => {
                self.failed += 1;
                warn!(
                    "{} exited with {}: {}",
                    self.binary,
                    out.status,
                    String::from_utf8_lossy(&out.stderr).trim()
                );
            }
            Err(e) => {
                self.failed += 1;
                warn!("{} could not be started: {}", self.binary, e);
            }
        }
    }
}

/// Metrics sink that only logs.
#[derive(Default)]
pub struct LogMetrics {
    pub last: Option<(String, i64)>,
}

impl MetricsPort for LogMetrics {
    fn send(&mut self, metric_key: &str, value: i64) {
        info!("METRIC | {}={}", metric_key, value);
        self.last = Some((metric_key.to_owned(), value));
    }
}
