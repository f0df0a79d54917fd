//! Serial link adapter.
//!
//! Implements [`LinkPort`] over a `serialport` handle. The port is opened
//! lazily and reopened on the next read after any failure, so a board that
//! is unplugged and replugged comes back without restarting the process.
//!
//! | Read outcome              | Reported as              |
//! |---------------------------|--------------------------|
//! | bytes                     | `Ok(n)`                  |
//! | timeout / no data         | `Ok(0)` (link healthy)   |
//! | open failure              | `Err(OpenFailed)`        |
//! | any other I/O error       | `Err(Closed)`, handle dropped |

use std::io::{self, Read};
use std::time::Duration;

use log::{info, warn};
use serialport::SerialPort;

use crate::app::ports::LinkPort;
use crate::config::SystemConfig;
use crate::error::LinkError;

pub struct SerialLink {
    path: String,
    baud: u32,
    timeout: Duration,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialLink {
    pub fn new(path: impl Into<String>, baud: u32, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            baud,
            timeout,
            port: None,
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(
            config.serial_port.clone(),
            config.serial_baud,
            Duration::from_secs(config.serial_timeout_secs),
        )
    }

    fn open(&self) -> Result<Box<dyn SerialPort>, LinkError> {
        let port = serialport::new(&self.path, self.baud)
            .timeout(self.timeout)
            .open()
            .map_err(|e| LinkError::OpenFailed(format!("{}: {}", self.path, e)))?;
        info!("Serial port {} open at {} baud", self.path, self.baud);
        Ok(port)
    }
}

impl LinkPort for SerialLink {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        if self.port.is_none() {
            self.port = Some(self.open()?);
        }
        let port = self
            .port
            .as_mut()
            .ok_or_else(|| LinkError::Closed("port not open".into()))?;

        match port.read(buf) {
            Ok(n) => Ok(n),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(0)
            }
            Err(e) => {
                warn!("Serial port {} read failed: {}", self.path, e);
                self.port = None;
                Err(LinkError::Closed(e.to_string()))
            }
        }
    }
}
