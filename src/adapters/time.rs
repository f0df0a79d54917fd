//! System clock adapter.
//!
//! Monotonic seconds since construction via `std::time::Instant`, and a
//! blocking sleep for the actuation hold phases.

use std::time::{Duration, Instant};

use crate::app::ports::TimePort;

pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl TimePort for SystemClock {
    fn now_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }

    fn sleep_secs(&mut self, secs: u64) {
        std::thread::sleep(Duration::from_secs(secs));
    }
}
