//! Startup link watchdog.
//!
//! Warns once if the controller has been up for longer than the grace
//! period without accepting a single frame. Purely observational: the
//! control loop behaves the same whether or not it has fired.

use log::warn;

pub struct Watchdog {
    grace_secs: u64,
    started_at: u64,
    fired: bool,
}

impl Watchdog {
    pub fn new(started_at: u64, grace_secs: u64) -> Self {
        Self {
            grace_secs,
            started_at,
            fired: false,
        }
    }

    /// Check the watchdog. Returns the elapsed seconds the first time the
    /// grace period is exceeded with no successful read, `None` otherwise.
    pub fn check(&mut self, now: u64, has_read: bool) -> Option<u64> {
        if self.fired || has_read {
            return None;
        }
        let elapsed = now.saturating_sub(self.started_at);
        if elapsed <= self.grace_secs {
            return None;
        }
        self.fired = true;
        warn!(
            "No successful serial read for {}s since startup (grace {}s)",
            elapsed, self.grace_secs
        );
        Some(elapsed)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
