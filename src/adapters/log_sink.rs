//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade. The binary routes those records through its tracing
//! subscriber.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::error::Error;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { pump_pin } => {
                info!("START | pump_pin={}", pump_pin);
            }
            AppEvent::LinkChanged { from, to } => {
                info!("LINK | {:?} -> {:?}", from, to);
            }
            AppEvent::ReadingAccepted(r) => {
                info!(
                    "READ | soil={} tank={} overflow={}",
                    r.soil_moisture,
                    r.water_tank_level,
                    if r.overflow { "YES" } else { "no" },
                );
            }
            // Link errors repeat every retry during an outage; the loop
            // already warns on the transition.
            AppEvent::ReadFailed(e @ Error::Link(_)) => {
                debug!("READ | failed: {}", e);
            }
            AppEvent::ReadFailed(e) => {
                info!("READ | failed: {}", e);
            }
            AppEvent::Decided { source, decision } if decision.requires_watering() => {
                info!("DECIDE | {:?} -> {:?}", source, decision);
            }
            AppEvent::Decided { source, decision } => {
                debug!("DECIDE | {:?} -> {:?}", source, decision);
            }
            AppEvent::FallbackEngaged { idle_secs } => {
                info!("FALLBACK | engaged, pump idle {:?}s", idle_secs);
            }
            AppEvent::PumpCycleCompleted { hold_secs } => {
                info!("PUMP | cycle complete, hold={}s x2", hold_secs);
            }
            AppEvent::WatchdogExpired { elapsed_secs } => {
                warn!("WATCHDOG | no reading after {}s", elapsed_secs);
            }
        }
    }
}
