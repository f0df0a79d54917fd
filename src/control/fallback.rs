//! Degraded-mode watering while the serial link is down.
//!
//! Without sensor data the only signal left is time since the pump last
//! ran. A controller that has never watered waters once straight away;
//! after that it waters again whenever the pump has been idle for longer
//! than `fallback_idle_seconds`.

use log::debug;

use super::cooldown::PumpState;
use super::policy::Decision;

pub fn decide_fallback(now: u64, pump_state: &PumpState, fallback_idle_seconds: u64) -> Decision {
    match pump_state.idle_secs(now) {
        None => {
            debug!("Link down and pump has never run, watering");
            Decision::NormalWater
        }
        Some(idle) if idle > fallback_idle_seconds => {
            debug!("Link down and pump idle for {idle}s, watering");
            Decision::NormalWater
        }
        Some(idle) => {
            debug!("Link down, pump idle for {idle}s of {fallback_idle_seconds}s");
            Decision::Skip
        }
    }
}
