//! Watering decision policy.
//!
//! Evaluated top to bottom, first match wins:
//!
//! | # | Condition                              | Decision       |
//! |---|----------------------------------------|----------------|
//! | 1 | overflow set                           | `Skip`         |
//! | 2 | tank < `min_tank_level`                | `Skip`         |
//! | 3 | moisture >= `max_humidity`             | `Skip`         |
//! | 4 | moisture < `desired_humidity`          | `NormalWater`  |
//! | 5 | desired < moisture < max               | `MinimalWater` |
//! | 6 | moisture == desired                    | `Skip`         |
//!
//! A watering outcome is then passed through the cooldown gate and
//! downgraded to `Suppressed` if the gate refuses it.

use log::{debug, info, warn};

use crate::config::Thresholds;
use crate::sensors::Reading;

use super::cooldown::CooldownGate;

/// Outcome of one pass through the watering or fallback policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing to do this cycle.
    Skip,
    /// Short top-up cycle.
    MinimalWater,
    /// Full watering cycle.
    NormalWater,
    /// Watering was wanted but the cooldown gate refused it.
    Suppressed,
}

impl Decision {
    pub fn requires_watering(self) -> bool {
        matches!(self, Self::MinimalWater | Self::NormalWater)
    }

    /// Hold-phase duration for this decision, `None` if the pump stays off.
    pub fn pump_seconds(self, thresholds: &Thresholds) -> Option<u64> {
        match self {
            Self::NormalWater => Some(thresholds.normal_pump_seconds),
            Self::MinimalWater => Some(thresholds.minimal_pump_seconds),
            Self::Skip | Self::Suppressed => None,
        }
    }
}

/// Classify a reading against the thresholds. Pure apart from logging.
pub fn decide(reading: &Reading, thresholds: &Thresholds) -> Decision {
    let moisture = reading.soil_moisture;

    if reading.overflow {
        warn!("Overflow detected, not watering (moisture={moisture})");
        return Decision::Skip;
    }
    if reading.water_tank_level < thresholds.min_tank_level {
        warn!(
            "Water is low: tank={} < min={}",
            reading.water_tank_level, thresholds.min_tank_level
        );
        return Decision::Skip;
    }
    if moisture >= thresholds.max_humidity {
        info!("Moisture at or above max humidity: {moisture}");
        return Decision::Skip;
    }

    match moisture.cmp(&thresholds.desired_humidity) {
        core::cmp::Ordering::Less => {
            debug!("Moisture below desired ({moisture}), full watering");
            Decision::NormalWater
        }
        core::cmp::Ordering::Greater => {
            info!("Moisture above desired but below max ({moisture}), minimal watering");
            Decision::MinimalWater
        }
        core::cmp::Ordering::Equal => Decision::Skip,
    }
}

/// Run a watering decision past the cooldown gate.
///
/// Non-watering decisions pass through untouched and do not consult the
/// gate.
pub fn apply_cooldown(
    decision: Decision,
    gate: &CooldownGate,
    now: u64,
    cooldown_seconds: u64,
) -> Decision {
    if !decision.requires_watering() {
        return decision;
    }
    if gate.try_activate(now, cooldown_seconds) {
        decision
    } else {
        debug!("Not enough time passed since last watering ({decision:?} suppressed)");
        Decision::Suppressed
    }
}
