//! Watering decisions: the threshold policy, the cooldown gate shared by
//! every decision path, and the link-down fallback timer.

pub mod cooldown;
pub mod fallback;
pub mod policy;

pub use cooldown::{CooldownGate, PumpState};
pub use fallback::decide_fallback;
pub use policy::{Decision, apply_cooldown, decide};
