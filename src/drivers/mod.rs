//! Pump actuation, GPIO lines, and the startup watchdog.

pub mod gpio;
pub mod pump;
pub mod watchdog;
