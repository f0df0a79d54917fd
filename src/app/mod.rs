//! Application core: pure domain logic, zero direct I/O.
//!
//! This module contains the control loop that ties the frame parser, the
//! watering policy, the fallback timer, and the pump actuator together.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
