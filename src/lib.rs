//! Tomato irrigator library.
//!
//! Exposes the control core, its ports, and the host adapters so the
//! binary and the integration tests share one implementation. Serial
//! hardware access is behind the `serial` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod sensors;
