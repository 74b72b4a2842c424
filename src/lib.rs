//! Zonelight firmware library.
//!
//! Exposes the pure-logic zone control engine for integration testing and
//! the firmware binary. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod activity;
pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod motion;
pub mod pins;
pub mod schedule;
pub mod snapshot;
pub mod zones;

// Hardware-facing layers; simulation stubs on host targets.
pub mod adapters;
pub mod drivers;
