//! Application core: pure domain logic, zero I/O.
//!
//! This module wires the zone control engine together: the per-cycle
//! orchestration, inbound commands, outbound events and the lock-free
//! command inbox.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod commands;
pub mod events;
pub mod inbox;
pub mod ports;
pub mod service;
