//! Relay and PIR drivers, interrupt registration and the task watchdog.

pub mod hw_init;
pub mod pir;
pub mod relay;
pub mod watchdog;
