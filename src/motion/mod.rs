//! Motion capture: bridges PIR sensors into per-cycle motion events.
//!
//! Two capture designs are available, selected by
//! [`SystemConfig::capture_mode`](crate::config::SystemConfig):
//!
//! ```text
//!  EdgeTriggered:  PIR ISR ──post()──▶ MotionMailbox ──drain()──▶ events
//!  Polling:        read_levels() ──▶ PirSampler (rising edge) ──▶ events
//! ```
//!
//! Either way the loop sees at most one event per zone per cycle.

pub mod mailbox;
pub mod sampler;

use serde::{Deserialize, Serialize};

use crate::config::ZONE_COUNT;

pub use mailbox::MotionMailbox;
pub use sampler::PirSampler;

/// Motion detected on `zone` at monotonic time `at_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionEvent {
    pub zone: usize,
    pub at_ms: u32,
}

/// Batch of events drained in one cycle.
pub type MotionEvents = heapless::Vec<MotionEvent, ZONE_COUNT>;

/// How PIR activity reaches the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureMode {
    /// Rising-edge interrupts post timestamps into [`MotionMailbox`].
    EdgeTriggered,
    /// The loop samples levels and detects rising edges itself.
    Polling,
}
