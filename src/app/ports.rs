//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (PIR inputs, relay outputs, event sinks) implement these
//! traits.  The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::config::ZONE_COUNT;
use crate::motion::MotionEvents;

// ───────────────────────────────────────────────────────────────
// Motion sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait MotionSensorPort {
    /// Current raw PIR level of every zone (`true` = motion).
    fn read_levels(&mut self) -> [bool; ZONE_COUNT];

    /// Rising edges captured by interrupt since the previous call.
    ///
    /// Only consulted in edge-triggered capture mode.  Adapters without an
    /// interrupt path keep the default.
    fn take_edges(&mut self) -> MotionEvents {
        MotionEvents::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Zone actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: drives the relay pair of one zone.
pub trait ZoneActuatorPort {
    /// Energize (`true`) or release (`false`) both relays of `zone`.
    /// Called synchronously on every change of the zone's `active` flag.
    fn set_zone(&mut self, zone: usize, energized: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / transport)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log,
/// WebSocket broadcast, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
