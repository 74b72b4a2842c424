//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, push to WebSocket
//! clients, and so on.

use crate::clock::TimeOfDay;
use crate::error::Error;
use crate::schedule::OperatingMode;
use crate::snapshot::Snapshot;
use crate::zones::ZoneChange;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The application service has started (carries initial mode and time).
    Started { mode: OperatingMode, time: TimeOfDay },

    /// The schedule-derived mode flipped.
    ModeChanged {
        from: OperatingMode,
        to: OperatingMode,
        at: TimeOfDay,
    },

    /// A zone switched on or off.
    ZoneChanged(ZoneChange),

    /// An inbound command was refused; state is unchanged.
    CommandRejected(Error),

    /// Status snapshot for transport collaborators.
    Snapshot(Snapshot),
}
