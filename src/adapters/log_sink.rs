//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production).  A WebSocket
//! adapter would implement the same trait and forward
//! [`Snapshot::to_json`](crate::snapshot::Snapshot::to_json) to clients.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::zones::ChangeCause;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink {
    /// Log every n-th snapshot; snapshots arrive at 2 Hz or faster.
    snapshot_every: u32,
    snapshots_seen: u32,
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new(20)
    }
}

impl LogEventSink {
    pub fn new(snapshot_every: u32) -> Self {
        Self {
            snapshot_every: snapshot_every.max(1),
            snapshots_seen: 0,
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { mode, time } => {
                info!("START | mode={} | time={}", mode.label(), time);
            }
            AppEvent::ModeChanged { from, to, at } => {
                info!("MODE | {} -> {} | at={}", from.label(), to.label(), at);
            }
            AppEvent::ZoneChanged(change) => {
                let cause = match change.cause {
                    ChangeCause::Manual => "manual",
                    ChangeCause::Timeout => "timeout",
                };
                info!(
                    "ZONE | zone={} | {} | cause={}",
                    change.zone,
                    if change.active { "ON" } else { "OFF" },
                    cause
                );
            }
            AppEvent::CommandRejected(e) => {
                warn!("CMD | rejected: {}", e);
            }
            AppEvent::Snapshot(s) => {
                let n = self.snapshots_seen;
                self.snapshots_seen = n.wrapping_add(1);
                if n % self.snapshot_every != 0 {
                    return;
                }
                for z in &s.zones {
                    info!(
                        "SNAP | {:02}:{:02}:{:02} {} | {} {} | motion={}s | on={}s | pir={} | off_in={}s",
                        s.hour,
                        s.minute,
                        s.second,
                        s.mode.label(),
                        z.name,
                        if z.active { "ON" } else { "OFF" },
                        z.secs_since_motion,
                        z.secs_on,
                        u8::from(z.sensor),
                        z.countdown_secs,
                    );
                }
            }
        }
    }
}
