//! Read-only status projection for transport collaborators.
//!
//! [`Snapshot::render`] is pure: it reads the clock, the zone controller
//! and the latest sensor levels and never mutates anything.  The result
//! serializes to JSON for the status page.
//!
//! [`SnapshotCadence`] decides when the service should push a fresh one.

use serde::Serialize;

use crate::activity::{ActivityHistory, ActivityTrace};
use crate::clock::{Clock, elapsed_ms};
use crate::config::ZONE_COUNT;
use crate::schedule::OperatingMode;
use crate::zones::{ZoneController, ZoneStateTag};

/// Reported in place of "seconds since motion" before any motion was seen.
pub const NEVER: u32 = 999_999;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneStatus {
    pub id: usize,
    pub name: &'static str,
    pub active: bool,
    pub state: ZoneStateTag,
    /// Seconds since last accepted motion, or [`NEVER`].
    pub secs_since_motion: u32,
    /// Seconds since switched on; `0` when off.
    pub secs_on: u32,
    /// Current raw PIR level.
    pub sensor: bool,
    /// Seconds until auto-off; `0` in Work mode or when off.
    pub countdown_secs: u32,
    pub activity: ActivityTrace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub mode: OperatingMode,
    pub work_mode: bool,
    pub zones: [ZoneStatus; ZONE_COUNT],
}

fn secs(ms: u32) -> u32 {
    (ms / 1000).min(NEVER)
}

impl Snapshot {
    pub fn render(
        mode: OperatingMode,
        clock: &Clock,
        controller: &ZoneController,
        now_ms: u32,
        levels: [bool; ZONE_COUNT],
        activity: &ActivityHistory,
        timeout_ms: u32,
    ) -> Self {
        let (hour, minute, second) = clock.hms();
        let zones = core::array::from_fn(|id| {
            let z = &controller.zones()[id];
            ZoneStatus {
                id,
                name: z.name(),
                active: z.is_active(),
                state: z.state().tag(),
                secs_since_motion: z.ms_since_motion(now_ms).map_or(NEVER, secs),
                secs_on: if z.is_active() {
                    z.ms_since_on(now_ms).map_or(NEVER, secs)
                } else {
                    0
                },
                sensor: levels[id],
                countdown_secs: controller.countdown_secs(id, mode, now_ms, timeout_ms),
                activity: activity.trace(id),
            }
        });
        Self {
            hour,
            minute,
            second,
            mode,
            work_mode: mode == OperatingMode::Work,
            zones,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Push cadence
// ---------------------------------------------------------------------------

/// Decides when a snapshot is due: periodically, on any raw sensor change,
/// and on a mode change.
pub struct SnapshotCadence {
    interval_ms: u32,
    last_push_ms: Option<u32>,
    last_levels: [bool; ZONE_COUNT],
}

impl SnapshotCadence {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_push_ms: None,
            last_levels: [false; ZONE_COUNT],
        }
    }

    /// Returns `true` if a snapshot should be pushed now, and records it.
    pub fn due(&mut self, now_ms: u32, levels: [bool; ZONE_COUNT], mode_changed: bool) -> bool {
        let levels_changed = levels != self.last_levels;
        self.last_levels = levels;

        let periodic = self
            .last_push_ms
            .is_none_or(|last| elapsed_ms(now_ms, last) >= self.interval_ms);

        if periodic || levels_changed || mode_changed {
            self.last_push_ms = Some(now_ms);
            true
        } else {
            false
        }
    }

    /// Force the next call to [`due`](Self::due) to fire.
    pub fn invalidate(&mut self) {
        self.last_push_ms = None;
    }
}
