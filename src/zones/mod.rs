//! Zone controller: activation, motion extension and inactivity timeout.
//!
//! [`ZoneController`] is the only owner of zone state.  Every change of a
//! zone's `active` flag drives its relays through
//! [`ZoneActuatorPort::set_zone`] in the same call, so the relay outputs
//! always mirror the state.
//!
//! Policy by mode:
//!
//! | Operation   | Work                          | Security                            |
//! |-------------|-------------------------------|-------------------------------------|
//! | activate    | `OnManual`                    | `OnAuto`, `last_motion = now`       |
//! | deactivate  | `Off`                         | `Off`                               |
//! | motion      | discarded                     | extends active zones only           |
//! | sweep       | no-op                         | `Off` after `> timeout` w/o motion  |

mod state;

pub use state::{Zone, ZoneState, ZoneStateTag};

use log::info;

use crate::app::ports::ZoneActuatorPort;
use crate::clock::{age_ms, elapsed_ms, is_later};
use crate::config::{ZONE_COUNT, ZONE_NAMES};
use crate::error::{Error, Result};
use crate::motion::MotionEvent;
use crate::schedule::OperatingMode;

/// Why a zone's `active` flag changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Manual,
    Timeout,
}

/// A change of one zone's `active` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneChange {
    pub zone: usize,
    pub active: bool,
    pub cause: ChangeCause,
}

pub type ZoneChanges = heapless::Vec<ZoneChange, ZONE_COUNT>;

pub struct ZoneController {
    zones: [Zone; ZONE_COUNT],
}

impl Default for ZoneController {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneController {
    /// All zones `Off`, no motion seen.
    pub fn new() -> Self {
        Self {
            zones: core::array::from_fn(|id| Zone::new(id, ZONE_NAMES[id])),
        }
    }

    pub fn zones(&self) -> &[Zone; ZONE_COUNT] {
        &self.zones
    }

    pub fn zone(&self, zone: usize) -> Option<&Zone> {
        self.zones.get(zone)
    }

    /// De-energize every relay to match the initial all-`Off` state.
    pub fn sync_outputs(&self, hw: &mut impl ZoneActuatorPort) {
        for z in &self.zones {
            hw.set_zone(z.id(), z.is_active());
        }
    }

    // ── Manual commands ───────────────────────────────────────

    /// Switch a zone on.  Re-activating a lit zone restarts its on-time.
    pub fn activate(
        &mut self,
        zone: usize,
        mode: OperatingMode,
        now_ms: u32,
        hw: &mut impl ZoneActuatorPort,
    ) -> Result<ZoneChange> {
        let z = self.zones.get_mut(zone).ok_or(Error::OutOfRangeZone(zone))?;
        z.state = match mode {
            OperatingMode::Work => ZoneState::OnManual { activated_at: now_ms },
            OperatingMode::Security => {
                z.last_motion = Some(now_ms);
                ZoneState::OnAuto { activated_at: now_ms }
            }
        };
        hw.set_zone(zone, true);
        info!("Zone: {} on (manual, {})", z.name(), mode.label());
        Ok(ZoneChange {
            zone,
            active: true,
            cause: ChangeCause::Manual,
        })
    }

    /// Switch a zone off.  `last_motion` is kept.
    pub fn deactivate(&mut self, zone: usize, hw: &mut impl ZoneActuatorPort) -> Result<ZoneChange> {
        let z = self.zones.get_mut(zone).ok_or(Error::OutOfRangeZone(zone))?;
        z.state = ZoneState::Off;
        hw.set_zone(zone, false);
        info!("Zone: {} off (manual)", z.name());
        Ok(ZoneChange {
            zone,
            active: false,
            cause: ChangeCause::Manual,
        })
    }

    // ── Per-cycle policy ──────────────────────────────────────

    /// Apply a mode flip.  No zone changes `active` here.
    pub fn on_mode_change(&mut self, from: OperatingMode, to: OperatingMode, now_ms: u32) {
        match (from, to) {
            (OperatingMode::Work, OperatingMode::Security) => {
                for z in &mut self.zones {
                    if let Some(activated_at) = z.state.activated_at() {
                        // Grace period: a zone left on at closing gets a full timeout.
                        z.last_motion = Some(now_ms);
                        z.state = ZoneState::OnAuto { activated_at };
                    }
                }
            }
            (OperatingMode::Security, OperatingMode::Work) => {
                for z in &mut self.zones {
                    if let ZoneState::OnAuto { activated_at } = z.state {
                        z.state = ZoneState::OnManual { activated_at };
                    }
                }
            }
            _ => {}
        }
    }

    /// Extend active zones with motion.  Discarded in Work mode; events for
    /// unlit zones never switch them on.
    pub fn apply_motion(&mut self, mode: OperatingMode, events: &[MotionEvent]) {
        if mode == OperatingMode::Work {
            return;
        }
        for ev in events {
            let Some(z) = self.zones.get_mut(ev.zone) else {
                continue;
            };
            if !z.is_active() {
                continue;
            }
            match z.last_motion {
                Some(prev) if !is_later(ev.at_ms, prev) => {}
                _ => z.last_motion = Some(ev.at_ms),
            }
        }
    }

    /// Switch off every zone idle for strictly more than `timeout_ms`.
    ///
    /// Also forgets motion stamps older than half the timer range, so a
    /// long-idle zone reads as "never" instead of aliasing after a wrap.
    pub fn sweep(
        &mut self,
        mode: OperatingMode,
        now_ms: u32,
        timeout_ms: u32,
        hw: &mut impl ZoneActuatorPort,
    ) -> ZoneChanges {
        for z in &mut self.zones {
            if z.last_motion.is_some_and(|at| age_ms(now_ms, at).is_none()) {
                z.last_motion = None;
            }
        }

        let mut changes = ZoneChanges::new();
        if mode == OperatingMode::Work {
            return changes;
        }
        for z in &mut self.zones {
            let Some(activated_at) = z.state.activated_at() else {
                continue;
            };
            let since = z.last_motion.unwrap_or(activated_at);
            let idle_ms = elapsed_ms(now_ms, since);
            if idle_ms > timeout_ms {
                z.state = ZoneState::Off;
                hw.set_zone(z.id(), false);
                info!("Zone: {} off (no motion for {} s)", z.name(), idle_ms / 1000);
                let _ = changes.push(ZoneChange {
                    zone: z.id(),
                    active: false,
                    cause: ChangeCause::Timeout,
                });
            }
        }
        changes
    }

    /// Whole seconds until `zone` times out; `0` in Work mode or when off.
    pub fn countdown_secs(&self, zone: usize, mode: OperatingMode, now_ms: u32, timeout_ms: u32) -> u32 {
        if mode == OperatingMode::Work {
            return 0;
        }
        let Some(z) = self.zones.get(zone) else {
            return 0;
        };
        let Some(activated_at) = z.state.activated_at() else {
            return 0;
        };
        let idle_ms = elapsed_ms(now_ms, z.last_motion.unwrap_or(activated_at));
        timeout_ms.saturating_sub(idle_ms) / 1000
    }
}
