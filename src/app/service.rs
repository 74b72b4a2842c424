//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the clock, schedule, zone controller and motion
//! capture state.  It exposes a hardware-agnostic API; all I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  MotionSensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                       │        AppService        │
//! ZoneActuatorPort ◀──  │ Clock · Schedule · Zones │
//!                       └──────────────────────────┘
//! ```
//!
//! One [`tick`](AppService::tick) is one cycle of the cooperative loop:
//!
//! 1. clock tick
//! 2. mode recompute and transition handling
//! 3. motion capture drain
//! 4. motion application
//! 5. timeout sweep
//! 6. activity sample
//! 7. snapshot, when due

use log::{info, warn};

use crate::activity::ActivityHistory;
use crate::clock::Clock;
use crate::config::{SystemConfig, ZONE_COUNT};
use crate::error::Result;
use crate::motion::{CaptureMode, MotionEvents, PirSampler};
use crate::schedule::{OperatingMode, Schedule};
use crate::snapshot::{Snapshot, SnapshotCadence};
use crate::zones::ZoneController;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{EventSink, MotionSensorPort, ZoneActuatorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    clock: Clock,
    schedule: Schedule,
    mode: OperatingMode,
    zones: ZoneController,
    sampler: PirSampler,
    activity: ActivityHistory,
    cadence: SnapshotCadence,
    /// Raw PIR levels read in the latest cycle.
    levels: [bool; ZONE_COUNT],
    /// Monotonic time of the latest cycle.
    now_ms: u32,
    cycle_count: u64,
}

impl AppService {
    /// Construct the service from configuration, anchored at `now_ms`.
    ///
    /// An invalid configuration is logged and replaced by the defaults.
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, now_ms: u32) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("AppService: {}; using defaults", e);
                SystemConfig::default()
            }
        };
        let schedule = Schedule::new(&config.schedule).unwrap_or_default();
        let clock = Clock::new(config.boot_time, now_ms);
        let mode = schedule.mode_at(clock.now());

        Self {
            clock,
            schedule,
            mode,
            zones: ZoneController::new(),
            sampler: PirSampler::new(config.pir_sample_interval_ms),
            activity: ActivityHistory::new(config.activity_sample_ms),
            cadence: SnapshotCadence::new(config.snapshot_interval_ms),
            levels: [false; ZONE_COUNT],
            now_ms,
            cycle_count: 0,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every relay to the all-`Off` boot state and announce start-up.
    pub fn start(&mut self, hw: &mut impl ZoneActuatorPort, sink: &mut impl EventSink) {
        self.zones.sync_outputs(hw);
        let time = self.clock.now();
        sink.emit(&AppEvent::Started { mode: self.mode, time });
        info!(
            "AppService started at {} in {} mode ({:?} capture)",
            time,
            self.mode.label(),
            self.config.capture_mode
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle.  Never blocks.
    ///
    /// The `hw` parameter satisfies **both** [`MotionSensorPort`] and
    /// [`ZoneActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl MotionSensorPort + ZoneActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.cycle_count += 1;
        self.now_ms = now_ms;

        // 1. Wall clock
        self.clock.tick(now_ms);

        // 2. Mode
        let time = self.clock.now();
        let next = self.schedule.mode_at(time);
        let mode_changed = next != self.mode;
        if mode_changed {
            let from = self.mode;
            self.zones.on_mode_change(from, next, now_ms);
            self.mode = next;
            info!("Mode: {} -> {} at {}", from.label(), next.label(), time);
            sink.emit(&AppEvent::ModeChanged { from, to: next, at: time });
        }

        // 3. Motion capture
        self.levels = hw.read_levels();
        let events = self.capture_motion(now_ms, hw);

        // 4. Motion application
        self.zones.apply_motion(self.mode, &events);

        // 5. Timeout sweep
        let timeout_ms = self.config.zone_timeout_ms();
        for change in self.zones.sweep(self.mode, now_ms, timeout_ms, hw) {
            sink.emit(&AppEvent::ZoneChanged(change));
        }

        // 6. Activity history
        self.activity.sample(now_ms, self.levels);

        // 7. Snapshot
        if self.cadence.due(now_ms, self.levels, mode_changed) {
            sink.emit(&AppEvent::Snapshot(self.snapshot()));
        }
    }

    fn capture_motion(&mut self, now_ms: u32, hw: &mut impl MotionSensorPort) -> MotionEvents {
        match self.config.capture_mode {
            // Always drained so Work-hours edges do not leak into Security.
            CaptureMode::EdgeTriggered => hw.take_edges(),
            CaptureMode::Polling if self.mode == OperatingMode::Work => {
                self.sampler.reset();
                MotionEvents::new()
            }
            CaptureMode::Polling => self.sampler.sample(now_ms, self.levels),
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply an external command immediately.
    ///
    /// Never fails outward: a rejected command is logged, reported as
    /// [`AppEvent::CommandRejected`] and leaves all state unchanged.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u32,
        hw: &mut impl ZoneActuatorPort,
        sink: &mut impl EventSink,
    ) {
        if let Err(e) = self.apply_command(&cmd, now_ms, hw, sink) {
            warn!("Command {:?} rejected: {}", cmd, e);
            sink.emit(&AppEvent::CommandRejected(e));
            return;
        }
        // Let the UI see the effect on the next cycle.
        self.cadence.invalidate();
    }

    fn apply_command(
        &mut self,
        cmd: &AppCommand,
        now_ms: u32,
        hw: &mut impl ZoneActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            AppCommand::Activate(zone) => {
                let change = self.zones.activate(*zone, self.mode, now_ms, hw)?;
                sink.emit(&AppEvent::ZoneChanged(change));
            }
            AppCommand::Deactivate(zone) => {
                let change = self.zones.deactivate(*zone, hw)?;
                sink.emit(&AppEvent::ZoneChanged(change));
            }
            AppCommand::SetSchedule(windows) => self.schedule.replace(windows)?,
            AppCommand::EditSchedule(edit) => self.schedule.apply_edit(edit)?,
            AppCommand::SetTime { hour, minute } => self.clock.set_time(*hour, *minute, now_ms)?,
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Status snapshot as of the latest cycle.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::render(
            self.mode,
            &self.clock,
            &self.zones,
            self.now_ms,
            self.levels,
            &self.activity,
            self.config.zone_timeout_ms(),
        )
    }

    /// Current operating mode (as of the latest cycle).
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn zones(&self) -> &ZoneController {
        &self.zones
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Total cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }
}
