//! Mock hardware adapter and event sink for integration tests.
//!
//! Records every relay write and every emitted event so tests can assert on
//! the full history without touching real GPIO registers.

use zonelight::app::events::AppEvent;
use zonelight::app::ports::{EventSink, MotionSensorPort, ZoneActuatorPort};
use zonelight::config::ZONE_COUNT;
use zonelight::error::Error;
use zonelight::motion::{MotionEvents, MotionMailbox};
use zonelight::schedule::OperatingMode;
use zonelight::snapshot::Snapshot;
use zonelight::zones::ZoneChange;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Raw PIR levels returned by `read_levels`.
    pub levels: [bool; ZONE_COUNT],
    /// Current relay outputs.
    pub energized: [bool; ZONE_COUNT],
    /// Every `set_zone` call, in order.
    pub writes: Vec<(usize, bool)>,
    /// Stand-in for the ISR mailbox; tests post edges here.
    pub edges: MotionMailbox<ZONE_COUNT>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            levels: [false; ZONE_COUNT],
            energized: [false; ZONE_COUNT],
            writes: Vec::new(),
            edges: MotionMailbox::new(),
        }
    }

    pub fn post_edge(&self, zone: usize, at_ms: u32) {
        self.edges.post(zone, at_ms);
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSensorPort for MockHardware {
    fn read_levels(&mut self) -> [bool; ZONE_COUNT] {
        self.levels
    }

    fn take_edges(&mut self) -> MotionEvents {
        self.edges.drain()
    }
}

impl ZoneActuatorPort for MockHardware {
    fn set_zone(&mut self, zone: usize, energized: bool) {
        self.energized[zone] = energized;
        self.writes.push((zone, energized));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn zone_changes(&self) -> Vec<ZoneChange> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::ZoneChanged(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn rejections(&self) -> Vec<Error> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::CommandRejected(err) => Some(*err),
                _ => None,
            })
            .collect()
    }

    pub fn mode_changes(&self) -> Vec<(OperatingMode, OperatingMode)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::ModeChanged { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.events.iter().rev().find_map(|e| match e {
            AppEvent::Snapshot(s) => Some(s),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
