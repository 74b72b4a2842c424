//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns every PIR input and relay pair, exposing them through
//! [`MotionSensorPort`] and [`ZoneActuatorPort`].  Generic over the
//! `embedded-hal` pin traits so the same adapter runs on ESP-IDF
//! `PinDriver`s and on host test doubles.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{MotionSensorPort, ZoneActuatorPort};
use crate::config::ZONE_COUNT;
use crate::drivers::pir::PirInput;
use crate::drivers::relay::RelayPair;
use crate::motion::{MotionEvents, MotionMailbox};

/// Concrete adapter that combines all zone hardware behind port traits.
pub struct HardwareAdapter<I: InputPin, O: OutputPin> {
    pirs: [PirInput<I>; ZONE_COUNT],
    relays: [RelayPair<O>; ZONE_COUNT],
    mailbox: &'static MotionMailbox<ZONE_COUNT>,
}

impl<I: InputPin, O: OutputPin> HardwareAdapter<I, O> {
    pub fn new(
        pirs: [PirInput<I>; ZONE_COUNT],
        relays: [RelayPair<O>; ZONE_COUNT],
        mailbox: &'static MotionMailbox<ZONE_COUNT>,
    ) -> Self {
        Self {
            pirs,
            relays,
            mailbox,
        }
    }

    /// Release every relay (used before a deliberate restart).
    pub fn all_off(&mut self) {
        for relay in &mut self.relays {
            relay.set(false);
        }
    }

    pub fn is_energized(&self, zone: usize) -> bool {
        self.relays.get(zone).is_some_and(RelayPair::is_energized)
    }
}

// ── MotionSensorPort implementation ───────────────────────────

impl<I: InputPin, O: OutputPin> MotionSensorPort for HardwareAdapter<I, O> {
    fn read_levels(&mut self) -> [bool; ZONE_COUNT] {
        let mut levels = [false; ZONE_COUNT];
        for (level, pir) in levels.iter_mut().zip(&mut self.pirs) {
            *level = pir.is_motion();
        }
        levels
    }

    fn take_edges(&mut self) -> MotionEvents {
        self.mailbox.drain()
    }
}

// ── ZoneActuatorPort implementation ───────────────────────────

impl<I: InputPin, O: OutputPin> ZoneActuatorPort for HardwareAdapter<I, O> {
    fn set_zone(&mut self, zone: usize, energized: bool) {
        if let Some(relay) = self.relays.get_mut(zone) {
            relay.set(energized);
        }
    }
}
