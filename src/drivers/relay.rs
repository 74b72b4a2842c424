//! Relay-pair driver for one lighting zone.
//!
//! ## Hardware
//!
//! Each zone switches its fixtures through two relay channels driven
//! together.  The relay board is active LOW: pulling the input LOW
//! energizes the coil.  Both channels are released (HIGH) at construction.

use embedded_hal::digital::OutputPin;
use log::warn;

pub struct RelayPair<O: OutputPin> {
    a: O,
    b: O,
    energized: bool,
}

impl<O: OutputPin> RelayPair<O> {
    /// Take ownership of both channels and release them.
    pub fn new(a: O, b: O) -> Self {
        let mut pair = Self {
            a,
            b,
            energized: true,
        };
        pair.set(false);
        pair
    }

    /// Drive both channels.  A failed pin write is logged; the other
    /// channel is still driven.
    pub fn set(&mut self, energized: bool) {
        for (label, pin) in [("A", &mut self.a), ("B", &mut self.b)] {
            let res = if energized { pin.set_low() } else { pin.set_high() };
            if res.is_err() {
                warn!("Relay {}: write failed (energized={})", label, energized);
            }
        }
        self.energized = energized;
    }

    pub fn is_energized(&self) -> bool {
        self.energized
    }
}
