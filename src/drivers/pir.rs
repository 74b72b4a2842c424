//! PIR motion sensor input.
//!
//! ## Hardware
//!
//! HC-SR501-style modules: output HIGH while motion is detected.  The
//! level is read every cycle for polling, the status page and the
//! activity history.  In edge-triggered mode a rising-edge interrupt
//! (registered in [`hw_init`](super::hw_init)) stamps the zone's slot in
//! [`PIR_MAILBOX`].

use embedded_hal::digital::InputPin;

use crate::config::ZONE_COUNT;
use crate::motion::MotionMailbox;

/// ISR → loop hand-off, one slot per zone.
pub static PIR_MAILBOX: MotionMailbox<ZONE_COUNT> = MotionMailbox::new();

/// Called from the PIR GPIO ISR.  Lock-free, allocation-free.
pub fn pir_isr_handler(zone: usize, now_ms: u32) {
    PIR_MAILBOX.post(zone, now_ms);
}

pub struct PirInput<I: InputPin> {
    pin: I,
}

impl<I: InputPin> PirInput<I> {
    pub fn new(pin: I) -> Self {
        Self { pin }
    }

    /// `true` while the sensor reports motion.  A read error counts as
    /// no motion so a faulty input can never hold a zone on.
    pub fn is_motion(&mut self) -> bool {
        self.pin.is_high().unwrap_or(false)
    }
}
