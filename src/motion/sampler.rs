//! Polled PIR rising-edge detector.
//!
//! Every `interval_ms` the loop hands the current sensor levels in; a zone
//! whose level went low → high since the previous sample yields a
//! [`MotionEvent`] stamped with the sample time.  Between samples the call
//! is a no-op, so it is safe to invoke every cycle.

use crate::clock::elapsed_ms;
use crate::config::ZONE_COUNT;

use super::{MotionEvent, MotionEvents};

pub struct PirSampler {
    interval_ms: u32,
    last_sample_ms: Option<u32>,
    previous: [bool; ZONE_COUNT],
}

impl PirSampler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_sample_ms: None,
            previous: [false; ZONE_COUNT],
        }
    }

    /// Sample `levels` if the interval has elapsed and report rising edges.
    pub fn sample(&mut self, now_ms: u32, levels: [bool; ZONE_COUNT]) -> MotionEvents {
        let mut events = MotionEvents::new();
        if let Some(last) = self.last_sample_ms {
            if elapsed_ms(now_ms, last) < self.interval_ms {
                return events;
            }
        }
        self.last_sample_ms = Some(now_ms);

        for (zone, (&level, prev)) in levels.iter().zip(self.previous.iter_mut()).enumerate() {
            if level && !*prev {
                let _ = events.push(MotionEvent { zone, at_ms: now_ms });
            }
            *prev = level;
        }
        events
    }

    /// Forget remembered levels.  Called while in Work mode so a sensor
    /// still high when Security begins counts as a fresh edge.
    pub fn reset(&mut self) {
        self.previous = [false; ZONE_COUNT];
    }
}
