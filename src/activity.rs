//! Rolling per-zone sensor activity, one sample per second.
//!
//! Each zone keeps the last [`ACTIVITY_SAMPLES`] raw PIR levels (`1` =
//! high) in a fixed ring, pre-filled with zeros, for the status page's
//! activity strip.

use heapless::HistoryBuffer;

use crate::clock::elapsed_ms;
use crate::config::ZONE_COUNT;

pub const ACTIVITY_SAMPLES: usize = 60;

/// Oldest-first copy of one zone's ring.
pub type ActivityTrace = heapless::Vec<u8, ACTIVITY_SAMPLES>;

pub struct ActivityHistory {
    interval_ms: u32,
    last_sample_ms: Option<u32>,
    rings: [HistoryBuffer<u8, ACTIVITY_SAMPLES>; ZONE_COUNT],
}

impl ActivityHistory {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_sample_ms: None,
            rings: core::array::from_fn(|_| HistoryBuffer::new_with(0)),
        }
    }

    /// Record `levels` if a sample is due.  Returns `true` when recorded.
    pub fn sample(&mut self, now_ms: u32, levels: [bool; ZONE_COUNT]) -> bool {
        match self.last_sample_ms {
            Some(last) if elapsed_ms(now_ms, last) < self.interval_ms => return false,
            // Fell far behind (stalled loop): re-anchor instead of bursting.
            Some(last) if elapsed_ms(now_ms, last) >= 2 * self.interval_ms => {
                self.last_sample_ms = Some(now_ms);
            }
            // Step by whole intervals so the 1 Hz cadence does not drift.
            Some(last) => self.last_sample_ms = Some(last.wrapping_add(self.interval_ms)),
            None => self.last_sample_ms = Some(now_ms),
        }
        for (ring, level) in self.rings.iter_mut().zip(levels) {
            ring.write(u8::from(level));
        }
        true
    }

    pub fn trace(&self, zone: usize) -> ActivityTrace {
        self.rings
            .get(zone)
            .map(|ring| ring.oldest_ordered().copied().collect())
            .unwrap_or_default()
    }
}
