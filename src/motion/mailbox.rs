//! ISR → loop motion mailbox.
//!
//! One `AtomicU32` slot per zone holds the timestamp of the most recent
//! rising edge.  `0` means "empty"; a genuine edge at `0 ms` is nudged to
//! `1 ms`.  The ISR overwrites (later edges win), the loop empties each
//! slot with a single `swap`, so an edge landing between read and clear
//! can never be lost.  A single 32-bit word keeps every access lock-free
//! on targets without 64-bit atomics.

use core::sync::atomic::{AtomicU32, Ordering};

use super::MotionEvent;

const EMPTY: u32 = 0;

pub struct MotionMailbox<const N: usize> {
    slots: [AtomicU32; N],
}

impl<const N: usize> Default for MotionMailbox<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MotionMailbox<N> {
    /// `const` so the firmware can keep the mailbox in a `static`.
    pub const fn new() -> Self {
        Self {
            slots: [const { AtomicU32::new(EMPTY) }; N],
        }
    }

    /// Record an edge on `zone` at `at_ms`.  Safe to call from ISR context:
    /// no allocation, no logging, no locks.  Unknown zones are dropped.
    pub fn post(&self, zone: usize, at_ms: u32) {
        if let Some(slot) = self.slots.get(zone) {
            let stamp = if at_ms == EMPTY { 1 } else { at_ms };
            slot.store(stamp, Ordering::Release);
        }
    }

    /// Take every pending edge, leaving all slots empty.
    pub fn drain(&self) -> heapless::Vec<MotionEvent, N> {
        let mut events = heapless::Vec::new();
        for (zone, slot) in self.slots.iter().enumerate() {
            let at_ms = slot.swap(EMPTY, Ordering::AcqRel);
            if at_ms != EMPTY {
                // At most N events fit by construction.
                let _ = events.push(MotionEvent { zone, at_ms });
            }
        }
        events
    }

    pub fn is_empty(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| slot.load(Ordering::Acquire) == EMPTY)
    }
}
