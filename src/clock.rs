//! Simulated wall clock.
//!
//! The board has no RTC and no network time, so time-of-day is a counter
//! advanced from the monotonic millisecond timer and set by the operator
//! from the web UI.  The clock only feeds the schedule evaluator; zone
//! timeouts are always measured on the monotonic timer (see
//! [`elapsed_ms`]) so rewinding the clock cannot expire or revive a zone.
//!
//! ```text
//!   monotonic ms ──tick()──▶ seconds_of_day ──now()──▶ TimeOfDay
//!                              ▲
//!                 set_time() ──┘ (re-anchors the ms reference)
//! ```

use core::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const SECONDS_PER_DAY: u32 = 86_400;

/// Milliseconds elapsed from `since` to `now` on a wrapping `u32` timer.
///
/// If `since` is ahead of `now` (a stamp taken by an ISR after the cycle
/// sampled its own `now`), the distance is treated as zero rather than
/// as an almost-full wrap.
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    let delta = now.wrapping_sub(since);
    if delta > i32::MAX as u32 { 0 } else { delta }
}

/// How far ahead of the cycle's `now` an ISR stamp may legitimately be.
const FUTURE_SLACK_MS: u32 = 1_000;

/// Age of `since` for display, or `None` once it lies more than half the
/// timer range in the past and can no longer be told apart from a wrap.
pub fn age_ms(now: u32, since: u32) -> Option<u32> {
    let delta = now.wrapping_sub(since);
    if delta <= i32::MAX as u32 {
        Some(delta)
    } else if delta.wrapping_neg() <= FUTURE_SLACK_MS {
        Some(0)
    } else {
        None
    }
}

/// `true` if `a` is strictly later than `b` on the wrapping timer.
pub fn is_later(a: u32, b: u32) -> bool {
    let delta = a.wrapping_sub(b);
    delta != 0 && delta <= i32::MAX as u32
}

// ---------------------------------------------------------------------------
// TimeOfDay
// ---------------------------------------------------------------------------

/// Hour and minute of the day, ordered by `hour * 60 + minute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    /// Build a time-of-day, rejecting out-of-range fields.
    pub const fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(Error::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Parse `"H:MM"` / `"HH:MM"`.  Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let (h, m) = text.trim().split_once(':')?;
        let hour = parse_field(h)?;
        let minute = parse_field(m)?;
        Self::new(hour, minute).ok()
    }

    pub(crate) const fn is_valid(self) -> bool {
        self.hour <= 23 && self.minute <= 59
    }
}

fn parse_field(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Time-of-day counter driven by the monotonic millisecond timer.
#[derive(Debug, Clone)]
pub struct Clock {
    seconds_of_day: u32,
    /// Monotonic stamp up to which whole seconds have been consumed.
    last_tick_ms: u32,
}

impl Clock {
    /// Start the clock at `boot` (seconds = 0), anchored at `now_ms`.
    pub fn new(boot: TimeOfDay, now_ms: u32) -> Self {
        Self {
            seconds_of_day: boot.minutes() as u32 * 60,
            last_tick_ms: now_ms,
        }
    }

    /// Advance by the whole seconds elapsed since the last consumed second.
    ///
    /// The reference only moves forward by the consumed whole seconds, so a
    /// cycle period that does not divide 1000 ms does not drift.
    pub fn tick(&mut self, now_ms: u32) {
        let whole_secs = elapsed_ms(now_ms, self.last_tick_ms) / 1000;
        if whole_secs == 0 {
            return;
        }
        self.seconds_of_day = ((self.seconds_of_day as u64 + whole_secs as u64)
            % SECONDS_PER_DAY as u64) as u32;
        self.last_tick_ms = self.last_tick_ms.wrapping_add(whole_secs * 1000);
    }

    /// Set the time-of-day to `hour:minute:00`, re-anchored at `now_ms`.
    ///
    /// On `InvalidTime` the clock is left exactly as it was.
    pub fn set_time(&mut self, hour: u8, minute: u8, now_ms: u32) -> Result<()> {
        let time = TimeOfDay::new(hour, minute)?;
        self.seconds_of_day = time.minutes() as u32 * 60;
        self.last_tick_ms = now_ms;
        info!("Clock: set to {}", time);
        Ok(())
    }

    /// Current hour and minute.
    pub fn now(&self) -> TimeOfDay {
        let (hour, minute, _) = self.hms();
        TimeOfDay { hour, minute }
    }

    /// Current hour, minute and second.
    pub fn hms(&self) -> (u8, u8, u8) {
        let s = self.seconds_of_day;
        ((s / 3600) as u8, (s / 60 % 60) as u8, (s % 60) as u8)
    }

    pub fn seconds_of_day(&self) -> u32 {
        self.seconds_of_day
    }
}
