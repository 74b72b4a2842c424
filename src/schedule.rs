//! Work-hours schedule evaluator.
//!
//! The schedule is an ordered list of time-of-day windows.  While the
//! clock is inside any window the building is in [`OperatingMode::Work`];
//! outside every window it is in [`OperatingMode::Security`].
//!
//! ```text
//!  00:00        08:00      12:00   14:00        18:10        24:00
//!    │  Security  │   Work   │ Sec.  │    Work     │  Security  │
//!    └────────────┴──────────┴───────┴─────────────┴────────────┘
//! ```
//!
//! Both ends of a window are inclusive, so `12:00` still counts as work.
//! Windows never wrap past midnight.  Updates replace the whole list in one
//! swap after every entry has been validated; a rejected update leaves the
//! previous list in force.

use heapless::Vec;
use log::info;
use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;
use crate::error::{Error, Result};

/// Maximum number of work windows (stack-allocated).
pub const MAX_WINDOWS: usize = 4;

/// Fixed-capacity window list.
pub type Windows = Vec<ScheduleWindow, MAX_WINDOWS>;

// ═══════════════════════════════════════════════════════════════
//  Types
// ═══════════════════════════════════════════════════════════════

/// The two operating regimes of the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingMode {
    /// Inside a scheduled window: zones are manual only, no auto-off.
    Work,
    /// Off hours: motion extends lit zones, inactivity turns them off.
    Security,
}

impl OperatingMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Security => "security",
        }
    }
}

/// A single work window, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl ScheduleWindow {
    /// `None` if `start` is after `end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time <= self.end
    }

    fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid() && self.start <= self.end
    }
}

/// Returns `true` if `time` falls inside any of `windows`.
pub fn is_work_mode(time: TimeOfDay, windows: &[ScheduleWindow]) -> bool {
    windows.iter().any(|w| w.contains(time))
}

// ═══════════════════════════════════════════════════════════════
//  Schedule
// ═══════════════════════════════════════════════════════════════

/// Owner of the active window list.
#[derive(Debug, Clone)]
pub struct Schedule {
    windows: Windows,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            windows: default_windows(),
        }
    }
}

impl Schedule {
    pub fn new(windows: &[ScheduleWindow]) -> Result<Self> {
        let mut schedule = Self { windows: Vec::new() };
        schedule.replace(windows)?;
        Ok(schedule)
    }

    /// Validate every window, then swap the whole list in.
    pub fn replace(&mut self, windows: &[ScheduleWindow]) -> Result<()> {
        let next = validate(windows)?;
        self.windows = next;
        info!("Schedule: {} window(s) in force", self.windows.len());
        for w in &self.windows {
            info!("Schedule:   {} - {}", w.start, w.end);
        }
        Ok(())
    }

    /// Apply a partial edit (from the configuration form) atomically.
    pub fn apply_edit(&mut self, edit: &ScheduleEdit) -> Result<()> {
        let merged = edit.merge_onto(&self.windows)?;
        self.replace(&merged)
    }

    /// Decode `startN` / `endN` form fields and apply them as one edit.
    pub fn apply_form(&mut self, fields: &[(&str, &str)]) -> Result<()> {
        self.apply_edit(&ScheduleEdit::from_form(fields))
    }

    pub fn windows(&self) -> &[ScheduleWindow] {
        &self.windows
    }

    pub fn is_work_mode(&self, time: TimeOfDay) -> bool {
        is_work_mode(time, &self.windows)
    }

    pub fn mode_at(&self, time: TimeOfDay) -> OperatingMode {
        if self.is_work_mode(time) {
            OperatingMode::Work
        } else {
            OperatingMode::Security
        }
    }
}

/// Stock work hours: 08:00–12:00 and 14:00–18:10.
pub fn default_windows() -> Windows {
    let mut windows = Vec::new();
    let _ = windows.push(ScheduleWindow {
        start: TimeOfDay { hour: 8, minute: 0 },
        end: TimeOfDay { hour: 12, minute: 0 },
    });
    let _ = windows.push(ScheduleWindow {
        start: TimeOfDay { hour: 14, minute: 0 },
        end: TimeOfDay { hour: 18, minute: 10 },
    });
    windows
}

fn validate(windows: &[ScheduleWindow]) -> Result<Windows> {
    if windows.len() > MAX_WINDOWS {
        return Err(Error::MalformedScheduleWindow { index: MAX_WINDOWS });
    }
    let mut out = Vec::new();
    for (index, w) in windows.iter().enumerate() {
        if !w.is_valid() {
            return Err(Error::MalformedScheduleWindow { index });
        }
        // Capacity checked above.
        let _ = out.push(*w);
    }
    Ok(out)
}

// ═══════════════════════════════════════════════════════════════
//  Form edits
// ═══════════════════════════════════════════════════════════════

/// What the configuration form asked for one window slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Keep,
    Set(ScheduleWindow),
}

/// Form keys naming the start of slot `N` (`startN`, or the legacy `inicioN`).
const START_KEYS: [&str; 2] = ["start", "inicio"];
/// Form keys naming the end of slot `N` (`endN`, or the legacy `finN`).
const END_KEYS: [&str; 2] = ["end", "fin"];

fn slot_suffix<'a>(key: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|p| key.strip_prefix(p))
}

/// A partial schedule update decoded from `startN` / `endN` form fields.
///
/// Slots not mentioned by the form keep their current window.  Decoding
/// never fails: the first field that could not be understood is recorded
/// and surfaces as [`Error::MalformedScheduleWindow`] when the edit is
/// applied, so the rejection happens inside the engine.  A form without
/// any slot field is rejected the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEdit {
    slots: [Slot; MAX_WINDOWS],
    rejected: Option<usize>,
}

impl ScheduleEdit {
    /// Decode form fields such as `start0=08:00&end0=12:00` (or the
    /// legacy `inicio0` / `fin0`).  Other keys are ignored.
    pub fn from_form(fields: &[(&str, &str)]) -> Self {
        let mut starts: [Option<&str>; MAX_WINDOWS] = [None; MAX_WINDOWS];
        let mut ends: [Option<&str>; MAX_WINDOWS] = [None; MAX_WINDOWS];
        let mut seen_slot_field = false;
        let mut rejected: Option<usize> = None;
        let mut reject = |index: usize| {
            rejected = Some(rejected.map_or(index, |r| r.min(index)));
        };

        for &(key, value) in fields {
            let (target, suffix) = if let Some(n) = slot_suffix(key, &START_KEYS) {
                (&mut starts, n)
            } else if let Some(n) = slot_suffix(key, &END_KEYS) {
                (&mut ends, n)
            } else {
                continue;
            };
            seen_slot_field = true;
            match suffix.parse::<usize>() {
                Ok(index) if index < MAX_WINDOWS => target[index] = Some(value),
                Ok(index) => reject(index),
                Err(_) => reject(0),
            }
        }

        let mut slots = [Slot::Keep; MAX_WINDOWS];
        for index in 0..MAX_WINDOWS {
            match (starts[index], ends[index]) {
                (None, None) => {}
                (Some(start), Some(end)) => {
                    let window = TimeOfDay::parse(start)
                        .zip(TimeOfDay::parse(end))
                        .and_then(|(s, e)| ScheduleWindow::new(s, e));
                    match window {
                        Some(w) => slots[index] = Slot::Set(w),
                        None => reject(index),
                    }
                }
                _ => reject(index),
            }
        }
        if !seen_slot_field {
            reject(0);
        }

        Self { slots, rejected }
    }

    /// An edit that replaces slot `index` with `window`.
    pub fn single(index: usize, window: ScheduleWindow) -> Self {
        let mut slots = [Slot::Keep; MAX_WINDOWS];
        let rejected = match slots.get_mut(index) {
            Some(slot) => {
                *slot = Slot::Set(window);
                None
            }
            None => Some(index),
        };
        Self { slots, rejected }
    }

    fn merge_onto(&self, current: &[ScheduleWindow]) -> Result<Windows> {
        if let Some(index) = self.rejected {
            return Err(Error::MalformedScheduleWindow { index });
        }
        let mut merged = Windows::new();
        for (index, slot) in self.slots.iter().enumerate() {
            let window = match slot {
                Slot::Set(w) => Some(*w),
                Slot::Keep => current.get(index).copied(),
            };
            match window {
                Some(w) if merged.len() == index => {
                    let _ = merged.push(w);
                }
                // A new window after a gap in the list.
                Some(_) => return Err(Error::MalformedScheduleWindow { index }),
                None => {}
            }
        }
        Ok(merged)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
