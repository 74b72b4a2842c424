//! System configuration parameters
//!
//! All tunable parameters for the zone controller.  Zone count, names and
//! pin assignments are compile-time constants; everything else lives in
//! [`SystemConfig`] and is validated once at start-up.

use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;
use crate::error::{Error, Result};
use crate::motion::CaptureMode;
use crate::schedule::{self, Windows};

/// Number of lighting zones on the board.
pub const ZONE_COUNT: usize = 2;

/// Display names, indexed by zone id.
pub const ZONE_NAMES: [&str; ZONE_COUNT] = ["Zone 1", "Zone 2"];

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Zones ---
    /// Inactivity period after which a lit zone turns off in Security mode.
    pub zone_timeout_secs: u32,

    // --- Timing ---
    /// Cooperative loop period (milliseconds)
    pub cycle_period_ms: u32,
    /// PIR level sampling interval when polling (milliseconds)
    pub pir_sample_interval_ms: u32,
    /// Periodic snapshot push interval (milliseconds)
    pub snapshot_interval_ms: u32,
    /// Activity history sampling interval (milliseconds)
    pub activity_sample_ms: u32,

    // --- Motion ---
    pub capture_mode: CaptureMode,

    // --- Clock & schedule ---
    /// Time-of-day the simulated clock starts at after reset.
    pub boot_time: TimeOfDay,
    /// Work-hours windows in force after reset.
    pub schedule: Windows,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            zone_timeout_secs: 300, // 5 min

            cycle_period_ms: 10,
            pir_sample_interval_ms: 100, // 10 Hz
            snapshot_interval_ms: 500,   // 2 Hz
            activity_sample_ms: 1000,    // 1 Hz

            capture_mode: CaptureMode::Polling,

            boot_time: TimeOfDay { hour: 19, minute: 0 },
            schedule: schedule::default_windows(),
        }
    }
}

impl SystemConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.zone_timeout_secs == 0 {
            return Err(Error::Config("zone_timeout_secs must be > 0"));
        }
        // Keeps timeout arithmetic well inside the wrapping-timer half range.
        if self.zone_timeout_secs > 86_400 {
            return Err(Error::Config("zone_timeout_secs must be <= one day"));
        }
        if self.cycle_period_ms == 0 || self.cycle_period_ms > 1000 {
            return Err(Error::Config("cycle_period_ms must be in 1..=1000"));
        }
        if self.pir_sample_interval_ms == 0 {
            return Err(Error::Config("pir_sample_interval_ms must be > 0"));
        }
        if self.snapshot_interval_ms == 0 {
            return Err(Error::Config("snapshot_interval_ms must be > 0"));
        }
        if self.activity_sample_ms == 0 {
            return Err(Error::Config("activity_sample_ms must be > 0"));
        }
        if !self.boot_time.is_valid() {
            return Err(Error::Config("boot_time out of range"));
        }
        if schedule::Schedule::new(&self.schedule).is_err() {
            return Err(Error::Config("schedule contains a malformed window"));
        }
        Ok(())
    }

    pub fn zone_timeout_ms(&self) -> u32 {
        self.zone_timeout_secs.saturating_mul(1000)
    }
}
