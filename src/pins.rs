//! GPIO pin assignments for the zone controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

use crate::config::ZONE_COUNT;

// ---------------------------------------------------------------------------
// PIR motion sensors (digital input, HIGH = motion)
// ---------------------------------------------------------------------------

pub const PIR_ZONE1_GPIO: i32 = 13;
pub const PIR_ZONE2_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Lighting relays (active LOW: LOW = energized)
// ---------------------------------------------------------------------------

pub const RELAY_ZONE1_A_GPIO: i32 = 32;
pub const RELAY_ZONE1_B_GPIO: i32 = 25;
pub const RELAY_ZONE2_A_GPIO: i32 = 26;
pub const RELAY_ZONE2_B_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// Per-zone lookup tables
// ---------------------------------------------------------------------------

pub const PIR_GPIOS: [i32; ZONE_COUNT] = [PIR_ZONE1_GPIO, PIR_ZONE2_GPIO];

pub const RELAY_GPIOS: [[i32; 2]; ZONE_COUNT] = [
    [RELAY_ZONE1_A_GPIO, RELAY_ZONE1_B_GPIO],
    [RELAY_ZONE2_A_GPIO, RELAY_ZONE2_B_GPIO],
];
