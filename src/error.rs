//! Unified error type for the zone control engine.
//!
//! Every fallible engine operation funnels into [`Error`].  None of these
//! are fatal: the application service catches them at the command boundary,
//! logs them and leaves state untouched.  All variants are `Copy` so they
//! can travel inside [`AppEvent`](crate::app::events::AppEvent)s without
//! allocation.

use core::fmt;

/// Every fallible operation in the engine funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `set_time` was called with an hour above 23 or a minute above 59.
    InvalidTime { hour: u8, minute: u8 },
    /// A manual command referenced a zone index outside the configured set.
    OutOfRangeZone(usize),
    /// A schedule update carried an unparsable, inverted or surplus window.
    /// `index` is the position of the offending window in the update.
    MalformedScheduleWindow { index: usize },
    /// Configuration is invalid.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTime { hour, minute } => {
                write!(f, "invalid time {hour:02}:{minute:02}")
            }
            Self::OutOfRangeZone(zone) => write!(f, "zone {zone} out of range"),
            Self::MalformedScheduleWindow { index } => {
                write!(f, "malformed schedule window #{index}")
            }
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Engine-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
