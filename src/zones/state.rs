//! Per-zone state.

use serde::Serialize;

use crate::clock::age_ms;

/// Lifecycle of one lighting zone.
///
/// ```text
///            activate (Work)             Work → Security
///   Off ─────────────────────▶ OnManual ───────────────▶ OnAuto
///    ▲  ◀──────────────────────   │  ◀───────────────────  │
///    │        deactivate          │     Security → Work     │
///    └────────────────────────────┴─────────────────────────┘
///              deactivate / inactivity timeout (OnAuto only)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneState {
    Off,
    /// Lit and exempt from the inactivity timeout.
    OnManual { activated_at: u32 },
    /// Lit and subject to the inactivity timeout.
    OnAuto { activated_at: u32 },
}

impl ZoneState {
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Off)
    }

    pub fn activated_at(self) -> Option<u32> {
        match self {
            Self::Off => None,
            Self::OnManual { activated_at } | Self::OnAuto { activated_at } => Some(activated_at),
        }
    }

    pub fn tag(self) -> ZoneStateTag {
        match self {
            Self::Off => ZoneStateTag::Off,
            Self::OnManual { .. } => ZoneStateTag::OnManual,
            Self::OnAuto { .. } => ZoneStateTag::OnAuto,
        }
    }
}

/// Data-free discriminant of [`ZoneState`], as reported in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneStateTag {
    Off,
    OnManual,
    OnAuto,
}

/// One lighting zone: a PIR sensor and a pair of relays.
#[derive(Debug, Clone)]
pub struct Zone {
    id: usize,
    name: &'static str,
    pub(super) state: ZoneState,
    /// Most recent accepted motion.  `None` only until the first one.
    pub(super) last_motion: Option<u32>,
}

impl Zone {
    pub(super) fn new(id: usize, name: &'static str) -> Self {
        Self {
            id,
            name,
            state: ZoneState::Off,
            last_motion: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> ZoneState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn last_motion(&self) -> Option<u32> {
        self.last_motion
    }

    /// Milliseconds since the zone last saw accepted motion; `None` if it
    /// never did or the stamp is too old to read.
    pub fn ms_since_motion(&self, now_ms: u32) -> Option<u32> {
        self.last_motion.and_then(|at| age_ms(now_ms, at))
    }

    /// Milliseconds since the zone was switched on; `None` when off or
    /// when the stamp is too old to read.
    pub fn ms_since_on(&self, now_ms: u32) -> Option<u32> {
        self.state.activated_at().and_then(|at| age_ms(now_ms, at))
    }
}
