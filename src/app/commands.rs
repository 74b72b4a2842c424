//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (the web UI's
//! HTTP handlers, a serial console, tests) that the
//! [`AppService`](super::service::AppService) applies immediately.
//!
//! [`AppCommand::from_request`] decodes the controller's URL surface:
//!
//! | Request                         | Command                 |
//! |---------------------------------|-------------------------|
//! | `/on?zone=N`                    | `Activate(N)`           |
//! | `/off?zone=N`                   | `Deactivate(N)`         |
//! | `/settime?time=HH:MM`           | `SetTime { .. }`        |
//! | `/update?start0=..&end0=..`     | `EditSchedule(..)`      |
//!
//! Zone indices are 0-based; `zona` is accepted as an alias of `zone`, and
//! `inicioN` / `finN` as aliases of `startN` / `endN`.

use heapless::{String, Vec};

use crate::schedule::{ScheduleEdit, Windows};

/// Longest decoded form value kept; longer values cannot be valid times.
const MAX_VALUE_LEN: usize = 16;
/// Most form fields considered per request.
const MAX_FIELDS: usize = 16;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Switch a zone on.
    Activate(usize),

    /// Switch a zone off.
    Deactivate(usize),

    /// Replace the whole window list.
    SetSchedule(Windows),

    /// Merge a partial update from the configuration form.
    EditSchedule(ScheduleEdit),

    /// Set the simulated wall clock; validated by the engine.
    SetTime { hour: u8, minute: u8 },
}

impl AppCommand {
    /// Decode an HTTP path and its query string (or form body).
    ///
    /// Returns `None` for unknown paths and for requests too garbled to
    /// name a command.  Out-of-range values still decode and are rejected
    /// by the engine, so the rejection is logged in one place.
    pub fn from_request(path: &str, query: &str) -> Option<Self> {
        let fields = decode_form(query);
        let lookup = |name: &str| {
            fields
                .iter()
                .find(|(k, _)| k.as_str() == name)
                .map(|(_, v)| v.as_str())
        };

        match path.trim_end_matches('/') {
            "/on" => zone_arg(lookup("zone").or_else(|| lookup("zona"))?).map(Self::Activate),
            "/off" => zone_arg(lookup("zone").or_else(|| lookup("zona"))?).map(Self::Deactivate),
            "/settime" => {
                let (h, m) = lookup("time")?.trim().split_once(':')?;
                Some(Self::SetTime {
                    hour: h.parse().ok()?,
                    minute: m.parse().ok()?,
                })
            }
            "/update" => {
                let pairs: Vec<(&str, &str), MAX_FIELDS> = fields
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                Some(Self::EditSchedule(ScheduleEdit::from_form(&pairs)))
            }
            _ => None,
        }
    }
}

fn zone_arg(text: &str) -> Option<usize> {
    text.trim().parse().ok()
}

type Field = (String<MAX_VALUE_LEN>, String<MAX_VALUE_LEN>);

/// Split `a=1&b=2` into percent-decoded pairs.  Fields that do not fit are
/// dropped.
fn decode_form(query: &str) -> Vec<Field, MAX_FIELDS> {
    let mut out = Vec::new();
    for part in query.trim_start_matches('?').split('&') {
        if part.is_empty() {
            continue;
        }
        let (k, v) = part.split_once('=').unwrap_or((part, ""));
        let (Some(k), Some(v)) = (percent_decode(k), percent_decode(v)) else {
            continue;
        };
        if out.push((k, v)).is_err() {
            break;
        }
    }
    out
}

fn percent_decode(raw: &str) -> Option<String<MAX_VALUE_LEN>> {
    let mut out = String::new();
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = match bytes[i] {
            b'+' => b' ',
            b'%' => {
                let hex = raw.get(i + 1..i + 3)?;
                i += 2;
                u8::from_str_radix(hex, 16).ok()?
            }
            b => b,
        };
        // Times and indices are ASCII; anything else cannot be valid.
        if !c.is_ascii() {
            return None;
        }
        out.push(char::from(c)).ok()?;
        i += 1;
    }
    Some(out)
}
