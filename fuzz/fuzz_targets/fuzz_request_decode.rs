//! Fuzz target: `AppCommand::from_request`
//!
//! Feeds arbitrary `path?query` lines through the request decoder.
//!
//! Invariants checked:
//! - No panics on malformed percent-escapes or overlong fields
//! - Zone commands only ever come from the `/on` and `/off` paths
//!
//! cargo fuzz run fuzz_request_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use zonelight::app::commands::AppCommand;

fuzz_target!(|data: &[u8]| {
    let lossy = String::from_utf8_lossy(data);
    let (path, query) = lossy.split_once('?').unwrap_or((lossy.as_ref(), ""));
    let route = path.trim_end_matches('/');

    match AppCommand::from_request(path, query) {
        Some(AppCommand::Activate(_)) => assert_eq!(route, "/on"),
        Some(AppCommand::Deactivate(_)) => assert_eq!(route, "/off"),
        _ => {}
    }
});
