//! Fuzz target: `ScheduleEdit::from_form` + `Schedule::apply_edit`
//!
//! Splits arbitrary bytes into `key=value` pairs on `&`, builds an edit and
//! applies it to the default schedule.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A rejected edit leaves the schedule untouched
//! - An accepted edit leaves only well-formed windows behind
//!
//! cargo fuzz run fuzz_schedule_form

#![no_main]

use libfuzzer_sys::fuzz_target;
use zonelight::schedule::{MAX_WINDOWS, Schedule, ScheduleEdit};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let fields: Vec<(&str, &str)> = text
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .collect();
    let edit = ScheduleEdit::from_form(&fields);

    let mut schedule = Schedule::default();
    let before = schedule.windows().to_vec();

    match schedule.apply_edit(&edit) {
        Ok(()) => {
            assert!(schedule.windows().len() <= MAX_WINDOWS);
            for w in schedule.windows() {
                assert!(w.start <= w.end, "accepted an inverted window");
            }
        }
        Err(_) => assert_eq!(schedule.windows(), before.as_slice()),
    }
});
