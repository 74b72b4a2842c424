//! Request decoding → inbox → `AppService` command pipeline.
//!
//! Mirrors the firmware loop: transports submit decoded requests to the
//! inbox, the loop drains it at the top of a cycle and then ticks.

use crate::mock_hw::{MockHardware, RecordingSink};

use zonelight::adapters::console;
use zonelight::app::commands::AppCommand;
use zonelight::app::inbox::CommandInbox;
use zonelight::app::service::AppService;
use zonelight::clock::TimeOfDay;
use zonelight::config::SystemConfig;
use zonelight::error::Error;
use zonelight::schedule::{self, OperatingMode, ScheduleWindow};

fn boot() -> (AppService, MockHardware, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default(), 0);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    app.tick(0, &mut hw, &mut sink);
    (app, hw, sink)
}

fn cycle(
    inbox: &CommandInbox,
    now: u32,
    app: &mut AppService,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
) {
    inbox.drain(|cmd| app.handle_command(cmd, now, hw, sink));
    app.tick(now, hw, sink);
}

fn submit(inbox: &CommandInbox, path: &str, query: &str) {
    let cmd = AppCommand::from_request(path, query).expect("request should decode");
    inbox.submit(cmd).expect("inbox has room");
}

#[test]
fn on_and_off_requests_drive_relays() {
    let (mut app, mut hw, mut sink) = boot();
    let inbox = CommandInbox::new();

    submit(&inbox, "/on", "zona=1");
    cycle(&inbox, 10, &mut app, &mut hw, &mut sink);
    assert!(hw.energized[1]);
    assert!(app.zones().zone(1).unwrap().is_active());

    submit(&inbox, "/off", "zone=1");
    cycle(&inbox, 20, &mut app, &mut hw, &mut sink);
    assert!(!hw.energized[1]);
}

#[test]
fn commands_apply_in_arrival_order() {
    let (mut app, mut hw, mut sink) = boot();
    let inbox = CommandInbox::new();

    submit(&inbox, "/on", "zone=0");
    submit(&inbox, "/off", "zone=0");
    submit(&inbox, "/on", "zone=0");
    cycle(&inbox, 10, &mut app, &mut hw, &mut sink);

    assert!(hw.energized[0]);
    let zone0: Vec<bool> = hw.writes.iter().filter(|(z, _)| *z == 0).map(|(_, on)| *on).collect();
    // Boot release, then on/off/on.
    assert_eq!(zone0, vec![false, true, false, true]);
}

#[test]
fn settime_request_switches_to_work_mode() {
    let (mut app, mut hw, mut sink) = boot();
    let inbox = CommandInbox::new();
    assert_eq!(app.mode(), OperatingMode::Security);

    submit(&inbox, "/settime", "time=08%3A15");
    cycle(&inbox, 10, &mut app, &mut hw, &mut sink);

    assert_eq!(app.clock().now(), TimeOfDay { hour: 8, minute: 15 });
    assert_eq!(app.mode(), OperatingMode::Work);
    assert_eq!(
        sink.mode_changes(),
        vec![(OperatingMode::Security, OperatingMode::Work)]
    );
}

#[test]
fn update_form_merges_onto_current_schedule() {
    let (mut app, mut hw, mut sink) = boot();
    let inbox = CommandInbox::new();

    // Extend the afternoon window past the boot time so the mode flips.
    submit(&inbox, "/update", "start1=14%3A00&end1=20%3A00");
    cycle(&inbox, 10, &mut app, &mut hw, &mut sink);

    let windows = app.schedule().windows();
    assert_eq!(windows[0], schedule::default_windows()[0]);
    assert_eq!(windows[1].end, TimeOfDay { hour: 20, minute: 0 });
    assert_eq!(app.mode(), OperatingMode::Work);
}

#[test]
fn malformed_update_is_rejected_as_a_whole() {
    let (mut app, mut hw, mut sink) = boot();
    let inbox = CommandInbox::new();

    submit(&inbox, "/update", "start0=06%3A00&end0=07%3A00&start1=18%3A00&end1=soon");
    cycle(&inbox, 10, &mut app, &mut hw, &mut sink);

    assert_eq!(app.schedule().windows(), schedule::default_windows().as_slice());
    assert_eq!(sink.rejections(), vec![Error::MalformedScheduleWindow { index: 1 }]);
}

#[test]
fn update_accepts_legacy_field_names() {
    let (mut app, mut hw, mut sink) = boot();
    let inbox = CommandInbox::new();

    submit(&inbox, "/update", "inicio0=07%3A00&fin0=11%3A00");
    cycle(&inbox, 10, &mut app, &mut hw, &mut sink);

    let windows = app.schedule().windows();
    assert_eq!(windows[0].start, TimeOfDay { hour: 7, minute: 0 });
    assert_eq!(windows[0].end, TimeOfDay { hour: 11, minute: 0 });
    assert_eq!(windows[1], schedule::default_windows()[1]);
    assert!(sink.rejections().is_empty());
}

#[test]
fn update_without_window_fields_is_rejected() {
    let (mut app, mut hw, mut sink) = boot();
    let inbox = CommandInbox::new();

    submit(&inbox, "/update", "desde0=07%3A00&hasta0=11%3A00");
    cycle(&inbox, 10, &mut app, &mut hw, &mut sink);

    assert_eq!(app.schedule().windows(), schedule::default_windows().as_slice());
    assert_eq!(sink.rejections(), vec![Error::MalformedScheduleWindow { index: 0 }]);
}

#[test]
fn full_schedule_replacement() {
    let (mut app, mut hw, mut sink) = boot();
    let night = ScheduleWindow::new(
        TimeOfDay { hour: 18, minute: 0 },
        TimeOfDay { hour: 23, minute: 59 },
    )
    .unwrap();
    let mut windows = schedule::Windows::new();
    windows.push(night).unwrap();

    app.handle_command(AppCommand::SetSchedule(windows), 5, &mut hw, &mut sink);
    app.tick(10, &mut hw, &mut sink);

    assert_eq!(app.schedule().windows(), &[night]);
    assert_eq!(app.mode(), OperatingMode::Work);
}

#[test]
fn out_of_range_zone_request_is_reported() {
    let (mut app, mut hw, mut sink) = boot();
    let inbox = CommandInbox::new();

    submit(&inbox, "/on", "zone=5");
    cycle(&inbox, 10, &mut app, &mut hw, &mut sink);

    assert_eq!(sink.rejections(), vec![Error::OutOfRangeZone(5)]);
    assert!(hw.energized.iter().all(|&on| !on));
}

#[test]
fn console_lines_use_the_same_surface() {
    let (mut app, mut hw, mut sink) = boot();
    let inbox = CommandInbox::new();

    inbox.submit(console::parse_line("/on?zone=0\n").unwrap()).unwrap();
    cycle(&inbox, 10, &mut app, &mut hw, &mut sink);
    assert!(hw.energized[0]);
}

#[test]
fn snapshot_json_reflects_commands() {
    let (mut app, mut hw, mut sink) = boot();
    let inbox = CommandInbox::new();

    submit(&inbox, "/on", "zone=0");
    cycle(&inbox, 10, &mut app, &mut hw, &mut sink);

    let snap = sink.last_snapshot().expect("command forces a snapshot");
    assert!(snap.zones[0].active);
    assert_eq!(snap.zones[0].countdown_secs, 300);

    let json = snap.to_json().unwrap();
    assert!(json.contains("\"mode\":\"Security\""));
    assert!(json.contains("\"state\":\"on_auto\""));
    assert!(json.contains("\"activity\":["));
}
