//! End-to-end zone engine behaviour through `AppService`.
//!
//! Time is driven explicitly: every test owns a monotonic millisecond
//! counter and ticks the service in fixed steps, exactly as the firmware
//! loop does.

use crate::mock_hw::{MockHardware, RecordingSink};

use zonelight::app::commands::AppCommand;
use zonelight::app::service::AppService;
use zonelight::clock::TimeOfDay;
use zonelight::config::{SystemConfig, ZONE_COUNT};
use zonelight::error::Error;
use zonelight::motion::CaptureMode;
use zonelight::schedule::OperatingMode;
use zonelight::snapshot::NEVER;
use zonelight::zones::{ChangeCause, ZoneChange, ZoneState};

// ── Rig ───────────────────────────────────────────────────────

struct Rig {
    app: AppService,
    hw: MockHardware,
    sink: RecordingSink,
    /// Monotonic time the rig started at.
    origin: u32,
    now: u32,
}

impl Rig {
    fn new(boot: (u8, u8), capture_mode: CaptureMode) -> Self {
        Self::starting_at(boot, capture_mode, 0)
    }

    fn starting_at(boot: (u8, u8), capture_mode: CaptureMode, now: u32) -> Self {
        let config = SystemConfig {
            boot_time: TimeOfDay::new(boot.0, boot.1).unwrap(),
            capture_mode,
            ..SystemConfig::default()
        };
        let mut rig = Self {
            app: AppService::new(config, now),
            hw: MockHardware::new(),
            sink: RecordingSink::new(),
            origin: now,
            now,
        };
        rig.app.start(&mut rig.hw, &mut rig.sink);
        rig.app.tick(now, &mut rig.hw, &mut rig.sink);
        rig
    }

    /// Tick every 100 ms up to and including `t` (relative to the start).
    fn advance_to(&mut self, t: u32) {
        self.advance_to_by(t, 100);
    }

    fn advance_to_by(&mut self, t: u32, step: u32) {
        while self.elapsed() < t {
            let next = (self.elapsed() + step).min(t);
            self.now = self.origin.wrapping_add(next);
            self.app.tick(self.now, &mut self.hw, &mut self.sink);
            self.assert_relays_mirror_state();
        }
    }

    fn elapsed(&self) -> u32 {
        self.now.wrapping_sub(self.origin)
    }

    fn cmd(&mut self, cmd: AppCommand) {
        self.app.handle_command(cmd, self.now, &mut self.hw, &mut self.sink);
        self.assert_relays_mirror_state();
    }

    fn active(&self, zone: usize) -> bool {
        self.app.zones().zone(zone).unwrap().is_active()
    }

    fn countdown(&self, zone: usize) -> u32 {
        self.app.snapshot().zones[zone].countdown_secs
    }

    fn assert_relays_mirror_state(&self) {
        for zone in 0..ZONE_COUNT {
            assert_eq!(
                self.active(zone),
                self.hw.energized[zone],
                "zone {zone}: active flag and relay output disagree"
            );
        }
    }
}

// ── Security mode timeout ─────────────────────────────────────

#[test]
fn manual_activation_in_security_times_out_after_300s() {
    let mut rig = Rig::new((19, 0), CaptureMode::Polling);
    assert_eq!(rig.app.mode(), OperatingMode::Security);

    rig.cmd(AppCommand::Activate(0));
    assert!(rig.active(0));

    rig.advance_to(299_000);
    assert!(rig.active(0));
    assert_eq!(rig.countdown(0), 1);

    // Exactly 300 s without motion is not yet "more than" the timeout.
    rig.advance_to(300_000);
    assert!(rig.active(0));

    rig.advance_to(301_000);
    assert!(!rig.active(0));
    assert_eq!(rig.countdown(0), 0);
    assert!(rig.sink.zone_changes().contains(&ZoneChange {
        zone: 0,
        active: false,
        cause: ChangeCause::Timeout,
    }));
}

#[test]
fn edge_motion_extends_the_timeout() {
    let mut rig = Rig::new((19, 0), CaptureMode::EdgeTriggered);
    rig.cmd(AppCommand::Activate(0));

    rig.advance_to(249_900);
    rig.hw.post_edge(0, 250_000);
    rig.advance_to(250_000);

    rig.advance_to(549_000);
    assert!(rig.active(0));
    rig.advance_to(551_000);
    assert!(!rig.active(0));
}

#[test]
fn polled_motion_extends_the_timeout() {
    let mut rig = Rig::new((19, 0), CaptureMode::Polling);
    rig.cmd(AppCommand::Activate(0));

    rig.advance_to(249_900);
    rig.hw.levels[0] = true;
    rig.advance_to(250_000);
    rig.hw.levels[0] = false;

    rig.advance_to(549_000);
    assert!(rig.active(0));
    rig.advance_to(551_000);
    assert!(!rig.active(0));
}

#[test]
fn zones_time_out_independently() {
    let mut rig = Rig::new((19, 0), CaptureMode::EdgeTriggered);
    rig.cmd(AppCommand::Activate(0));
    rig.cmd(AppCommand::Activate(1));

    rig.advance_to(199_900);
    rig.hw.post_edge(1, 200_000);

    rig.advance_to(301_000);
    assert!(!rig.active(0));
    assert!(rig.active(1));

    rig.advance_to(501_000);
    assert!(!rig.active(1));
}

#[test]
fn motion_never_switches_an_unlit_zone_on() {
    let mut rig = Rig::new((19, 0), CaptureMode::EdgeTriggered);
    rig.hw.post_edge(0, 50);
    rig.hw.levels = [true; ZONE_COUNT];
    rig.advance_to(10_000);

    assert!(!rig.active(0));
    assert!(!rig.active(1));
    assert!(rig.hw.energized.iter().all(|&e| !e));
    assert!(rig.sink.zone_changes().is_empty());
}

#[test]
fn stale_edge_cannot_rewind_last_motion() {
    let mut rig = Rig::new((19, 0), CaptureMode::EdgeTriggered);
    rig.advance_to(100_000);
    rig.cmd(AppCommand::Activate(0));

    rig.hw.post_edge(0, 40_000);
    rig.advance_to(100_100);
    assert_eq!(rig.app.zones().zone(0).unwrap().last_motion(), Some(100_000));
}

#[test]
fn timeout_survives_timer_wraparound() {
    let start = u32::MAX - 60_000;
    let mut rig = Rig::starting_at((19, 0), CaptureMode::Polling, start);
    rig.cmd(AppCommand::Activate(0));

    rig.advance_to(300_000);
    assert!(rig.active(0));
    rig.advance_to(300_500);
    assert!(!rig.active(0));
}

// ── Work mode ─────────────────────────────────────────────────

#[test]
fn work_mode_never_auto_offs() {
    let mut rig = Rig::new((9, 0), CaptureMode::Polling);
    assert_eq!(rig.app.mode(), OperatingMode::Work);

    rig.cmd(AppCommand::Activate(0));
    assert_eq!(
        rig.app.zones().zone(0).unwrap().state(),
        ZoneState::OnManual { activated_at: 0 }
    );

    // Two hours, still inside the 08:00–12:00 window.
    rig.advance_to_by(7_200_000, 1_000);
    assert!(rig.active(0));
    assert_eq!(rig.countdown(0), 0);
    assert!(rig.sink.zone_changes().iter().all(|c| c.cause == ChangeCause::Manual));
}

#[test]
fn motion_is_ignored_during_work() {
    let mut rig = Rig::new((9, 0), CaptureMode::EdgeTriggered);
    rig.cmd(AppCommand::Activate(0));
    rig.hw.post_edge(0, 5_000);
    rig.advance_to(6_000);

    assert_eq!(rig.app.zones().zone(0).unwrap().last_motion(), None);
    assert_eq!(rig.app.snapshot().zones[0].secs_since_motion, NEVER);
}

#[test]
fn closing_time_grants_a_full_timeout() {
    let mut rig = Rig::new((11, 59), CaptureMode::Polling);
    rig.cmd(AppCommand::Activate(0));

    // 12:00 is still work (inclusive end).
    rig.advance_to(60_000);
    assert_eq!(rig.app.mode(), OperatingMode::Work);

    // 12:01: Security, zone seeded with last_motion = now.
    rig.advance_to(120_000);
    assert_eq!(rig.app.mode(), OperatingMode::Security);
    assert_eq!(
        rig.sink.mode_changes(),
        vec![(OperatingMode::Work, OperatingMode::Security)]
    );
    let zone = rig.app.zones().zone(0).unwrap();
    assert_eq!(zone.state(), ZoneState::OnAuto { activated_at: 0 });
    assert_eq!(zone.last_motion(), Some(120_000));
    assert_eq!(rig.countdown(0), 300);

    rig.advance_to(420_000);
    assert!(rig.active(0));
    rig.advance_to(420_200);
    assert!(!rig.active(0));
}

#[test]
fn opening_time_exempts_lit_zones() {
    let mut rig = Rig::new((7, 59), CaptureMode::Polling);
    assert_eq!(rig.app.mode(), OperatingMode::Security);
    rig.cmd(AppCommand::Activate(1));

    rig.advance_to(60_000);
    assert_eq!(rig.app.mode(), OperatingMode::Work);
    assert_eq!(
        rig.app.zones().zone(1).unwrap().state(),
        ZoneState::OnManual { activated_at: 0 }
    );

    rig.advance_to_by(1_000_000, 1_000);
    assert!(rig.active(1));
}

// ── Manual commands ───────────────────────────────────────────

#[test]
fn deactivate_keeps_motion_history() {
    let mut rig = Rig::new((19, 0), CaptureMode::Polling);
    rig.cmd(AppCommand::Activate(0));
    rig.advance_to(10_000);
    rig.cmd(AppCommand::Deactivate(0));
    rig.advance_to(20_000);

    assert!(!rig.active(0));
    let status = &rig.app.snapshot().zones[0];
    assert_eq!(status.secs_since_motion, 20);
    assert_eq!(status.countdown_secs, 0);
}

#[test]
fn out_of_range_zone_is_rejected_without_side_effects() {
    let mut rig = Rig::new((19, 0), CaptureMode::Polling);
    let writes_before = rig.hw.writes.len();

    rig.cmd(AppCommand::Activate(ZONE_COUNT));
    rig.cmd(AppCommand::Deactivate(99));

    assert_eq!(
        rig.sink.rejections(),
        vec![Error::OutOfRangeZone(ZONE_COUNT), Error::OutOfRangeZone(99)]
    );
    assert_eq!(rig.hw.writes.len(), writes_before);
}

#[test]
fn invalid_set_time_leaves_clock_alone() {
    let mut rig = Rig::new((19, 0), CaptureMode::Polling);
    rig.advance_to(5_000);
    let before = rig.app.clock().hms();

    rig.cmd(AppCommand::SetTime { hour: 24, minute: 0 });
    rig.cmd(AppCommand::SetTime { hour: 10, minute: 60 });

    assert_eq!(rig.app.clock().hms(), before);
    assert_eq!(
        rig.sink.rejections(),
        vec![
            Error::InvalidTime { hour: 24, minute: 0 },
            Error::InvalidTime { hour: 10, minute: 60 }
        ]
    );
}

#[test]
fn setting_the_clock_flips_mode_on_next_cycle() {
    let mut rig = Rig::new((19, 0), CaptureMode::Polling);
    rig.cmd(AppCommand::Activate(0));
    rig.cmd(AppCommand::SetTime { hour: 8, minute: 30 });
    assert_eq!(rig.app.mode(), OperatingMode::Security);

    rig.advance_to(100);
    assert_eq!(rig.app.mode(), OperatingMode::Work);
    assert_eq!(
        rig.app.zones().zone(0).unwrap().state(),
        ZoneState::OnManual { activated_at: 0 }
    );
}

#[test]
fn rewinding_the_clock_does_not_move_the_timeout() {
    let mut rig = Rig::new((19, 0), CaptureMode::Polling);
    rig.cmd(AppCommand::Activate(0));

    rig.advance_to(100_000);
    assert_eq!(rig.countdown(0), 200);

    // 02:00 is still Security hours; only the displayed time moves.
    rig.cmd(AppCommand::SetTime { hour: 2, minute: 0 });
    rig.advance_to(100_100);
    assert_eq!(rig.app.mode(), OperatingMode::Security);
    assert_eq!(rig.app.clock().now(), TimeOfDay { hour: 2, minute: 0 });
    assert_eq!(rig.countdown(0), 199);

    rig.advance_to(300_000);
    assert!(rig.active(0));
    rig.advance_to(300_100);
    assert!(!rig.active(0));
}

#[test]
fn boot_drives_every_relay_off() {
    let rig = Rig::new((19, 0), CaptureMode::Polling);
    let boot_writes: Vec<_> = rig.hw.writes.iter().take(ZONE_COUNT).copied().collect();
    assert_eq!(boot_writes, (0..ZONE_COUNT).map(|z| (z, false)).collect::<Vec<_>>());
}
