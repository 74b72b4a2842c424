//! Zonelight Firmware: Main Entry Point
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink   Esp32TimeAdapter        │
//! │  (MotionSensor+Zone)    (EventSink)    (monotonic ms)          │
//! │  console thread ──▶ CommandInbox                               │
//! │  PIR ISRs       ──▶ PIR_MAILBOX                                │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Clock · Schedule · Zones · Snapshot                   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver, Pull};
use log::{info, warn};

use zonelight::adapters::console;
use zonelight::adapters::hardware::HardwareAdapter;
use zonelight::adapters::log_sink::LogEventSink;
use zonelight::adapters::time::Esp32TimeAdapter;
use zonelight::app::inbox::CommandInbox;
use zonelight::app::service::AppService;
use zonelight::config::SystemConfig;
use zonelight::drivers::pir::{PIR_MAILBOX, PirInput};
use zonelight::drivers::relay::RelayPair;
use zonelight::drivers::{hw_init, watchdog::Watchdog};
use zonelight::motion::CaptureMode;
use zonelight::pins;

/// Commands from transport threads, drained at the top of every cycle.
static INBOX: CommandInbox = CommandInbox::new();

const WATCHDOG_TIMEOUT_MS: u32 = 5_000;
const CONSOLE_STACK_KB: usize = 4;

fn pir_input(gpio: i32) -> Result<PirInput<PinDriver<'static, AnyIOPin, esp_idf_svc::hal::gpio::Input>>> {
    // SAFETY: every GPIO number in `pins` is claimed exactly once, here or
    // in `relay_output`, and nothing else takes `Peripherals`.
    let mut pin = PinDriver::input(unsafe { AnyIOPin::new(gpio) })?;
    pin.set_pull(Pull::Down)?;
    Ok(PirInput::new(pin))
}

fn relay_output(gpio: i32) -> Result<PinDriver<'static, AnyOutputPin, esp_idf_svc::hal::gpio::Output>> {
    // SAFETY: see `pir_input`.
    Ok(PinDriver::output(unsafe { AnyOutputPin::new(gpio) })?)
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Zonelight v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();

    // ── 2. Peripherals ────────────────────────────────────────
    let [pir1, pir2] = pins::PIR_GPIOS;
    let [[r1a, r1b], [r2a, r2b]] = pins::RELAY_GPIOS;

    let mut hw = HardwareAdapter::new(
        [pir_input(pir1)?, pir_input(pir2)?],
        [
            RelayPair::new(relay_output(r1a)?, relay_output(r1b)?),
            RelayPair::new(relay_output(r2a)?, relay_output(r2b)?),
        ],
        &PIR_MAILBOX,
    );

    if config.capture_mode == CaptureMode::EdgeTriggered {
        if let Err(e) = hw_init::init_pir_interrupts() {
            log::error!("PIR interrupts unavailable: {}", e);
            return Err(e.into());
        }
    }
    let watchdog = Watchdog::new(WATCHDOG_TIMEOUT_MS);

    // ── 3. Application service ────────────────────────────────
    let time = Esp32TimeAdapter::new();
    let mut log_sink = LogEventSink::default();
    let mut app = AppService::new(config.clone(), time.now_ms());
    app.start(&mut hw, &mut log_sink);

    // ── 4. Command transports ─────────────────────────────────
    if let Err(e) = console::spawn(&INBOX, CONSOLE_STACK_KB) {
        warn!("Console thread not started: {}", e);
    }

    info!(
        "System ready. Entering control loop ({} ms cycle, {} ms watchdog).",
        config.cycle_period_ms,
        watchdog.timeout_ms()
    );

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        let now_ms = time.now_ms();

        INBOX.drain(|cmd| app.handle_command(cmd, now_ms, &mut hw, &mut log_sink));
        app.tick(now_ms, &mut hw, &mut log_sink);

        watchdog.feed();
        FreeRtos::delay_ms(config.cycle_period_ms);
    }
}
