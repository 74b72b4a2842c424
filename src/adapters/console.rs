//! Serial console command transport.
//!
//! Reads request lines such as `/on?zone=0` or `/settime?time=07:30` from
//! the console UART on a dedicated thread and hands the decoded commands
//! to the control loop through the [`CommandInbox`].  Uses the same URL
//! surface as the web UI, so operators can drive the controller without
//! Wi-Fi.

use std::io::BufRead;
use std::time::Duration;

use log::{info, warn};

use crate::app::commands::AppCommand;
use crate::app::inbox::CommandInbox;

/// Console reads can return nothing when no host is attached.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Decode one console line (`/path?query`).
pub fn parse_line(line: &str) -> Option<AppCommand> {
    let line = line.trim();
    let (path, query) = line.split_once('?').unwrap_or((line, ""));
    AppCommand::from_request(path, query)
}

/// Spawn the console reader thread.
pub fn spawn(inbox: &'static CommandInbox, stack_kb: usize) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("console".into())
        .stack_size(stack_kb * 1024)
        .spawn(move || run(inbox))
}

fn run(inbox: &'static CommandInbox) {
    info!("Console: ready (e.g. /on?zone=0, /settime?time=08:00)");
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                std::thread::sleep(IDLE_POLL);
                continue;
            }
            Ok(_) => {}
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Some(cmd) => {
                if let Err(cmd) = inbox.submit(cmd) {
                    warn!("Console: inbox full, dropped {:?}", cmd);
                }
            }
            None => warn!("Console: unrecognised request '{}'", line.trim()),
        }
    }
}
