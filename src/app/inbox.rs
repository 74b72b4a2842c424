//! Lock-free command hand-off from transport tasks to the control loop.
//!
//! ```text
//!  HTTP handler task ──submit()──▶ ┌────────────┐
//!  serial console    ──submit()──▶ │ Q8 (mpmc)  │ ──drain()──▶ control loop
//!                                  └────────────┘
//! ```
//!
//! The loop drains the inbox at the start of every cycle and applies each
//! command immediately, in arrival order.

use heapless::mpmc::Q8;

use super::commands::AppCommand;

pub struct CommandInbox {
    queue: Q8<AppCommand>,
}

impl Default for CommandInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInbox {
    /// `const` so the firmware can keep the inbox in a `static`.
    pub const fn new() -> Self {
        Self { queue: Q8::new() }
    }

    /// Queue a command.  When full the command is handed back.
    pub fn submit(&self, cmd: AppCommand) -> Result<(), AppCommand> {
        self.queue.enqueue(cmd)
    }

    /// Pop the oldest pending command.
    pub fn take(&self) -> Option<AppCommand> {
        self.queue.dequeue()
    }

    /// Feed every pending command to `handler`, oldest first.
    pub fn drain(&self, mut handler: impl FnMut(AppCommand)) {
        while let Some(cmd) = self.take() {
            handler(cmd);
        }
    }
}
