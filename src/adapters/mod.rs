//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                |
//! |----------------|--------------------|----------------------------|
//! | `hardware`     | MotionSensorPort   | PIR inputs, ISR mailbox    |
//! |                | ZoneActuatorPort   | Relay outputs              |
//! | `log_sink`     | EventSink          | Serial log output          |
//! | `console`      | (command source)   | UART console → inbox       |
//! | `time`         | (time source)      | ESP32 system timer         |

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod time;
