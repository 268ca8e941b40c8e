//! Inter-task communication
//!
//! Tasks never share mutable state directly. Latest-value data (the
//! current reading, the active message track) goes through signals: the
//! producer publishes a fully-constructed value and the consumer takes the
//! freshest one at its own pace, keeping its previous copy when nothing
//! new arrived. Queued data (telemetry, raw commands, button glyphs) goes
//! through bounded channels and is dropped with a log line when full.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::Vec;

use solarium_core::reading::{SensorReading, TelemetryRecord};
use solarium_core::text::MessageTrack;

/// Maximum raw command payload accepted from the broker
pub const MAX_CMD_LEN: usize = 512;

/// Raw command payload, copied out of the MQTT receive buffer
pub type CommandPayload = Vec<u8, MAX_CMD_LEN>;

/// Latest sensor reading (written by the sensor task)
pub static READING: Signal<CriticalSectionRawMutex, SensorReading> = Signal::new();

/// Replacement message track (written by the command task)
pub static TRACK: Signal<CriticalSectionRawMutex, MessageTrack> = Signal::new();

/// Telemetry records awaiting publish
pub static TELEMETRY: Channel<CriticalSectionRawMutex, TelemetryRecord, 4> = Channel::new();

/// Raw command payloads from the broker
pub static COMMANDS: Channel<CriticalSectionRawMutex, CommandPayload, 2> = Channel::new();

/// Decorative glyphs to append to the message (from the green button)
pub static GLYPHS: Channel<CriticalSectionRawMutex, char, 4> = Channel::new();
