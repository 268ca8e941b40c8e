//! Board-agnostic core logic for the Solarium greenhouse monitor
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Styled text runs and scrolling tracks
//! - Scroll layout engine (per-character pixel placement)
//! - Tick schedule arithmetic for the periodic task runner
//! - Remote command parsing (JSON message updates)
//! - Sensor reading types and telemetry payloads
//! - Temperature alarm thresholds
//! - Hardware abstraction traits (environment sensor)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod alarm;
pub mod command;
pub mod reading;
pub mod schedule;
pub mod scroll;
pub mod style;
pub mod text;
pub mod traits;
