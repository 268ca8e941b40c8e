//! Display abstraction and marquee renderer for Solarium
//!
//! This crate provides:
//! - `MonoGlyphs`: glyph metrics adapter for `embedded-graphics` mono fonts
//! - `Lane` / `Marquee`: the scrolling renderer that lays out each lane via
//!   the core scroll engine and blits visible characters onto any
//!   `DrawTarget<Color = BinaryColor>`
//!
//! The firmware drives a `Marquee` once per animation frame; the actual
//! display hardware (SSD1306 over SPI, the simulator, test recorders) only
//! has to implement `DrawTarget`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod fonts;
pub mod marquee;

pub use fonts::MonoGlyphs;
pub use marquee::{Lane, Marquee, MAX_LANES};
