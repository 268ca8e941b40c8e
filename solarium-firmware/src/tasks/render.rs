//! Render task
//!
//! Drives the marquee at the fixed frame cadence. Each frame picks up the
//! freshest reading and message track without blocking, redraws both
//! lanes, and flushes the panel. When no new data arrived the previous
//! snapshot keeps scrolling.

use defmt::{info, warn, Debug2Format};
use embassy_time::{Duration, Ticker};

use solarium_core::reading::SensorReading;
use solarium_core::scroll::{Direction, VerticalAnchor};
use solarium_core::text::{MessageTrack, TextError, TextRun};
use solarium_display::{Lane, Marquee};

use crate::channels::{READING, TRACK};
use crate::config;
use crate::display::{Oled, HEIGHT, WIDTH};

#[embassy_executor::task]
pub async fn render_task(mut display: Oled) {
    info!("render task started");

    let reg = config::styles();
    let mut marquee = Marquee::new(reg, WIDTH, HEIGHT);
    // Status on top scrolling right, message on the bottom scrolling left.
    let status_lane = match marquee.add_lane(Lane::new(Direction::Reverse, VerticalAnchor::Top)) {
        Some(index) => index,
        None => defmt::panic!("marquee lane table full"),
    };
    let message_lane =
        match marquee.add_lane(Lane::new(Direction::Forward, VerticalAnchor::Bottom)) {
            Some(index) => index,
            None => defmt::panic!("marquee lane table full"),
        };

    let mut ticker = Ticker::every(Duration::from_millis(config::FRAME_INTERVAL_MS));

    loop {
        if let Some(reading) = READING.try_take() {
            match status_track(&reading) {
                Ok(track) => marquee.set_track(status_lane, track),
                Err(e) => warn!("status line rebuild failed: {}", e),
            }
        }
        if let Some(track) = TRACK.try_take() {
            marquee.set_track(message_lane, track);
        }

        display.clear_buffer();
        if marquee.render(&mut display).is_err() {
            warn!("marquee draw failed");
        }
        if let Err(e) = display.flush() {
            warn!("display flush failed: {}", Debug2Format(&e));
        }

        marquee.advance();
        ticker.next().await;
    }
}

fn status_track(reading: &SensorReading) -> Result<MessageTrack, TextError> {
    let reg = config::styles();
    let resolved = reg.resolve("status");
    let text = reading.status_text();
    let run = TextRun::measure(&text, resolved.id, reg.metrics(resolved.id))?;
    let mut track = MessageTrack::new();
    track.push(run)?;
    Ok(track)
}
