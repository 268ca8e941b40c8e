//! Remote command handling task
//!
//! Turns raw broker payloads into replacement message tracks and appends
//! button glyphs to the current one. Each accepted update publishes a
//! fully-built track; the render task swaps it in wholesale, so a frame is
//! never drawn from a half-updated message. Rejected payloads only produce
//! a log line.

use defmt::{info, warn};
use embassy_futures::select::{select, Either};

use solarium_core::command;
use solarium_core::text::{MessageTrack, TextRun};

use crate::channels::{COMMANDS, GLYPHS, TRACK};
use crate::config;

#[embassy_executor::task]
pub async fn command_task() {
    info!("command task started");

    // Greeting until the first remote message arrives.
    let mut active = greeting_track();
    TRACK.signal(active.clone());

    loop {
        match select(COMMANDS.receive(), GLYPHS.receive()).await {
            Either::First(payload) => {
                match command::track_from_payload(&payload, config::styles()) {
                    Ok((track, substituted)) => {
                        if substituted {
                            warn!("unknown font in command, substituted default style");
                        }
                        info!("message replaced ({} px)", track.pixel_width());
                        active = track;
                        TRACK.signal(active.clone());
                    }
                    Err(e) => warn!("discarding command: {}", e),
                }
            }
            Either::Second(ch) => {
                append_glyph(&mut active, ch);
            }
        }
    }
}

fn greeting_track() -> MessageTrack {
    let reg = config::styles();
    let id = reg.default_id();
    let mut track = MessageTrack::new();
    match TextRun::measure(config::GREETING, id, reg.metrics(id)) {
        Ok(run) => {
            if track.push(run).is_err() {
                warn!("greeting does not fit in a track");
            }
        }
        Err(e) => warn!("greeting does not fit in a run: {}", e),
    }
    track
}

fn append_glyph(active: &mut MessageTrack, ch: char) {
    let reg = config::styles();
    let resolved = reg.resolve("butterfly");
    let mut buf = [0u8; 4];
    match TextRun::measure(ch.encode_utf8(&mut buf), resolved.id, reg.metrics(resolved.id)) {
        Ok(run) => {
            if active.push(run).is_err() {
                warn!("message full, dropping glyph");
                return;
            }
            TRACK.signal(active.clone());
        }
        Err(e) => warn!("glyph append failed: {}", e),
    }
}
