//! Scrolling marquee renderer
//!
//! A `Marquee` owns a small set of lanes (one per scrolling line), keeps
//! the shared frame counter, and blits the visible characters of each lane
//! onto a draw target. Lane tracks are replaced wholesale, so a render
//! pass never mixes characters from two generations of a message.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::Vec;

use solarium_core::scroll::{layout, Direction, ScrollState, VerticalAnchor};
use solarium_core::style::StyleRegistry;
use solarium_core::text::{GlyphMetrics, MessageTrack};

use crate::fonts::MonoGlyphs;

/// Maximum scrolling lanes per marquee
pub const MAX_LANES: usize = 4;

/// One independently-scrolling line of text
#[derive(Debug, Clone)]
pub struct Lane {
    track: MessageTrack,
    direction: Direction,
    anchor: VerticalAnchor,
}

impl Lane {
    /// Create a lane with an empty track
    pub fn new(direction: Direction, anchor: VerticalAnchor) -> Self {
        Self {
            track: MessageTrack::new(),
            direction,
            anchor,
        }
    }

    /// The active track
    pub fn track(&self) -> &MessageTrack {
        &self.track
    }

    /// Replace the track wholesale; takes effect on the next render
    pub fn set_track(&mut self, track: MessageTrack) {
        self.track = track;
    }
}

/// Multi-lane scrolling renderer
pub struct Marquee<'a> {
    registry: &'a StyleRegistry<'a, MonoGlyphs>,
    lanes: Vec<Lane, MAX_LANES>,
    frame: u32,
    width: u16,
    height: u16,
}

impl<'a> Marquee<'a> {
    /// Create a marquee for a viewport of the given pixel size
    pub fn new(registry: &'a StyleRegistry<'a, MonoGlyphs>, width: u16, height: u16) -> Self {
        Self {
            registry,
            lanes: Vec::new(),
            frame: 0,
            width,
            height,
        }
    }

    /// Add a lane; returns its index
    pub fn add_lane(&mut self, lane: Lane) -> Option<usize> {
        let index = self.lanes.len();
        self.lanes.push(lane).ok()?;
        Some(index)
    }

    /// Access a lane
    pub fn lane(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    /// Replace a lane's track wholesale
    pub fn set_track(&mut self, index: usize, track: MessageTrack) {
        if let Some(lane) = self.lanes.get_mut(index) {
            lane.set_track(track);
        }
    }

    /// Current frame counter
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Jump to a specific frame
    pub fn set_frame(&mut self, frame: u32) {
        self.frame = frame;
    }

    /// Advance to the next frame
    pub fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Blit all lanes for the current frame
    ///
    /// Only visible characters are drawn; each is one `Text` blit at its
    /// computed integer position.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for lane in &self.lanes {
            let state = ScrollState {
                frame: self.frame,
                viewport_width: self.width,
                track_width: lane.track.pixel_width(),
            };

            for placement in layout(&lane.track, &state, lane.direction) {
                if !placement.visible {
                    continue;
                }

                let glyphs = self.registry.metrics(placement.style);
                let y = match lane.anchor {
                    VerticalAnchor::Top => 0,
                    VerticalAnchor::Bottom => self.height as i32 - glyphs.line_height() as i32,
                };

                let mut buf = [0u8; 4];
                let ch = placement.ch.encode_utf8(&mut buf);
                let style = MonoTextStyle::new(glyphs.font(), BinaryColor::On);
                Text::with_baseline(ch, Point::new(placement.x, y), style, Baseline::Top)
                    .draw(target)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_graphics::mono_font::ascii::FONT_6X10;
    use solarium_core::text::TextRun;

    /// Draw target that records every lit pixel
    struct Recorder {
        pixels: std::vec::Vec<Point>,
        size: Size,
    }

    impl Recorder {
        fn new(width: u32, height: u32) -> Self {
            Self {
                pixels: std::vec::Vec::new(),
                size: Size::new(width, height),
            }
        }

        fn x_bounds(&self) -> (i32, i32) {
            let min = self.pixels.iter().map(|p| p.x).min().unwrap();
            let max = self.pixels.iter().map(|p| p.x).max().unwrap();
            (min, max)
        }
    }

    impl DrawTarget for Recorder {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
        where
            I: IntoIterator<Item = Pixel<BinaryColor>>,
        {
            for Pixel(point, color) in pixels {
                if color == BinaryColor::On {
                    self.pixels.push(point);
                }
            }
            Ok(())
        }
    }

    impl OriginDimensions for Recorder {
        fn size(&self) -> Size {
            self.size
        }
    }

    fn registry() -> &'static StyleRegistry<'static, MonoGlyphs> {
        static ENTRIES: &[(&str, MonoGlyphs)] = &[("message", MonoGlyphs::new(&FONT_6X10))];
        static REGISTRY: StyleRegistry<'static, MonoGlyphs> = StyleRegistry::new(ENTRIES, 0);
        &REGISTRY
    }

    fn run(text: &str) -> TextRun {
        let reg = registry();
        let id = reg.resolve("message").id;
        TextRun::measure(text, id, reg.metrics(id)).unwrap()
    }

    #[test]
    fn glyph_lands_at_computed_offset() {
        let reg = registry();
        let mut marquee = Marquee::new(reg, 64, 32);
        let lane = marquee
            .add_lane(Lane::new(Direction::Forward, VerticalAnchor::Top))
            .unwrap();

        let mut track = MessageTrack::new();
        track.push(run("H")).unwrap();
        marquee.set_track(lane, track);

        // offset = 64 - (54 % 70) = 10
        marquee.set_frame(54);
        let mut target = Recorder::new(64, 32);
        marquee.render(&mut target).unwrap();

        assert!(!target.pixels.is_empty());
        let (min_x, max_x) = target.x_bounds();
        assert!(min_x >= 10);
        assert!(max_x < 16);
        // Top anchor keeps the glyph in the first font row.
        assert!(target.pixels.iter().all(|p| p.y < 10));
    }

    #[test]
    fn bottom_anchor_pins_to_lower_edge() {
        let reg = registry();
        let mut marquee = Marquee::new(reg, 64, 32);
        let lane = marquee
            .add_lane(Lane::new(Direction::Forward, VerticalAnchor::Bottom))
            .unwrap();

        let mut track = MessageTrack::new();
        track.push(run("H")).unwrap();
        marquee.set_track(lane, track);

        marquee.set_frame(54);
        let mut target = Recorder::new(64, 32);
        marquee.render(&mut target).unwrap();

        assert!(target.pixels.iter().all(|p| p.y >= 22 && p.y < 32));
    }

    #[test]
    fn empty_lane_draws_nothing() {
        let reg = registry();
        let mut marquee = Marquee::new(reg, 64, 32);
        marquee
            .add_lane(Lane::new(Direction::Reverse, VerticalAnchor::Top))
            .unwrap();

        for _ in 0..200 {
            let mut target = Recorder::new(64, 32);
            marquee.render(&mut target).unwrap();
            assert!(target.pixels.is_empty());
            marquee.advance();
        }
    }

    #[test]
    fn forward_lane_moves_left_each_frame() {
        let reg = registry();
        let mut marquee = Marquee::new(reg, 64, 32);
        let lane = marquee
            .add_lane(Lane::new(Direction::Forward, VerticalAnchor::Top))
            .unwrap();

        let mut track = MessageTrack::new();
        track.push(run("H")).unwrap();
        marquee.set_track(lane, track);

        marquee.set_frame(30);
        let mut first = Recorder::new(64, 32);
        marquee.render(&mut first).unwrap();

        marquee.advance();
        let mut second = Recorder::new(64, 32);
        marquee.render(&mut second).unwrap();

        assert_eq!(first.x_bounds().0 - 1, second.x_bounds().0);
    }

    #[test]
    fn track_swap_is_wholesale() {
        let reg = registry();
        let mut marquee = Marquee::new(reg, 64, 32);
        let lane = marquee
            .add_lane(Lane::new(Direction::Forward, VerticalAnchor::Top))
            .unwrap();

        let mut wide = MessageTrack::new();
        wide.push(run("HHHHHH")).unwrap();
        marquee.set_track(lane, wide);

        // Replace with a narrow track; the next render reflects only it.
        let mut narrow = MessageTrack::new();
        narrow.push(run("H")).unwrap();
        marquee.set_track(lane, narrow.clone());

        assert_eq!(marquee.lane(lane).unwrap().track(), &narrow);
    }
}
