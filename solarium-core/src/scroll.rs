//! Scroll layout engine
//!
//! Computes per-character pixel positions for a horizontally scrolling
//! track. The layout is a pure function of the frame counter, the viewport
//! width and the track width: the track enters from one edge, crosses the
//! viewport, and wraps seamlessly once fully off the other side, with
//! period `viewport_width + track_width`.

use crate::style::StyleId;
use crate::text::{MessageTrack, RunChars, TextRun};

/// Scroll direction of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// New content enters at the right edge and exits left
    Forward,
    /// New content enters at the left edge and exits right
    Reverse,
}

/// Vertical pinning of a lane within the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VerticalAnchor {
    /// Glyph tops pinned to the top edge
    Top,
    /// Glyph bottoms pinned to the bottom edge
    Bottom,
}

/// Scroll position of one track
///
/// `frame` increases monotonically; everything else about the scroll is
/// derived from it, so there is no hidden state to tear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    /// Monotonically increasing frame counter
    pub frame: u32,
    /// Viewport width in pixels
    pub viewport_width: u16,
    /// Total track width in pixels
    pub track_width: u16,
}

impl ScrollState {
    /// State at frame zero
    pub fn new(viewport_width: u16, track_width: u16) -> Self {
        Self {
            frame: 0,
            viewport_width,
            track_width,
        }
    }

    /// State for a measured track
    pub fn for_track(viewport_width: u16, track: &MessageTrack) -> Self {
        Self::new(viewport_width, track.pixel_width())
    }

    /// Advance to the next frame
    pub fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Wrap period in frames (one pixel per frame)
    pub fn period(&self) -> u32 {
        self.viewport_width as u32 + self.track_width as u32
    }

    /// Left-edge x-coordinate of the track for the current frame
    ///
    /// Forward tracks start one viewport-width off the left edge (i.e.
    /// fully off-screen right) and move left; reverse tracks start fully
    /// off-screen left and move right.
    pub fn offset(&self, direction: Direction) -> i32 {
        let period = self.period();
        if period == 0 {
            return 0;
        }
        let phase = (self.frame % period) as i32;
        match direction {
            Direction::Forward => self.viewport_width as i32 - phase,
            Direction::Reverse => phase - self.track_width as i32,
        }
    }
}

/// One laid-out character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CharPlacement {
    /// The character
    pub ch: char,
    /// Style of the run the character belongs to
    pub style: StyleId,
    /// Left-edge x-coordinate in viewport pixels
    pub x: i32,
    /// Pixel width of the character
    pub width: u8,
    /// Whether any part of the character lies within the viewport
    pub visible: bool,
}

/// Lay out a track for the current frame
///
/// Walks the track's characters left to right, accumulating an x-cursor
/// from the scroll offset. A character is visible while its left edge lies
/// in `[-width, viewport_width]`. The iterator stops once the cursor has
/// moved past the right edge, since every later character is provably
/// off-screen.
///
/// A zero-width track (or a zero period) yields nothing for any frame.
pub fn layout<'a>(track: &'a MessageTrack, state: &ScrollState, direction: Direction) -> Layout<'a> {
    if track.is_empty() || state.period() == 0 {
        return Layout {
            runs: [].iter(),
            current: None,
            x: 0,
            viewport: 0,
            done: true,
        };
    }

    let mut runs = track.runs().iter();
    let current = runs.next().map(|r| (r.style(), r.chars()));
    Layout {
        runs,
        current,
        x: state.offset(direction),
        viewport: state.viewport_width as i32,
        done: false,
    }
}

/// Iterator over [`CharPlacement`]s of one frame
pub struct Layout<'a> {
    runs: core::slice::Iter<'a, TextRun>,
    current: Option<(StyleId, RunChars<'a>)>,
    x: i32,
    viewport: i32,
    done: bool,
}

impl<'a> Iterator for Layout<'a> {
    type Item = CharPlacement;

    fn next(&mut self) -> Option<CharPlacement> {
        if self.done {
            return None;
        }
        loop {
            // Everything further right is off-screen.
            if self.x > self.viewport {
                self.done = true;
                return None;
            }

            let Some((style, chars)) = self.current.as_mut() else {
                self.done = true;
                return None;
            };

            if let Some((ch, width)) = chars.next() {
                let x = self.x;
                self.x += width as i32;
                let visible = x >= -(width as i32) && x <= self.viewport;
                return Some(CharPlacement {
                    ch,
                    style: *style,
                    x,
                    width,
                    visible,
                });
            }

            // Run exhausted; move to the next one.
            self.current = self.runs.next().map(|r| (r.style(), r.chars()));
        }
    }
}
