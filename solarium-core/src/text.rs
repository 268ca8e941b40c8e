//! Styled text runs and scrolling tracks
//!
//! A `TextRun` is an immutable, pre-measured piece of styled text; a
//! `MessageTrack` is an ordered sequence of runs forming one scrolling
//! lane. Tracks are replaced wholesale on update, never mutated in place,
//! so a borrow of a track is always a consistent snapshot.

use heapless::{String, Vec};

use crate::style::StyleId;

/// Maximum characters in a single text run
pub const MAX_RUN_LEN: usize = 64;

/// Maximum runs in a message track
pub const MAX_RUNS: usize = 8;

/// Per-character glyph metrics for one style
///
/// Implemented by the display layer for real fonts, and by tests with
/// fixed-width mocks.
pub trait GlyphMetrics {
    /// Horizontal advance of a character in pixels
    fn advance(&self, ch: char) -> u8;

    /// Line height of the style in pixels
    fn line_height(&self) -> u8;
}

/// Errors from composing text runs and tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextError {
    /// Run text exceeds [`MAX_RUN_LEN`] characters
    RunTooLong,
    /// Track already holds [`MAX_RUNS`] runs
    TooManyRuns,
}

/// An immutable run of text in a single style
///
/// The per-character pixel widths and the total width are measured once at
/// construction so the layout engine never touches font data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextRun {
    text: String<MAX_RUN_LEN>,
    style: StyleId,
    char_widths: Vec<u8, MAX_RUN_LEN>,
    pixel_width: u16,
}

impl TextRun {
    /// Measure `text` with the metrics of its style
    pub fn measure<M: GlyphMetrics>(
        text: &str,
        style: StyleId,
        metrics: &M,
    ) -> Result<Self, TextError> {
        let mut owned: String<MAX_RUN_LEN> = String::new();
        owned.push_str(text).map_err(|_| TextError::RunTooLong)?;

        let mut char_widths: Vec<u8, MAX_RUN_LEN> = Vec::new();
        let mut pixel_width: u16 = 0;
        for ch in text.chars() {
            let w = metrics.advance(ch);
            char_widths.push(w).map_err(|_| TextError::RunTooLong)?;
            pixel_width += w as u16;
        }

        Ok(Self {
            text: owned,
            style,
            char_widths,
            pixel_width,
        })
    }

    /// Style this run is rendered in
    pub fn style(&self) -> StyleId {
        self.style
    }

    /// The run text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Total pixel width of the run
    pub fn pixel_width(&self) -> u16 {
        self.pixel_width
    }

    /// Characters paired with their pixel widths
    pub fn chars(&self) -> RunChars<'_> {
        self.text.chars().zip(self.char_widths.iter().copied())
    }
}

/// Iterator over `(char, pixel_width)` pairs of a run
pub type RunChars<'a> =
    core::iter::Zip<core::str::Chars<'a>, core::iter::Copied<core::slice::Iter<'a, u8>>>;

/// One horizontal scrolling lane: an ordered sequence of runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageTrack {
    runs: Vec<TextRun, MAX_RUNS>,
}

impl MessageTrack {
    /// Create an empty track
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Append a run to the track
    pub fn push(&mut self, run: TextRun) -> Result<(), TextError> {
        self.runs.push(run).map_err(|_| TextError::TooManyRuns)
    }

    /// Runs in display order
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Aggregate pixel width of all runs
    pub fn pixel_width(&self) -> u16 {
        self.runs.iter().map(TextRun::pixel_width).sum()
    }

    /// Number of characters across all runs
    pub fn char_count(&self) -> usize {
        self.runs.iter().map(|r| r.char_widths.len()).sum()
    }

    /// A track with no pixels to show
    pub fn is_empty(&self) -> bool {
        self.pixel_width() == 0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Every character is `width` pixels wide
    pub(crate) struct FixedMetrics(pub u8);

    impl GlyphMetrics for FixedMetrics {
        fn advance(&self, _ch: char) -> u8 {
            self.0
        }

        fn line_height(&self) -> u8 {
            8
        }
    }

    #[test]
    fn run_is_measured_per_character() {
        let run = TextRun::measure("abc", StyleId::new(0), &FixedMetrics(5)).unwrap();
        assert_eq!(run.pixel_width(), 15);
        let widths: heapless::Vec<u8, 8> = run.chars().map(|(_, w)| w).collect();
        assert_eq!(&widths[..], &[5, 5, 5]);
    }

    #[test]
    fn run_rejects_overlong_text() {
        let mut long = heapless::String::<128>::new();
        for _ in 0..(MAX_RUN_LEN + 1) {
            long.push('x').unwrap();
        }
        let err = TextRun::measure(&long, StyleId::new(0), &FixedMetrics(4));
        assert_eq!(err, Err(TextError::RunTooLong));
    }

    #[test]
    fn track_aggregates_run_widths() {
        let metrics = FixedMetrics(4);
        let mut track = MessageTrack::new();
        track
            .push(TextRun::measure("hi", StyleId::new(0), &metrics).unwrap())
            .unwrap();
        track
            .push(TextRun::measure("there", StyleId::new(1), &metrics).unwrap())
            .unwrap();
        assert_eq!(track.pixel_width(), 8 + 20);
        assert_eq!(track.char_count(), 7);
        assert!(!track.is_empty());
    }

    #[test]
    fn empty_track_has_zero_width() {
        let track = MessageTrack::new();
        assert!(track.is_empty());
        assert_eq!(track.pixel_width(), 0);
        assert_eq!(track.char_count(), 0);
    }
}
