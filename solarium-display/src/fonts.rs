//! Glyph metrics adapters for `embedded-graphics` monospace fonts

use embedded_graphics::mono_font::MonoFont;

use solarium_core::text::GlyphMetrics;

/// A registry entry wrapping a monospace font
///
/// Mono fonts advance every character by the same amount, so the
/// per-character width table of a run degenerates to a constant; the core
/// layout engine does not care either way.
pub struct MonoGlyphs {
    font: &'static MonoFont<'static>,
}

impl MonoGlyphs {
    /// Wrap a font for registry use
    pub const fn new(font: &'static MonoFont<'static>) -> Self {
        Self { font }
    }

    /// The underlying font, for text styling at draw time
    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }
}

impl GlyphMetrics for MonoGlyphs {
    fn advance(&self, _ch: char) -> u8 {
        (self.font.character_size.width + self.font.character_spacing) as u8
    }

    fn line_height(&self) -> u8 {
        self.font.character_size.height as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    #[test]
    fn mono_font_metrics() {
        let glyphs = MonoGlyphs::new(&FONT_6X10);
        assert_eq!(glyphs.advance('W'), 6);
        assert_eq!(glyphs.advance('i'), 6);
        assert_eq!(glyphs.line_height(), 10);
    }
}
