//! Synthetic font with exact metrics for unit tests.
//!
//! Units per em are chosen so `scale_for_pixel_height(32.0)` is exactly
//! 1/32 and every scaled quantity is representable without rounding.

use std::cell::Cell;

use super::{FontFace, GlyphBitmap, GlyphBox, HMetrics, VerticalMetrics};

pub(crate) const ASCENT: i32 = 768;
pub(crate) const DESCENT: i32 = -256;
pub(crate) const LINE_GAP: i32 = 128;

/// Advance of every glyph except space and `W`.
pub(crate) const ADVANCE: i32 = 512;
pub(crate) const SPACE_ADVANCE: i32 = 256;
pub(crate) const WIDE_ADVANCE: i32 = 1024;

/// Kerning pairs in design units.
const KERNING: &[(char, char, i32)] = &[
    ('A', 'V', -128),
    ('A', 'B', -64),
    ('A', '\t', 128),
    ('A', '\n', 96),
];

#[derive(Debug, Default)]
pub(crate) struct FakeFace {
    rasterized: Cell<usize>,
}

impl FakeFace {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of `rasterize` calls so far.
    pub(crate) fn rasterized(&self) -> usize {
        self.rasterized.get()
    }
}

impl FontFace for FakeFace {
    fn vertical_metrics(&self) -> VerticalMetrics {
        VerticalMetrics {
            ascent: ASCENT,
            descent: DESCENT,
            line_gap: LINE_GAP,
        }
    }

    fn horizontal_metrics(&self, codepoint: u32) -> HMetrics {
        let advance_width = match char::from_u32(codepoint) {
            Some(' ') => SPACE_ADVANCE,
            Some('W') => WIDE_ADVANCE,
            _ => ADVANCE,
        };
        HMetrics {
            advance_width,
            left_side_bearing: 32,
        }
    }

    fn kern_advance(&self, first: u32, second: u32) -> i32 {
        KERNING
            .iter()
            .find(|(a, b, _)| u32::from(*a) == first && u32::from(*b) == second)
            .map_or(0, |&(_, _, k)| k)
    }

    /// Boxes of 384x640 units (960 wide for `W`), 32 units right of the pen,
    /// sitting on the baseline. Space is empty.
    fn glyph_box(&self, codepoint: u32, scale: f32) -> GlyphBox {
        if codepoint == u32::from(' ') {
            return GlyphBox::default();
        }
        let units_w = if codepoint == u32::from('W') { 960.0 } else { 384.0 };
        let height = (640.0 * scale).round() as u32;
        GlyphBox {
            width: (units_w * scale).round() as u32,
            height,
            x_offset: (32.0 * scale).round() as i32,
            y_offset: -(height as i32),
        }
    }

    /// Coverage bytes are the low bits of the codepoint so baked pixels can
    /// be traced back to their glyph.
    fn rasterize(&self, codepoint: u32, scale: f32) -> GlyphBitmap {
        self.rasterized.set(self.rasterized.get() + 1);
        let b = self.glyph_box(codepoint, scale);
        GlyphBitmap {
            width: b.width,
            height: b.height,
            x_offset: b.x_offset,
            y_offset: b.y_offset,
            coverage: vec![(codepoint as u8) | 1; b.width as usize * b.height as usize],
        }
    }
}
