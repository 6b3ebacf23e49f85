//! Font metrics and rasterization.
//!
//! `FontFace` is the boundary to the rasterizer: vertical and horizontal
//! metrics in font design units, pair kerning, and single-glyph bitmaps.
//! `FontInfo` implements it on top of `fontdue`. Layout and atlas baking are
//! written against the trait so they never touch the rasterizer directly.

mod info;

#[cfg(test)]
pub(crate) mod fake;

pub use info::FontInfo;

/// Codepoint of the line feed that breaks layout onto a new line.
pub const LINE_FEED: u32 = 0x0A;

/// Font-wide vertical metrics in design units.
///
/// `ascent >= 0 >= descent` for every font accepted by `FontInfo::load`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalMetrics {
    pub ascent: i32,
    pub descent: i32,
    pub line_gap: i32,
}

impl VerticalMetrics {
    /// Baseline-to-baseline distance in design units.
    pub fn line_advance(&self) -> i32 {
        self.ascent - self.descent + self.line_gap
    }
}

/// Horizontal metrics of one codepoint in design units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HMetrics {
    pub advance_width: i32,
    pub left_side_bearing: i32,
}

/// Bitmap extent of one glyph at one scale, without the coverage.
///
/// `x_offset`/`y_offset` locate the top-left corner relative to a pen
/// sitting on the baseline, with y pointing down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphBox {
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl GlyphBox {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Coverage bitmap of one glyph at one scale.
///
/// `x_offset`/`y_offset` locate the bitmap's top-left corner relative to a
/// pen sitting on the baseline, with y pointing down (so `y_offset` is
/// usually negative).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
    /// Row-major, `width * height` bytes.
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Metrics and rasterization for one parsed font.
///
/// Codepoints are `u32` rather than `char` so unpaired surrogates coming out
/// of UTF-16 decoding can be queried; a face treats them like any other
/// unmapped codepoint.
pub trait FontFace {
    /// Unscaled ascent, descent, and line gap.
    fn vertical_metrics(&self) -> VerticalMetrics;

    /// Design-unit-to-pixel factor that makes `ascent - descent` span
    /// `pixel_height` pixels.
    fn scale_for_pixel_height(&self, pixel_height: f32) -> f32 {
        let vm = self.vertical_metrics();
        let height = vm.ascent - vm.descent;
        if height <= 0 {
            return 0.0;
        }
        pixel_height / height as f32
    }

    fn horizontal_metrics(&self, codepoint: u32) -> HMetrics;

    /// Pair adjustment in design units; 0 when the font has no entry.
    fn kern_advance(&self, first: u32, second: u32) -> i32;

    /// Size and placement of the bitmap `rasterize` would produce, computed
    /// from the outline bounds alone.
    fn glyph_box(&self, codepoint: u32, scale: f32) -> GlyphBox;

    /// Rasterize `codepoint` with design units multiplied by `scale`.
    fn rasterize(&self, codepoint: u32, scale: f32) -> GlyphBitmap;
}

impl<F: FontFace + ?Sized> FontFace for &F {
    fn vertical_metrics(&self) -> VerticalMetrics {
        (**self).vertical_metrics()
    }

    fn scale_for_pixel_height(&self, pixel_height: f32) -> f32 {
        (**self).scale_for_pixel_height(pixel_height)
    }

    fn horizontal_metrics(&self, codepoint: u32) -> HMetrics {
        (**self).horizontal_metrics(codepoint)
    }

    fn kern_advance(&self, first: u32, second: u32) -> i32 {
        (**self).kern_advance(first, second)
    }

    fn glyph_box(&self, codepoint: u32, scale: f32) -> GlyphBox {
        (**self).glyph_box(codepoint, scale)
    }

    fn rasterize(&self, codepoint: u32, scale: f32) -> GlyphBitmap {
        (**self).rasterize(codepoint, scale)
    }
}
