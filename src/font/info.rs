//! `fontdue`-backed font: owns the parsed face and answers metric queries.

use super::{FontFace, GlyphBitmap, GlyphBox, HMetrics, VerticalMetrics};
use crate::error::{Result, TextError};

/// A parsed font file.
///
/// Metrics are read with `px == units_per_em`, where fontdue's scale factor
/// is 1 and its results are plain design units.
pub struct FontInfo {
    font: fontdue::Font,
    units_per_em: f32,
    vertical: VerticalMetrics,
}

impl std::fmt::Debug for FontInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontInfo")
            .field("units_per_em", &self.units_per_em)
            .field("glyph_count", &self.font.glyph_count())
            .field("vertical", &self.vertical)
            .finish()
    }
}

impl FontInfo {
    /// Parse font bytes.
    ///
    /// Fails with `FontParse` for unrecognized data and for fonts whose
    /// vertical metrics cannot produce a positive line height.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| TextError::FontParse(e.to_owned()))?;
        let units_per_em = font.units_per_em();
        if units_per_em <= 0.0 {
            return Err(TextError::FontParse(format!(
                "invalid units per em: {units_per_em}"
            )));
        }

        let lm = font.horizontal_line_metrics(units_per_em).ok_or_else(|| {
            TextError::FontParse("font has no horizontal line metrics".to_owned())
        })?;
        let vertical = VerticalMetrics {
            ascent: lm.ascent.round() as i32,
            descent: lm.descent.round() as i32,
            line_gap: lm.line_gap.round() as i32,
        };
        if vertical.ascent < 0 || vertical.descent > 0 || vertical.ascent == vertical.descent {
            return Err(TextError::FontParse(format!(
                "degenerate vertical metrics: ascent {} descent {}",
                vertical.ascent, vertical.descent
            )));
        }

        log::info!(
            "font: parsed {} glyphs, {} units/em, ascent {} descent {} line gap {}",
            font.glyph_count(),
            units_per_em,
            vertical.ascent,
            vertical.descent,
            vertical.line_gap,
        );

        Ok(Self {
            font,
            units_per_em,
            vertical,
        })
    }

    pub fn units_per_em(&self) -> f32 {
        self.units_per_em
    }

    pub fn glyph_count(&self) -> u16 {
        self.font.glyph_count()
    }

    /// Whether the font maps `codepoint` to a real glyph (not `.notdef`).
    pub fn has_glyph(&self, codepoint: u32) -> bool {
        self.glyph_index(codepoint) != 0
    }

    /// Glyph index for `codepoint`; surrogates and unmapped values give 0.
    fn glyph_index(&self, codepoint: u32) -> u16 {
        char::from_u32(codepoint).map_or(0, |ch| self.font.lookup_glyph_index(ch))
    }

    /// Pixel size fontdue rasterizes at for `scale`, if drawable.
    fn raster_px(&self, scale: f32) -> Option<f32> {
        let px = scale * self.units_per_em;
        (px > 0.0 && px.is_finite()).then_some(px)
    }
}

impl FontFace for FontInfo {
    fn vertical_metrics(&self) -> VerticalMetrics {
        self.vertical
    }

    fn horizontal_metrics(&self, codepoint: u32) -> HMetrics {
        let m = self
            .font
            .metrics_indexed(self.glyph_index(codepoint), self.units_per_em);
        HMetrics {
            advance_width: m.advance_width.round() as i32,
            left_side_bearing: m.bounds.xmin.round() as i32,
        }
    }

    fn kern_advance(&self, first: u32, second: u32) -> i32 {
        match (char::from_u32(first), char::from_u32(second)) {
            (Some(left), Some(right)) => self
                .font
                .horizontal_kern(left, right, self.units_per_em)
                .map_or(0, |k| k.round() as i32),
            _ => 0,
        }
    }

    fn glyph_box(&self, codepoint: u32, scale: f32) -> GlyphBox {
        let Some(px) = self.raster_px(scale) else {
            return GlyphBox::default();
        };
        let m = self.font.metrics_indexed(self.glyph_index(codepoint), px);
        box_of(&m)
    }

    fn rasterize(&self, codepoint: u32, scale: f32) -> GlyphBitmap {
        let Some(px) = self.raster_px(scale) else {
            return GlyphBitmap::default();
        };
        let (m, coverage) = self.font.rasterize_indexed(self.glyph_index(codepoint), px);
        let b = box_of(&m);
        GlyphBitmap {
            width: b.width,
            height: b.height,
            x_offset: b.x_offset,
            y_offset: b.y_offset,
            coverage,
        }
    }
}

/// fontdue reports the bottom edge in y-up space; flip to the top edge.
fn box_of(m: &fontdue::Metrics) -> GlyphBox {
    GlyphBox {
        width: m.width as u32,
        height: m.height as u32,
        x_offset: m.xmin,
        y_offset: -(m.ymin + m.height as i32),
    }
}
