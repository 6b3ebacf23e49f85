//! Single-string text layout over a baked atlas.
//!
//! `layout` walks UTF-16 code units, moves a pen along the baseline, applies
//! pair kerning, breaks lines on `\n`, and yields one `Quad` per glyph the
//! atlas can draw. Everything else is skipped without advancing the pen, so
//! arbitrary input never fails.

mod decode;
mod measure;


pub use decode::{CodePoints, decode_code_point};
pub use measure::measure_width;

use crate::atlas::{FIRST_CHAR, GlyphAtlas};
use crate::font::{FontFace, LINE_FEED};
use crate::geometry::{Pen, Quad};

/// Lay out `text` with the pen starting on the baseline at `(origin_x, origin_y)`.
///
/// `pixel_size` scales kerning and line spacing; it should match the size the
/// atlas was baked at. The returned iterator is lazy and `Clone`, and two
/// layouts over the same inputs yield identical quads.
pub fn layout<'a, F: FontFace + ?Sized>(
    text: &'a [u16],
    origin_x: f32,
    origin_y: f32,
    pixel_size: f32,
    atlas: &'a GlyphAtlas,
    face: &'a F,
) -> Layout<'a, F> {
    let scale = face.scale_for_pixel_height(pixel_size);
    Layout {
        code_points: CodePoints::new(text),
        pen: Pen::new(origin_x, origin_y),
        origin_x,
        scale,
        line_advance: face.vertical_metrics().line_advance() as f32 * scale,
        atlas,
        face,
    }
}

/// Lazy quad iterator returned by [`layout`].
pub struct Layout<'a, F: FontFace + ?Sized> {
    code_points: CodePoints<'a>,
    pen: Pen,
    origin_x: f32,
    scale: f32,
    line_advance: f32,
    atlas: &'a GlyphAtlas,
    face: &'a F,
}

impl<F: FontFace + ?Sized> Clone for Layout<'_, F> {
    fn clone(&self) -> Self {
        Self {
            code_points: self.code_points.clone(),
            pen: self.pen,
            origin_x: self.origin_x,
            scale: self.scale,
            line_advance: self.line_advance,
            atlas: self.atlas,
            face: self.face,
        }
    }
}

impl<F: FontFace + ?Sized> std::fmt::Debug for Layout<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layout")
            .field("position", &self.code_points.position())
            .field("pen", &self.pen)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl<F: FontFace + ?Sized> Layout<'_, F> {
    /// Current pen position.
    pub fn pen(&self) -> Pen {
        self.pen
    }

    /// Code unit index of the next code point to be decoded.
    pub fn position(&self) -> usize {
        self.code_points.position()
    }

    /// Baseline-to-baseline distance in pixels.
    pub fn line_advance(&self) -> f32 {
        self.line_advance
    }
}

impl<F: FontFace + ?Sized> Iterator for Layout<'_, F> {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        loop {
            let (_, cp, _) = self.code_points.next()?;

            if cp == LINE_FEED {
                self.pen.y += self.line_advance;
                self.pen.x = self.origin_x;
                continue;
            }
            if cp < FIRST_CHAR {
                continue;
            }
            let Some(glyph) = self.atlas.glyph(cp) else {
                continue;
            };

            let quad = self.atlas.quad(glyph, &mut self.pen);
            // Kerning looks at whatever code point follows, even a newline or
            // an unrenderable one.
            if let Some(next) = self.code_points.peek() {
                self.pen.x += self.face.kern_advance(cp, next) as f32 * self.scale;
            }
            return Some(quad);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.code_points.size_hint().1)
    }
}

impl<F: FontFace + ?Sized> std::iter::FusedIterator for Layout<'_, F> {}
