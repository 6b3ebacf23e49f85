//! Fixed-size glyph atlas baked once per font size.
//!
//! Rasterizes a contiguous codepoint range into a single-channel bitmap with
//! a shelf packer and records, per codepoint, where its pixels live and how
//! to place them relative to the pen. Codepoints outside the range cannot be
//! drawn from this atlas.

mod packer;


use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TextError};
use crate::font::{FontFace, GlyphBitmap, GlyphBox};
use crate::geometry::{Pen, Quad};
use packer::ShelfPacker;

pub const ATLAS_WIDTH: u32 = 512;
pub const ATLAS_HEIGHT: u32 = 512;
/// First baked codepoint (space).
pub const FIRST_CHAR: u32 = 32;
/// Printable ASCII plus DEL.
pub const NUM_CHARS: u32 = 96;

/// Atlas dimensions and the baked codepoint range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasSettings {
    pub width: u32,
    pub height: u32,
    pub first_char: u32,
    pub num_chars: u32,
}

impl Default for AtlasSettings {
    fn default() -> Self {
        Self {
            width: ATLAS_WIDTH,
            height: ATLAS_HEIGHT,
            first_char: FIRST_CHAR,
            num_chars: NUM_CHARS,
        }
    }
}

impl AtlasSettings {
    /// Reject settings that cannot describe a bitmap or a codepoint range.
    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 {
            return Err(TextError::InvalidAtlasSettings(format!(
                "atlas must be at least 3x3 pixels, got {}x{}",
                self.width, self.height
            )));
        }
        if self.num_chars == 0 {
            return Err(TextError::InvalidAtlasSettings(
                "num_chars must be at least 1".to_owned(),
            ));
        }
        if self.first_char.checked_add(self.num_chars).is_none() {
            return Err(TextError::InvalidAtlasSettings(format!(
                "codepoint range {}+{} overflows",
                self.first_char, self.num_chars
            )));
        }
        Ok(())
    }

    /// One past the last baked codepoint.
    pub fn end_char(&self) -> u32 {
        self.first_char.saturating_add(self.num_chars)
    }
}

/// Placement of one baked codepoint.
///
/// `x0..x1`/`y0..y1` is the glyph's pixel rectangle inside the atlas.
/// The offsets move the rectangle's top-left corner relative to the pen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BakedGlyph {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
    pub x_offset: f32,
    pub y_offset: f32,
    /// Pen advance in pixels.
    pub x_advance: f32,
}

impl BakedGlyph {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Baked bitmap plus the glyph table indexing into it.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphAtlas {
    bitmap: Vec<u8>,
    glyphs: Vec<BakedGlyph>,
    settings: AtlasSettings,
    pixel_height: f32,
    used_height: u32,
}

impl GlyphAtlas {
    /// Bake `settings.num_chars` codepoints starting at `settings.first_char`
    /// at `pixel_height`.
    ///
    /// Fails with `AtlasOverflow` when the glyphs do not fit; nothing partial
    /// is returned.
    pub fn bake<F: FontFace + ?Sized>(
        face: &F,
        pixel_height: f32,
        settings: AtlasSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let scale = face.scale_for_pixel_height(pixel_height);
        let mut bitmap = vec![0u8; settings.width as usize * settings.height as usize];
        let mut packer = ShelfPacker::new(settings.width, settings.height);
        let mut glyphs = Vec::with_capacity(settings.num_chars as usize);

        for codepoint in settings.first_char..settings.end_char() {
            let advance = face.horizontal_metrics(codepoint).advance_width;
            let bx = face.glyph_box(codepoint, scale);

            // Placement is decided from the box; only glyphs that fit are rasterized.
            let Some((x, y)) = packer.pack(bx.width, bx.height) else {
                log::warn!(
                    "atlas: U+{codepoint:04X} does not fit, {} of {} glyphs baked at {pixel_height}px",
                    glyphs.len(),
                    settings.num_chars,
                );
                return Err(TextError::AtlasOverflow {
                    baked: glyphs.len() as u32,
                    requested: settings.num_chars,
                    pixel_height,
                    width: settings.width,
                    height: settings.height,
                });
            };

            if !bx.is_empty() {
                let glyph = face.rasterize(codepoint, scale);
                blit(&mut bitmap, settings.width, x, y, &bx, &glyph);
            }
            glyphs.push(BakedGlyph {
                x0: x,
                y0: y,
                x1: x + bx.width,
                y1: y + bx.height,
                x_offset: bx.x_offset as f32,
                y_offset: bx.y_offset as f32,
                x_advance: scale * advance as f32,
            });
        }

        log::debug!(
            "atlas: baked {} glyphs at {pixel_height}px into {}x{} ({} rows used)",
            glyphs.len(),
            settings.width,
            settings.height,
            packer.used_height(),
        );

        Ok(Self {
            bitmap,
            glyphs,
            settings,
            pixel_height,
            used_height: packer.used_height(),
        })
    }

    /// Baked glyph for `codepoint`, or `None` outside the baked range.
    pub fn glyph(&self, codepoint: u32) -> Option<&BakedGlyph> {
        let index = codepoint.checked_sub(self.settings.first_char)?;
        self.glyphs.get(index as usize)
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.glyph(codepoint).is_some()
    }

    /// Screen quad and UVs for `glyph` drawn at `pen`, then advance the pen.
    ///
    /// The quad's corner is snapped to whole pixels (OpenGL fill convention)
    /// so glyph texels map 1:1 onto screen pixels.
    pub fn quad(&self, glyph: &BakedGlyph, pen: &mut Pen) -> Quad {
        let ipw = 1.0 / self.settings.width as f32;
        let iph = 1.0 / self.settings.height as f32;
        let round_x = (pen.x + glyph.x_offset + 0.5).floor();
        let round_y = (pen.y + glyph.y_offset + 0.5).floor();

        let quad = Quad {
            x0: round_x,
            y0: round_y,
            x1: round_x + glyph.width() as f32,
            y1: round_y + glyph.height() as f32,
            s0: glyph.x0 as f32 * ipw,
            t0: glyph.y0 as f32 * iph,
            s1: glyph.x1 as f32 * ipw,
            t1: glyph.y1 as f32 * iph,
        };
        pen.x += glyph.x_advance;
        quad
    }

    pub fn glyphs(&self) -> &[BakedGlyph] {
        &self.glyphs
    }

    /// Single-channel coverage, row-major, `width * height` bytes.
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    pub fn width(&self) -> u32 {
        self.settings.width
    }

    pub fn height(&self) -> u32 {
        self.settings.height
    }

    pub fn first_char(&self) -> u32 {
        self.settings.first_char
    }

    pub fn settings(&self) -> AtlasSettings {
        self.settings
    }

    /// Pixel height the atlas was baked at.
    pub fn pixel_height(&self) -> f32 {
        self.pixel_height
    }

    /// Bitmap rows touched by the packer, including padding.
    pub fn used_height(&self) -> u32 {
        self.used_height
    }

    /// Write the coverage bitmap as an 8-bit grayscale PNG.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let img = image::GrayImage::from_raw(
            self.settings.width,
            self.settings.height,
            self.bitmap.clone(),
        )
        .ok_or_else(|| TextError::AtlasExport("bitmap size mismatch".to_owned()))?;
        img.save(path)
            .map_err(|e| TextError::AtlasExport(format!("{}: {e}", path.display())))?;
        log::info!("atlas: wrote {}", path.display());
        Ok(())
    }
}

/// Copy a glyph's coverage rows into the atlas cell `bx` placed at `(x, y)`.
///
/// Writes never leave the cell, even if the bitmap disagrees with the box.
fn blit(bitmap: &mut [u8], stride: u32, x: u32, y: u32, bx: &GlyphBox, glyph: &GlyphBitmap) {
    if glyph.is_empty() {
        return;
    }
    let src_w = glyph.width as usize;
    let w = src_w.min(bx.width as usize);
    let stride = stride as usize;
    for (row, src) in glyph
        .coverage
        .chunks_exact(src_w)
        .take(glyph.height.min(bx.height) as usize)
        .enumerate()
    {
        let start = (y as usize + row) * stride + x as usize;
        bitmap[start..start + w].copy_from_slice(&src[..w]);
    }
}
