//! High-level text renderer: owns a font and its baked atlas, and draws
//! strings into a `QuadSink`.

use std::path::Path;

use crate::atlas::{AtlasSettings, GlyphAtlas};
use crate::config::Config;
use crate::error::{Result, TextError};
use crate::font::{FontFace, FontInfo};
use crate::layout::{layout, measure_width};
use crate::resource::{ResourceLoader, build_font_index, resolve_font};
use crate::sink::{QuadSink, QuadWriter, rgb_to_rgba};

pub const DEFAULT_FONT_SIZE: f32 = 24.0;

/// Color of the debug line outline.
const BOUNDS_COLOR: [u8; 3] = [255, 255, 0];

/// Accept any finite, positive pixel height. The atlas sets the upper bound.
fn check_font_size(px: f32) -> Result<f32> {
    if px.is_finite() && px > 0.0 {
        Ok(px)
    } else {
        Err(TextError::InvalidFontSize(px))
    }
}

/// Box around one line of text, in draw coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl LineBounds {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// A font plus the atlas baked from it at the current size.
///
/// Rebaking takes `&mut self`, so no layout borrowing the old atlas can be
/// alive when it is replaced.
#[derive(Debug)]
pub struct TextRenderer<F: FontFace = FontInfo> {
    font: F,
    atlas: GlyphAtlas,
    font_size: f32,
    settings: AtlasSettings,
    padding_x: f32,
    color: [u8; 3],
}

impl TextRenderer<FontInfo> {
    /// Load the font at `path` and bake it.
    pub fn from_file(path: &Path, config: &Config) -> Result<Self> {
        let bytes = ResourceLoader::default().load(path)?;
        let font = FontInfo::load(&bytes)?;
        log::info!("renderer: using font {}", path.display());
        Self::new(font, config)
    }

    /// Resolve the configured font (explicit path, family, then platform
    /// defaults) and bake it.
    pub fn from_config(config: &Config) -> Result<Self> {
        let index = build_font_index();
        let path = resolve_font(&config.font, &index).ok_or(TextError::FontNotFound)?;
        Self::from_file(&path, config)
    }
}

impl<F: FontFace> TextRenderer<F> {
    pub fn new(font: F, config: &Config) -> Result<Self> {
        let font_size = check_font_size(config.font.size)?;
        let settings = config.atlas;
        let atlas = GlyphAtlas::bake(&font, font_size, settings)?;
        log::info!(
            "renderer: baked {} glyphs at {font_size}px into {}x{}",
            atlas.glyphs().len(),
            atlas.width(),
            atlas.height(),
        );
        Ok(Self {
            font,
            atlas,
            font_size,
            settings,
            padding_x: config.render.padding_x,
            color: config.render.color,
        })
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Rebake the atlas at `px`.
    ///
    /// Fails with `InvalidFontSize` for non-finite or non-positive sizes and
    /// with `AtlasOverflow` when the glyphs no longer fit. On failure the
    /// previous atlas and size remain in use.
    pub fn set_font_size(&mut self, px: f32) -> Result<()> {
        let px = check_font_size(px)?;
        if (px - self.font_size).abs() < f32::EPSILON {
            return Ok(());
        }
        match GlyphAtlas::bake(&self.font, px, self.settings) {
            Ok(atlas) => {
                log::info!("renderer: font size {} -> {px}", self.font_size);
                self.atlas = atlas;
                self.font_size = px;
                Ok(())
            }
            Err(e) => {
                log::warn!("renderer: keeping {}px atlas: {e}", self.font_size);
                Err(e)
            }
        }
    }

    pub fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.color = [r, g, b];
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    /// Draw `text` with `(dx, dy)` at the top-left of its first line.
    ///
    /// Returns the number of quads pushed.
    pub fn draw_string<S: QuadSink + ?Sized>(
        &self,
        dx: f32,
        dy: f32,
        text: &str,
        sink: &mut S,
    ) -> usize {
        let units: Vec<u16> = text.encode_utf16().collect();
        self.draw_utf16(dx, dy, &units, sink)
    }

    /// Same as [`draw_string`](Self::draw_string) over raw UTF-16 code units.
    pub fn draw_utf16<S: QuadSink + ?Sized>(
        &self,
        dx: f32,
        dy: f32,
        text: &[u16],
        sink: &mut S,
    ) -> usize {
        sink.set_color(rgb_to_rgba(self.color));
        let quads = layout(
            text,
            dx + self.padding_x,
            dy + self.font_size,
            self.font_size,
            &self.atlas,
            &self.font,
        );
        let mut count = 0;
        for quad in quads {
            sink.push_quad(&quad);
            count += 1;
        }
        count
    }

    /// Width of UTF-16 code units `[from, to)` of `text` at the current size.
    pub fn string_width(&self, text: &str, from: usize, to: usize) -> f32 {
        let units: Vec<u16> = text.encode_utf16().collect();
        measure_width(&units, from, to, self.font_size, &self.font)
    }

    /// Box around code units `[from, to)` sitting on `baseline_y`.
    ///
    /// The box starts at the padded origin, spans the measured width, and
    /// is one font size tall with its bottom on the descender line.
    pub fn line_bounds(&self, text: &str, from: usize, to: usize, baseline_y: f32) -> LineBounds {
        let scale = self.font.scale_for_pixel_height(self.font_size);
        let descent = self.font.vertical_metrics().descent as f32 * scale;
        let bottom = baseline_y - descent;
        let left = self.padding_x;
        LineBounds {
            left,
            top: bottom - self.font_size,
            right: left + self.string_width(text, from, to),
            bottom,
        }
    }

    /// Outline [`line_bounds`](Self::line_bounds) in yellow. The writer's
    /// color is restored afterwards.
    pub fn draw_line_bounds(
        &self,
        text: &str,
        from: usize,
        to: usize,
        baseline_y: f32,
        writer: &mut QuadWriter,
    ) {
        let b = self.line_bounds(text, from, to, baseline_y);
        let prev = writer.color();
        let [r, g, bl] = BOUNDS_COLOR;
        writer.set_rgb(r, g, bl);
        writer.push_outline(b.left, b.top, b.width(), b.height());
        writer.set_color(prev);
    }

    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    pub fn font(&self) -> &F {
        &self.font
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FontConfig, RenderConfig};
    use crate::font::fake::FakeFace;
    use crate::geometry::Quad;

    fn renderer() -> TextRenderer<FakeFace> {
        let config = Config {
            font: FontConfig {
                size: 32.0,
                ..FontConfig::default()
            },
            ..Config::default()
        };
        TextRenderer::new(FakeFace::new(), &config).expect("bake")
    }

    #[test]
    fn new_bakes_at_configured_size() {
        let r = renderer();
        assert!((r.font_size() - 32.0).abs() < f32::EPSILON);
        assert!((r.atlas().pixel_height() - 32.0).abs() < f32::EPSILON);
        assert_eq!(r.color(), [255, 255, 255]);
    }

    fn sized(size: f32) -> Config {
        Config {
            font: FontConfig {
                size,
                ..FontConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn small_config_size_is_kept() {
        let r = TextRenderer::new(FakeFace::new(), &sized(2.0)).expect("bake");
        assert!((r.font_size() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_config_size_is_rejected() {
        for size in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            let err = TextRenderer::new(FakeFace::new(), &sized(size)).unwrap_err();
            assert!(matches!(err, TextError::InvalidFontSize(_)), "got {err:?}");
        }
    }

    #[test]
    fn draw_string_translates_origin() {
        let r = renderer();
        let mut quads: Vec<Quad> = Vec::new();
        assert_eq!(r.draw_string(0.0, 0.0, "A", &mut quads), 1);
        // Pen starts at (4, 32); glyph is 12x20, one pixel right of the pen.
        let q = quads[0];
        assert!((q.x0 - 5.0).abs() < f32::EPSILON);
        assert!((q.y0 - 12.0).abs() < f32::EPSILON);
        assert!((q.x1 - 17.0).abs() < f32::EPSILON);
        assert!((q.y1 - 32.0).abs() < f32::EPSILON);

        let mut moved: Vec<Quad> = Vec::new();
        r.draw_string(10.0, 100.0, "A", &mut moved);
        assert!((moved[0].x0 - 15.0).abs() < f32::EPSILON);
        assert!((moved[0].y0 - 112.0).abs() < f32::EPSILON);
    }

    #[test]
    fn draw_string_skips_unrenderable() {
        let r = renderer();
        let mut quads: Vec<Quad> = Vec::new();
        assert_eq!(r.draw_string(0.0, 0.0, "a\tb\u{e9}\n", &mut quads), 2);
        assert_eq!(r.draw_string(0.0, 0.0, "", &mut quads), 0);
    }

    #[test]
    fn draw_string_matches_draw_utf16() {
        let r = renderer();
        let text = "AV\nWB";
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut a: Vec<Quad> = Vec::new();
        let mut b: Vec<Quad> = Vec::new();
        r.draw_string(3.0, 7.0, text, &mut a);
        r.draw_utf16(3.0, 7.0, &units, &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn color_flows_to_writer() {
        let mut r = renderer();
        r.set_color(255, 0, 0);
        assert_eq!(r.color(), [255, 0, 0]);

        let mut writer = QuadWriter::new();
        assert_eq!(r.draw_string(0.0, 0.0, "Hi", &mut writer), 2);
        assert_eq!(writer.count(), 2);
        assert_eq!(writer.color(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn string_width_uses_current_size() {
        let mut r = renderer();
        // 512 + 512 - 64 kerning, at 1/32.
        assert!((r.string_width("AB", 0, 2) - 30.0).abs() < f32::EPSILON);
        assert!((r.string_width("AB", 0, 1) - 16.0).abs() < f32::EPSILON);

        r.set_font_size(16.0).expect("rebake");
        assert!((r.string_width("AB", 0, 2) - 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn set_font_size_rebakes() {
        let mut r = renderer();
        r.set_font_size(16.0).expect("rebake");
        assert!((r.font_size() - 16.0).abs() < f32::EPSILON);
        assert!((r.atlas().pixel_height() - 16.0).abs() < f32::EPSILON);
    }

    #[test]
    fn set_font_size_overflow_keeps_previous_atlas() {
        let mut r = renderer();
        let before = r.atlas().clone();

        // At 128px the 48x80 glyphs fit only 60 to a 512x512 atlas.
        let err = r.set_font_size(128.0).unwrap_err();
        assert!(matches!(err, TextError::AtlasOverflow { .. }), "got {err:?}");
        assert!((r.font_size() - 32.0).abs() < f32::EPSILON);
        assert_eq!(r.atlas(), &before);
    }

    #[test]
    fn line_bounds_hang_from_descender() {
        let r = renderer();
        let b = r.line_bounds("AB", 0, 2, 32.0);
        // Descent -256 at 1/32 puts the bottom 8px under the baseline.
        assert!((b.bottom - 40.0).abs() < f32::EPSILON);
        assert!((b.top - 8.0).abs() < f32::EPSILON);
        assert!((b.left - 4.0).abs() < f32::EPSILON);
        assert!((b.width() - 30.0).abs() < f32::EPSILON);
        assert!((b.height() - 32.0).abs() < f32::EPSILON);
    }

    #[test]
    fn draw_line_bounds_restores_color() {
        let r = renderer();
        let mut writer = QuadWriter::new();
        writer.set_rgb(0, 0, 255);
        r.draw_line_bounds("AB", 0, 2, 32.0, &mut writer);
        assert_eq!(writer.count(), 4);
        assert_eq!(writer.color(), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn padding_comes_from_config() {
        let config = Config {
            font: FontConfig {
                size: 32.0,
                ..FontConfig::default()
            },
            render: RenderConfig {
                padding_x: 0.0,
                color: [1, 2, 3],
            },
            ..Config::default()
        };
        let r = TextRenderer::new(FakeFace::new(), &config).expect("bake");
        assert_eq!(r.color(), [1, 2, 3]);
        let mut quads: Vec<Quad> = Vec::new();
        r.draw_string(0.0, 0.0, "A", &mut quads);
        assert!((quads[0].x0 - 1.0).abs() < f32::EPSILON);
        assert!((r.line_bounds("A", 0, 1, 32.0).left).abs() < f32::EPSILON);
    }

    #[test]
    fn set_font_size_rejects_invalid_sizes() {
        let mut r = renderer();
        for px in [0.0, -1.0, f32::NAN, f32::NEG_INFINITY, f32::INFINITY] {
            let err = r.set_font_size(px).unwrap_err();
            assert!(matches!(err, TextError::InvalidFontSize(_)), "got {err:?}");
            assert!((r.font_size() - 32.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn large_size_is_stored_unchanged_when_it_fits() {
        let config = Config {
            atlas: AtlasSettings {
                width: 2048,
                height: 2048,
                ..AtlasSettings::default()
            },
            ..sized(32.0)
        };
        let mut r = TextRenderer::new(FakeFace::new(), &config).expect("bake");
        r.set_font_size(200.0).expect("200px fits a 2048x2048 atlas");
        assert!((r.font_size() - 200.0).abs() < f32::EPSILON);
        assert!((r.atlas().pixel_height() - 200.0).abs() < f32::EPSILON);
    }
}
