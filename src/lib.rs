//! Baked glyph-atlas text rendering.
//!
//! A TrueType/OpenType font is rasterized once into a single-channel atlas
//! covering a contiguous code point range. Strings are then laid out against
//! that atlas into textured quads with pair kerning and newline handling,
//! and handed to a `QuadSink` for drawing. No shaping, no GPU code.

pub mod atlas;
pub mod config;
pub mod error;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod renderer;
pub mod resource;
pub mod sink;

pub use atlas::{AtlasSettings, BakedGlyph, GlyphAtlas};
pub use error::{Result, TextError};
pub use font::{FontFace, FontInfo};
pub use geometry::{Pen, Quad, QuadVertex};
pub use layout::{Layout, layout, measure_width};
pub use renderer::{LineBounds, TextRenderer};
pub use sink::{QuadSink, QuadWriter};
