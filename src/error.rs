//! Error type shared by font loading, atlas baking, and resource loading.
//!
//! Layout and measurement have no error path: malformed or unrenderable
//! input degrades to skipped glyphs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by setup operations.
#[derive(Debug, Error)]
pub enum TextError {
    /// The bytes are not a font the rasterizer recognizes.
    #[error("failed to parse font: {0}")]
    FontParse(String),

    /// The requested glyph range does not fit the atlas bitmap.
    ///
    /// `baked` glyphs were placed before space ran out. Retry with a smaller
    /// pixel height, a larger atlas, or fewer glyphs.
    #[error(
        "atlas overflow: only {baked} of {requested} glyphs fit a {width}x{height} atlas at {pixel_height}px"
    )]
    AtlasOverflow {
        baked: u32,
        requested: u32,
        pixel_height: f32,
        width: u32,
        height: u32,
    },

    /// Font sizes must be finite and positive.
    #[error("invalid font size: {0}")]
    InvalidFontSize(f32),

    #[error("invalid atlas settings: {0}")]
    InvalidAtlasSettings(String),

    /// I/O failure from the resource loader, passed through untouched.
    #[error("failed to load resource {}: {source}", path.display())]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("resource {} is {size} bytes, limit is {limit}", path.display())]
    ResourceTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("no usable font found (set font.path or font.family in the config)")]
    FontNotFound,

    #[error("failed to export atlas: {0}")]
    AtlasExport(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
