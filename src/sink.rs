//! Quad consumers.
//!
//! Layout produces quads; a `QuadSink` forwards them to whatever draws.
//! `QuadWriter` packs them into a byte buffer laid out as GPU instance
//! records, ready for a vertex buffer upload.

use crate::geometry::Quad;

/// Bytes per instance record: position, size, UV position, UV size (2 floats
/// each) and RGBA color (4 floats).
pub const INSTANCE_STRIDE: usize = 48;

/// Receiver for laid-out glyph quads.
pub trait QuadSink {
    fn push_quad(&mut self, quad: &Quad);

    /// Color for subsequent quads, RGBA in `0.0..=1.0`.
    ///
    /// Sinks that do not carry color ignore it.
    fn set_color(&mut self, _color: [f32; 4]) {}
}

impl QuadSink for Vec<Quad> {
    fn push_quad(&mut self, quad: &Quad) {
        self.push(*quad);
    }
}

/// Convert 8-bit RGB to opaque normalized RGBA.
pub fn rgb_to_rgba(rgb: [u8; 3]) -> [f32; 4] {
    [
        f32::from(rgb[0]) / 255.0,
        f32::from(rgb[1]) / 255.0,
        f32::from(rgb[2]) / 255.0,
        1.0,
    ]
}

/// Writes quad instance data to a byte buffer without unsafe code.
#[derive(Debug, Clone)]
pub struct QuadWriter {
    data: Vec<u8>,
    color: [f32; 4],
}

impl Default for QuadWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadWriter {
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(64 * INSTANCE_STRIDE),
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    /// Reuse an existing byte buffer, clearing its contents but keeping its allocation.
    pub fn from_buffer(mut buf: Vec<u8>) -> Self {
        buf.clear();
        Self {
            data: buf,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    /// Consume the writer, returning the underlying byte buffer for reuse.
    pub fn into_buffer(self) -> Vec<u8> {
        self.data
    }

    /// Set the text color from 8-bit channels.
    pub fn set_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.color = rgb_to_rgba([r, g, b]);
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Push an untextured rectangle (zero UV size) in the current color.
    pub fn push_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.push_raw([x, y], [w, h], [0.0, 0.0], [0.0, 0.0]);
    }

    /// Push a one-pixel outline of the rectangle as four edge rectangles.
    pub fn push_outline(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.push_rect(x, y, w, 1.0);
        self.push_rect(x, y + h - 1.0, w, 1.0);
        self.push_rect(x, y, 1.0, h);
        self.push_rect(x + w - 1.0, y, 1.0, h);
    }

    /// Write a full 48-byte instance record.
    fn push_raw(&mut self, pos: [f32; 2], size: [f32; 2], uv_pos: [f32; 2], uv_size: [f32; 2]) {
        for v in pos.into_iter().chain(size).chain(uv_pos).chain(uv_size) {
            self.data.extend_from_slice(&v.to_ne_bytes());
        }
        for v in self.color {
            self.data.extend_from_slice(&v.to_ne_bytes());
        }
    }

    /// Number of records written.
    pub fn count(&self) -> usize {
        self.data.len() / INSTANCE_STRIDE
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl QuadSink for QuadWriter {
    fn push_quad(&mut self, quad: &Quad) {
        self.push_raw(
            [quad.x0, quad.y0],
            [quad.width(), quad.height()],
            [quad.s0, quad.t0],
            [quad.s1 - quad.s0, quad.t1 - quad.t0],
        );
    }

    fn set_color(&mut self, color: [f32; 4]) {
        self.color = color;
    }
}
