//! Row-based shelf packer for the fixed-size bake.
//!
//! Glyphs are placed left to right with one pixel of padding; when a row runs
//! out the cursor drops to the bottom of the tallest glyph seen so far. The
//! outermost row and column stay empty so linear sampling never bleeds in
//! from the texture edge.

pub(super) struct ShelfPacker {
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    /// Bottom edge (plus padding) of the tallest glyph on the current shelf.
    bottom: u32,
}

impl ShelfPacker {
    pub(super) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: 1,
            y: 1,
            bottom: 1,
        }
    }

    /// Reserve a `w`x`h` cell, returning its top-left corner, or `None` once
    /// the bitmap is full.
    pub(super) fn pack(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.x + w + 1 >= self.width {
            self.y = self.bottom;
            self.x = 1;
            // Wider than an empty shelf.
            if self.x + w + 1 >= self.width {
                return None;
            }
        }
        if self.y + h + 1 >= self.height {
            return None;
        }

        let pos = (self.x, self.y);
        self.x += w + 1;
        self.bottom = self.bottom.max(self.y + h + 1);
        Some(pos)
    }

    /// Rows consumed so far, including the top padding row.
    pub(super) fn used_height(&self) -> u32 {
        self.bottom
    }
}
