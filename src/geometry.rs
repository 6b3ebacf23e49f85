//! Pen and quad types passed between the atlas, layout, and sinks.

/// Text cursor on the baseline, y pointing down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pen {
    pub x: f32,
    pub y: f32,
}

impl Pen {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One glyph: destination rectangle plus its UV rectangle in the atlas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quad {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub s0: f32,
    pub t0: f32,
    pub s1: f32,
    pub t1: f32,
}

/// A single textured corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl Quad {
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Corners in winding order: top-left, top-right, bottom-right, bottom-left.
    pub fn vertices(&self) -> [QuadVertex; 4] {
        [
            QuadVertex {
                position: [self.x0, self.y0],
                uv: [self.s0, self.t0],
            },
            QuadVertex {
                position: [self.x1, self.y0],
                uv: [self.s1, self.t0],
            },
            QuadVertex {
                position: [self.x1, self.y1],
                uv: [self.s1, self.t1],
            },
            QuadVertex {
                position: [self.x0, self.y1],
                uv: [self.s0, self.t1],
            },
        ]
    }

    /// Two triangles (six vertices) for backends without quad primitives.
    pub fn triangles(&self) -> [QuadVertex; 6] {
        let [a, b, c, d] = self.vertices();
        [a, b, c, a, c, d]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Quad {
        Quad {
            x0: 1.0,
            y0: -20.0,
            x1: 13.0,
            y1: 0.0,
            s0: 0.25,
            t0: 0.5,
            s1: 0.75,
            t1: 1.0,
        }
    }

    #[test]
    fn vertices_wind_clockwise_from_top_left() {
        let v = sample().vertices();
        assert_eq!(v[0].position, [1.0, -20.0]);
        assert_eq!(v[1].position, [13.0, -20.0]);
        assert_eq!(v[2].position, [13.0, 0.0]);
        assert_eq!(v[3].position, [1.0, 0.0]);
        assert_eq!(v[1].uv, [0.75, 0.5]);
        assert_eq!(v[3].uv, [0.25, 1.0]);
    }

    #[test]
    fn triangles_share_diagonal() {
        let q = sample();
        let t = q.triangles();
        assert_eq!(t[0], t[3]);
        assert_eq!(t[2], t[4]);
        assert!((q.width() - 12.0).abs() < f32::EPSILON);
        assert!((q.height() - 20.0).abs() < f32::EPSILON);
    }
}
