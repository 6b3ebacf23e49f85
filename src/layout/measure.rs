use super::CodePoints;
use crate::font::FontFace;

/// Width in pixels of code units `[from, to)` at `pixel_size`.
///
/// Sums design-unit advances of every decoded code point plus kerning with
/// the code point that follows inside the range, then scales once. Works from
/// font metrics alone: no atlas, and no special case for newlines or
/// codepoints the atlas lacks, so callers measure one line at a time.
pub fn measure_width<F: FontFace + ?Sized>(
    text: &[u16],
    from: usize,
    to: usize,
    pixel_size: f32,
    face: &F,
) -> f32 {
    let mut width: i64 = 0;
    let mut code_points = CodePoints::range(text, from, to);

    while let Some((_, cp, _)) = code_points.next() {
        width += i64::from(face.horizontal_metrics(cp).advance_width);
        if let Some(next) = code_points.peek() {
            width += i64::from(face.kern_advance(cp, next));
        }
    }

    width as f32 * face.scale_for_pixel_height(pixel_size)
}
