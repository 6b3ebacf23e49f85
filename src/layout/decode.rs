//! UTF-16 code unit decoding that never fails.

/// Decode the code point starting at `text[i]`, looking no further than `to`.
///
/// Returns the code point and the number of code units it consumed. A high
/// surrogate followed by a low surrogate (both before `to`) composes one
/// supplementary code point in a 2-unit step. Any other unit, including an
/// unpaired surrogate, decodes to its raw 16-bit value in a 1-unit step.
///
/// Returns `None` when `i` is not below both `to` and `text.len()`.
pub fn decode_code_point(text: &[u16], to: usize, i: usize) -> Option<(u32, usize)> {
    let limit = to.min(text.len());
    if i >= limit {
        return None;
    }
    let end = limit.min(i + 2);
    match char::decode_utf16(text[i..end].iter().copied()).next()? {
        Ok(ch) => Some((u32::from(ch), ch.len_utf16())),
        Err(e) => Some((u32::from(e.unpaired_surrogate()), 1)),
    }
}

/// Iterator over `(index, code point, step)` for a range of code units.
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    text: &'a [u16],
    pos: usize,
    end: usize,
}

impl<'a> CodePoints<'a> {
    /// Decode all of `text`.
    pub fn new(text: &'a [u16]) -> Self {
        Self::range(text, 0, text.len())
    }

    /// Decode code units `[from, to)`, clamped to the text.
    ///
    /// Surrogate pairs straddling `to` are not composed.
    pub fn range(text: &'a [u16], from: usize, to: usize) -> Self {
        let end = to.min(text.len());
        Self {
            text,
            pos: from.min(end),
            end,
        }
    }

    /// Code unit index of the next code point to decode.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The next code point without consuming it.
    pub fn peek(&self) -> Option<u32> {
        decode_code_point(self.text, self.end, self.pos).map(|(cp, _)| cp)
    }
}

impl Iterator for CodePoints<'_> {
    type Item = (usize, u32, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let at = self.pos;
        let (cp, step) = decode_code_point(self.text, self.end, at)?;
        self.pos += step;
        Some((at, cp, step))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.pos;
        (remaining.div_ceil(2), Some(remaining))
    }
}
