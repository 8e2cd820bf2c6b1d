//! Line splitting for the block segmenter.
//!
//! The segmenter works on whole lines with arbitrary lookahead, so the
//! input is split up front into a `Vec<Line>`. Newline scanning uses
//! `memchr` (SIMD on supported platforms); lines borrow from the input.

use memchr::memchr;

/// A single line of input with its 0-based index in the split text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    /// Line text without the trailing newline (CRLF stripped).
    pub text: &'a str,
    /// 0-based index within the text this line came from.
    pub idx: usize,
}

impl<'a> Line<'a> {
    /// Check if this line contains only whitespace.
    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        self.text.bytes().all(|b| b == b' ' || b == b'\t')
    }
}

/// Width of the leading run of spaces in `text`.
#[inline(always)]
pub(crate) fn indent_width(text: &str) -> usize {
    text.bytes().take_while(|&b| b == b' ').count()
}

/// Split input into lines, handling both LF and CRLF endings.
pub(crate) fn split(input: &str) -> Vec<Line<'_>> {
    let bytes = input.as_bytes();
    let mut lines = Vec::with_capacity(16);
    let mut offset = 0;
    let mut idx = 0;

    while offset < bytes.len() {
        let end = match memchr(b'\n', &bytes[offset..]) {
            Some(pos) => offset + pos,
            None => bytes.len(),
        };

        // CRLF: drop the CR before the newline
        let text_end = if end > offset && bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        lines.push(Line {
            text: &input[offset..text_end],
            idx,
        });

        offset = if end < bytes.len() { end + 1 } else { end };
        idx += 1;
    }

    lines
}
