//! Inline span parser.
//!
//! Scans a text span strictly left to right with no backtracking,
//! producing a flat sequence of inline nodes. Uses `memchr` to jump to
//! the next structural character. Priority at each position: escape,
//! code span, strong/emphasis, link; anything else is literal text.
//! Code span content is verbatim and immune to further matching.

use memchr::{memchr, memchr2, memchr3};

use crate::ast::{Inline, Link};

/// Characters a backslash can neutralize. A backslash before anything
/// else stays a literal backslash.
const STRUCTURAL: &[u8] = b"\\`*_[](){}|#->+";

/// Parse a text span into an ordered sequence of inline nodes.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    if text.is_empty() {
        return Vec::new();
    }
    InlineParser::new(text).parse()
}

struct InlineParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> InlineParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn parse(&mut self) -> Vec<Inline> {
        let mut out = Vec::with_capacity(4);
        let mut buf = String::new();

        while self.pos < self.bytes.len() {
            let next = self.find_next_special();
            buf.push_str(&self.text[self.pos..next]);
            self.pos = next;
            if next >= self.bytes.len() {
                break;
            }

            let handled = match self.bytes[self.pos] {
                b'\\' => self.take_escape(&mut buf),
                b'`' => self.take_code_span(&mut out, &mut buf),
                b'*' | b'_' => self.take_span(self.bytes[self.pos], &mut out, &mut buf),
                b'[' => self.take_link(&mut out, &mut buf),
                _ => false,
            };

            if !handled {
                // Structural character with no valid match: literal text.
                buf.push(self.bytes[self.pos] as char);
                self.pos += 1;
            }
        }

        flush_text(&mut out, &mut buf);
        out
    }

    /// Jump to the next character that could open an inline construct.
    #[inline(always)]
    fn find_next_special(&self) -> usize {
        let remaining = &self.bytes[self.pos..];
        let a = memchr3(b'\\', b'`', b'*', remaining);
        let b = memchr2(b'_', b'[', remaining);
        match (a, b) {
            (Some(x), Some(y)) => self.pos + x.min(y),
            (Some(x), None) => self.pos + x,
            (None, Some(y)) => self.pos + y,
            (None, None) => self.bytes.len(),
        }
    }

    /// Backslash escape: consume the backslash and emit the following
    /// structural character literally.
    fn take_escape(&mut self, buf: &mut String) -> bool {
        match self.bytes.get(self.pos + 1) {
            Some(&next) if STRUCTURAL.contains(&next) => {
                buf.push(next as char);
                self.pos += 2;
                true
            }
            _ => false,
        }
    }

    /// Backtick-delimited code span; content copied verbatim.
    fn take_code_span(&mut self, out: &mut Vec<Inline>, buf: &mut String) -> bool {
        let start = self.pos;
        let mut search = start + 1;
        while let Some(off) = memchr(b'`', &self.bytes[search..]) {
            let close = search + off;
            if self.bytes[close - 1] == b'\\' {
                search = close + 1;
                continue;
            }
            flush_text(out, buf);
            out.push(Inline::Code(self.text[start + 1..close].to_string()));
            self.pos = close + 1;
            return true;
        }
        false
    }

    /// Strong (double marker) or emphasis (single marker) span over `*`
    /// or `_`. Content is recursively parsed so spans may nest.
    fn take_span(&mut self, marker: u8, out: &mut Vec<Inline>, buf: &mut String) -> bool {
        let double = self.bytes.get(self.pos + 1) == Some(&marker);
        let delim = if double { 2 } else { 1 };
        let content_start = self.pos + delim;

        if content_start >= self.bytes.len() || self.bytes[content_start] == b' ' {
            return false;
        }

        let mut search = content_start;
        while let Some(off) = memchr(marker, &self.bytes[search..]) {
            let close = search + off;
            if self.bytes[close - 1] == b'\\' {
                search = close + 1;
                continue;
            }
            if double {
                if self.bytes.get(close + 1) != Some(&marker) {
                    search = close + 1;
                    continue;
                }
            } else if self.bytes.get(close + 1) == Some(&marker) {
                // Part of a double marker; not our closer.
                search = close + 2;
                continue;
            }
            if close == content_start || self.bytes[close - 1] == b' ' {
                search = close + delim;
                continue;
            }

            let content = parse_inlines(&self.text[content_start..close]);
            flush_text(out, buf);
            out.push(if double {
                Inline::Strong(content)
            } else {
                Inline::Emphasis(content)
            });
            self.pos = close + delim;
            return true;
        }
        false
    }

    /// `[label](target)` link; label recursively parsed, target verbatim.
    fn take_link(&mut self, out: &mut Vec<Inline>, buf: &mut String) -> bool {
        let start = self.pos;
        let label_end = match self.find_unescaped(b']', start + 1) {
            Some(pos) => pos,
            None => return false,
        };
        if self.bytes.get(label_end + 1) != Some(&b'(') {
            return false;
        }
        let target_end = match self.find_unescaped(b')', label_end + 2) {
            Some(pos) => pos,
            None => return false,
        };

        let label = parse_inlines(&self.text[start + 1..label_end]);
        let target = self.text[label_end + 2..target_end].to_string();
        flush_text(out, buf);
        out.push(Inline::Link(Link { label, target }));
        self.pos = target_end + 1;
        true
    }

    /// Find the next `needle` at or after `from` that is not preceded by
    /// a backslash.
    fn find_unescaped(&self, needle: u8, from: usize) -> Option<usize> {
        let mut search = from;
        while let Some(off) = memchr(needle, &self.bytes[search..]) {
            let pos = search + off;
            if pos > 0 && self.bytes[pos - 1] == b'\\' {
                search = pos + 1;
                continue;
            }
            return Some(pos);
        }
        None
    }
}

fn flush_text(out: &mut Vec<Inline>, buf: &mut String) {
    if !buf.is_empty() {
        out.push(Inline::Text(std::mem::take(buf)));
    }
}
