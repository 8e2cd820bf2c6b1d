//! Recursive indentation grouping for list blocks.
//!
//! The raw text of a list block keeps its original leading whitespace;
//! the indentation of the first line sets the base level. Lines at the
//! base level become sibling items; a run of deeper-indented lines is
//! buffered and parsed by the same algorithm, producing a nested list
//! that is appended right after the sibling item preceding the run.

use crate::ast::{List, ListEntry};
use crate::error::ParseError;
use crate::inline;
use crate::lines::indent_width;

/// Parse the raw text of a list block into a [`List`] tree.
///
/// `base_line` is the 1-based source line of the block's first line, used
/// to position a recursion-limit error. `depth` counts nesting levels and
/// is checked against `max_depth` on every recursive call.
pub(crate) fn parse(
    text: &str,
    base_line: usize,
    depth: usize,
    max_depth: usize,
) -> Result<List, ParseError> {
    if depth > max_depth {
        return Err(ParseError::recursion_limit(max_depth, base_line));
    }

    let items: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let base_indent = items.first().map(|(_, line)| indent_width(line)).unwrap_or(0);
    let ordered = items
        .first()
        .map(|(_, line)| {
            line.as_bytes()
                .get(indent_width(line))
                .is_some_and(|b| b.is_ascii_digit())
        })
        .unwrap_or(false);

    let mut entries: Vec<ListEntry> = Vec::with_capacity(items.len());
    let mut buffer: Vec<&str> = Vec::new();
    let mut buffer_line = 0;
    let mut accumulating = false;

    for (rel, line) in &items {
        let indent = indent_width(line);
        if accumulating && indent == base_indent {
            let nested = parse(
                &buffer.join("\n"),
                base_line + buffer_line,
                depth + 1,
                max_depth,
            )?;
            entries.push(ListEntry::Nested(nested));
            accumulating = false;
            buffer.clear();
        } else if !accumulating && indent > base_indent {
            accumulating = true;
            buffer_line = *rel;
        }

        if accumulating {
            buffer.push(line);
        } else {
            entries.push(ListEntry::Item(inline::parse_inlines(strip_marker(line))));
        }
    }

    if !buffer.is_empty() {
        let nested = parse(
            &buffer.join("\n"),
            base_line + buffer_line,
            depth + 1,
            max_depth,
        )?;
        entries.push(ListEntry::Nested(nested));
    }

    Ok(List {
        ordered,
        items: entries,
    })
}

/// Drop the leading bullet or `digits.` marker and surrounding whitespace.
fn strip_marker(line: &str) -> &str {
    let trimmed = line.trim();
    let bytes = trimmed.as_bytes();
    let after = match bytes.first() {
        Some(b'-') | Some(b'+') | Some(b'*') => &trimmed[1..],
        Some(b) if b.is_ascii_digit() => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            trimmed[digits..].strip_prefix('.').unwrap_or(&trimmed[digits..])
        }
        _ => trimmed,
    };
    after.trim()
}
