//! Block segmentation.
//!
//! Scans the document line by line and splits it into an ordered,
//! gap-free sequence of classified raw blocks. At each cursor position
//! the rules are tried in fixed priority order; the first rule that
//! fully matches a contiguous span wins and the cursor advances past it.
//! No rule may partially match. The paragraph catch-all consumes any
//! non-blank line no earlier rule claimed, so segmentation is total:
//! outside of skipped blank lines, every character of input ends up in
//! exactly one raw block.

use crate::error::ParseError;
use crate::lines::Line;

/// Classification assigned to a raw block by the rule that matched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Comment,
    AtxHeading,
    SetextHeading,
    Note,
    Quote,
    Code,
    List,
    Table,
    Http,
    Ruler,
    Paragraph,
}

/// An intermediate, untyped span produced by segmentation.
///
/// `text` keeps the original characters of the matched lines (joined with
/// `\n`); no inline parsing has happened yet. Discarded after formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawBlock {
    pub kind: BlockKind,
    pub text: String,
    /// 1-based line of the block's first line in the source document.
    pub line: usize,
}

/// One entry of the segmentation rule table.
///
/// The matcher inspects the lines at the cursor and returns how many it
/// consumes, or `None` when the rule does not apply. Matchers are called
/// with a non-blank first line.
pub(crate) struct Rule {
    pub kind: BlockKind,
    pub matcher: fn(&[Line<'_>]) -> Option<usize>,
}

/// The segmentation rules, in priority order. First match wins.
///
/// The list rule is the only one that preserves leading whitespace in the
/// block text, because indentation width is structurally significant for
/// list nesting. The paragraph rule never fails.
pub(crate) static RULES: [Rule; 11] = [
    Rule { kind: BlockKind::Comment, matcher: match_comment },
    Rule { kind: BlockKind::AtxHeading, matcher: match_atx_heading },
    Rule { kind: BlockKind::SetextHeading, matcher: match_setext_heading },
    Rule { kind: BlockKind::Note, matcher: match_note },
    Rule { kind: BlockKind::Quote, matcher: match_quote },
    Rule { kind: BlockKind::Code, matcher: match_code },
    Rule { kind: BlockKind::List, matcher: match_list },
    Rule { kind: BlockKind::Table, matcher: match_table },
    Rule { kind: BlockKind::Http, matcher: match_http },
    Rule { kind: BlockKind::Ruler, matcher: match_ruler },
    Rule { kind: BlockKind::Paragraph, matcher: match_paragraph_line },
];

/// Split `lines` into classified raw blocks using `rules`.
///
/// `base_line` is the 1-based line number of `lines[0]` in the source
/// document, so nested re-parses report positions in the original text.
/// Blank lines between blocks are skipped; consecutive lines claimed by
/// the paragraph catch-all coalesce into a single paragraph block.
pub(crate) fn segment(
    rules: &[Rule],
    lines: &[Line<'_>],
    base_line: usize,
) -> Result<Vec<RawBlock>, ParseError> {
    let mut blocks: Vec<RawBlock> = Vec::with_capacity(16);
    let mut pos = 0;
    // True while the previous line went into a still-open paragraph.
    let mut in_paragraph = false;

    while pos < lines.len() {
        if lines[pos].is_blank() {
            in_paragraph = false;
            pos += 1;
            continue;
        }

        let rest = &lines[pos..];
        let mut matched = None;
        for rule in rules {
            if let Some(consumed) = (rule.matcher)(rest) {
                matched = Some((rule.kind, consumed));
                break;
            }
        }

        let Some((kind, consumed)) = matched else {
            return Err(ParseError::segmentation_gap(base_line + lines[pos].idx));
        };
        if consumed == 0 {
            return Err(ParseError::segmentation_gap(base_line + lines[pos].idx));
        }

        if kind == BlockKind::Paragraph && in_paragraph {
            // Contiguous unclaimed line: extend the open paragraph.
            let last = blocks
                .last_mut()
                .ok_or_else(|| ParseError::segmentation_gap(base_line + lines[pos].idx))?;
            last.text.push('\n');
            last.text.push_str(lines[pos].text);
        } else {
            blocks.push(RawBlock {
                kind,
                text: join_lines(&lines[pos..pos + consumed]),
                line: base_line + lines[pos].idx,
            });
        }

        in_paragraph = kind == BlockKind::Paragraph;
        pos += consumed;
    }

    Ok(blocks)
}

fn join_lines(lines: &[Line<'_>]) -> String {
    let mut text = String::with_capacity(lines.iter().map(|l| l.text.len() + 1).sum());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        text.push_str(line.text);
    }
    text
}

// ---------------------------------------------------------------------------
// Matchers
// ---------------------------------------------------------------------------

/// `<!--` ... `-->`, possibly spanning lines. Unclosed comments do not
/// match and fall through to the paragraph rule.
fn match_comment(lines: &[Line<'_>]) -> Option<usize> {
    if !lines[0].text.trim_start().starts_with("<!--") {
        return None;
    }
    lines
        .iter()
        .position(|line| line.text.contains("-->"))
        .map(|i| i + 1)
}

/// `#`x1-6 + space + text, a single line.
fn match_atx_heading(lines: &[Line<'_>]) -> Option<usize> {
    let bytes = lines[0].text.as_bytes();
    let hashes = bytes.iter().take_while(|&&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    if bytes.get(hashes) != Some(&b' ') {
        return None;
    }
    if lines[0].text[hashes + 1..].trim().is_empty() {
        return None;
    }
    Some(1)
}

/// A text line underlined by a line of all `=` (level 1) or all `-`
/// (level 2), at least two characters wide.
fn match_setext_heading(lines: &[Line<'_>]) -> Option<usize> {
    let underline = lines.get(1)?.text;
    if underline.len() < 2 {
        return None;
    }
    let first = underline.as_bytes()[0];
    if first != b'=' && first != b'-' {
        return None;
    }
    if underline.bytes().all(|b| b == first) {
        Some(2)
    } else {
        None
    }
}

/// `>info` / `>warn` / `>danger` on its own line, followed by one or more
/// `> `-prefixed body lines.
fn match_note(lines: &[Line<'_>]) -> Option<usize> {
    let marker = lines[0].text.trim_end().strip_prefix('>')?;
    if !matches!(marker, "info" | "warn" | "danger") {
        return None;
    }
    let body = lines[1..]
        .iter()
        .take_while(|line| line.text.starts_with("> "))
        .count();
    if body == 0 {
        return None;
    }
    Some(1 + body)
}

/// One or more `> `-prefixed lines.
fn match_quote(lines: &[Line<'_>]) -> Option<usize> {
    let count = lines
        .iter()
        .take_while(|line| line.text.starts_with("> "))
        .count();
    if count == 0 {
        None
    } else {
        Some(count)
    }
}

/// A ``` fence line (with optional language tag) closed by a ``` line,
/// with at least one inner line. Unclosed fences fall through.
fn match_code(lines: &[Line<'_>]) -> Option<usize> {
    if !lines[0].text.starts_with("```") {
        return None;
    }
    let close = lines[2..]
        .iter()
        .position(|line| line.text.trim_end() == "```")?;
    Some(close + 3)
}

/// One or more marker-led lines: optional spaces, then a bullet
/// (`-`/`+`/`*`) or `digits.`, a space, and item text. A backslash before
/// the marker suppresses the rule for that line.
fn match_list(lines: &[Line<'_>]) -> Option<usize> {
    let count = lines
        .iter()
        .take_while(|line| is_list_item_line(line.text))
        .count();
    if count == 0 {
        None
    } else {
        Some(count)
    }
}

fn is_list_item_line(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i >= bytes.len() {
        return false;
    }
    match bytes[i] {
        b'\\' => false,
        b'-' | b'+' | b'*' => {
            bytes.get(i + 1) == Some(&b' ') && !text[i + 2..].trim().is_empty()
        }
        b'0'..=b'9' => {
            let mut j = i;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            bytes.get(j) == Some(&b'.')
                && bytes.get(j + 1) == Some(&b' ')
                && !text[j + 2..].trim().is_empty()
        }
        _ => false,
    }
}

/// Table candidate: a `|`-delimited header, an alignment row, and one or
/// more body rows. The candidate is then cross-validated: every line must
/// carry the same count of unescaped `|` delimiters, otherwise the whole
/// candidate is rejected and the span falls through to later rules.
fn match_table(lines: &[Line<'_>]) -> Option<usize> {
    if !is_pipe_row(lines[0].text) {
        return None;
    }
    if !is_alignment_row(lines.get(1)?.text) {
        return None;
    }
    let body = lines[2..]
        .iter()
        .take_while(|line| is_pipe_row(line.text))
        .count();
    if body == 0 {
        return None;
    }

    let span = 2 + body;
    let head_pipes = count_unescaped_pipes(lines[0].text);
    for line in &lines[..span] {
        if count_unescaped_pipes(line.text) != head_pipes {
            return None;
        }
    }
    Some(span)
}

/// A row shape: starts and ends with `|`, with at least one cell between.
fn is_pipe_row(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() > 2 && bytes[0] == b'|' && bytes[bytes.len() - 1] == b'|'
}

/// The alignment row: every cell is `--`+ or `:--+:`.
fn is_alignment_row(text: &str) -> bool {
    if !is_pipe_row(text) {
        return false;
    }
    let inner = &text[1..text.len() - 1];
    inner.split('|').all(|cell| {
        let dashes = cell.strip_prefix(':').map_or(cell, |c| {
            c.strip_suffix(':').unwrap_or("")
        });
        dashes.len() >= 2 && dashes.bytes().all(|b| b == b'-')
    })
}

/// Count `|` characters not preceded by a backslash.
pub(crate) fn count_unescaped_pipes(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut count = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'|' && (i == 0 || bytes[i - 1] != b'\\') {
            count += 1;
        }
    }
    count
}

/// Split a row on unescaped `|` and drop the two empty outer cells the
/// leading/trailing delimiters produce.
pub(crate) fn split_columns(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut cells = Vec::new();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'|' && (i == 0 || bytes[i - 1] != b'\\') {
            cells.push(&text[start..i]);
            start = i + 1;
        }
    }
    cells.push(&text[start..]);
    // The shape guarantees leading and trailing delimiters.
    if cells.len() >= 2 {
        cells.remove(0);
        cells.pop();
    }
    cells
}

/// `%% METHOD /path`, one line, METHOD from the closed method set.
fn match_http(lines: &[Line<'_>]) -> Option<usize> {
    let rest = lines[0].text.strip_prefix("%% ")?;
    let (method, path) = rest.split_once(' ')?;
    crate::ast::HttpMethod::from_token(method)?;
    if path.trim().is_empty() {
        return None;
    }
    Some(1)
}

/// A line of 3+ repeated `*`, `-`, or `_`.
fn match_ruler(lines: &[Line<'_>]) -> Option<usize> {
    let text = lines[0].text;
    if text.len() < 3 {
        return None;
    }
    let first = text.as_bytes()[0];
    if !matches!(first, b'*' | b'-' | b'_') {
        return None;
    }
    if text.bytes().all(|b| b == first) {
        Some(1)
    } else {
        None
    }
}

/// Catch-all: claims one non-blank line. Adjacent claimed lines are
/// coalesced into a single paragraph by the segmentation loop, which
/// keeps higher-priority rules in play at every line boundary.
fn match_paragraph_line(_lines: &[Line<'_>]) -> Option<usize> {
    Some(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines;

    // Blank separator lines are the only text segmentation may drop;
    // every other character must land in exactly one raw block, in
    // source order.
    #[test]
    fn raw_blocks_reconstruct_the_non_blank_input() {
        let input = "\
<!-- draft -->\n\
# Title\n\
Subtitle\n\
--------\n\
>warn\n\
> careful now\n\
\n\
> a plain quote\n\
```rs\n\
let x = 1;\n\
```\n\
- a\n\
  - b\n\
| a | b |\n\
|---|---|\n\
| 1 | 2 |\n\
%% GET /ping\n\
***\n\
\n\
closing paragraph\n\
over two lines";

        let split = lines::split(input);
        let blocks = segment(&RULES, &split, 1).unwrap();

        let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Comment,
                BlockKind::AtxHeading,
                BlockKind::SetextHeading,
                BlockKind::Note,
                BlockKind::Quote,
                BlockKind::Code,
                BlockKind::List,
                BlockKind::Table,
                BlockKind::Http,
                BlockKind::Ruler,
                BlockKind::Paragraph,
            ]
        );

        let joined: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();
        let non_blank: Vec<&str> = input.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(joined.join("\n"), non_blank.join("\n"));
    }
}
