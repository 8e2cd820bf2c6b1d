//! Block formatting and the parse entry point.
//!
//! The pipeline is `segment -> format each raw block -> AST`. Notes and
//! quotes strip their markers and feed the reassembled text back through
//! the same pipeline, so nested content is a full document in its own
//! right. Recursion depth is bounded; exceeding the limit fails the whole
//! parse with a positioned error.

use crate::ast::{
    Ast, CodeBlock, Comment, Heading, HttpMethod, HttpPart, HttpRoute, Node, Note, NoteKind,
    Paragraph, Quote, Table,
};
use crate::error::ParseError;
use crate::inline::parse_inlines;
use crate::lines;
use crate::list;
use crate::segment::{self, split_columns, BlockKind, RawBlock, RULES};

/// Default bound on quote/note/list nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Dialect parser with a configurable recursion bound.
///
/// Parsing is a pure function of the input text: the parser holds no
/// mutable state, so one instance can be shared freely across threads.
///
/// ```rust
/// use feedmark_core::Parser;
///
/// let ast = Parser::new().parse("# Title\n\nHello **world**.").unwrap();
/// assert_eq!(ast.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser with the default recursion bound.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum nesting depth for quotes, notes, and lists.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a document into its AST.
    pub fn parse(&self, input: &str) -> Result<Ast, ParseError> {
        self.parse_at(input, 1, 0)
    }

    /// Run the full pipeline on `text`, whose first line is `base_line`
    /// (1-based) in the source document.
    fn parse_at(&self, text: &str, base_line: usize, depth: usize) -> Result<Ast, ParseError> {
        if depth > self.max_depth {
            return Err(ParseError::recursion_limit(self.max_depth, base_line));
        }
        let lines = lines::split(text);
        let raw = segment::segment(&RULES, &lines, base_line)?;
        raw.into_iter()
            .map(|block| self.format_block(block, depth))
            .collect()
    }

    /// Convert one classified raw block into a typed node.
    fn format_block(&self, raw: RawBlock, depth: usize) -> Result<Node, ParseError> {
        match raw.kind {
            BlockKind::Comment => Ok(format_comment(&raw.text)),
            BlockKind::AtxHeading => Ok(format_atx_heading(&raw.text)),
            BlockKind::SetextHeading => Ok(format_setext_heading(&raw.text)),
            BlockKind::Paragraph => Ok(Node::Paragraph(Paragraph {
                content: parse_inlines(&raw.text),
            })),
            BlockKind::Note => self.format_note(&raw, depth),
            BlockKind::Quote => self.format_quote(&raw, depth),
            BlockKind::List => {
                let parsed = list::parse(&raw.text, raw.line, depth + 1, self.max_depth)?;
                Ok(Node::List(parsed))
            }
            BlockKind::Http => Ok(format_http(&raw.text)),
            BlockKind::Code => Ok(format_code(&raw.text)),
            BlockKind::Table => Ok(format_table(&raw.text)),
            BlockKind::Ruler => Ok(Node::Ruler),
        }
    }

    /// `>kind` line selects the severity; body lines lose their `> `
    /// marker and are re-parsed as a nested document.
    fn format_note(&self, raw: &RawBlock, depth: usize) -> Result<Node, ParseError> {
        let mut lines = raw.text.lines();
        let marker = lines.next().unwrap_or("").trim_end();
        // The segmenter only classifies known markers; a miss here means
        // the matcher and the formatter disagree.
        let kind = match NoteKind::from_marker(marker.trim_start_matches('>')) {
            Some(kind) => kind,
            None => {
                debug_assert!(false, "note block with unrecognized marker: {marker:?}");
                NoteKind::Info
            }
        };
        let body = join_stripped(lines);
        let content = self.parse_at(&body, raw.line + 1, depth + 1)?;
        Ok(Node::Note(Note { kind, content }))
    }

    /// Every line loses its `> ` marker; the rest is a nested document.
    fn format_quote(&self, raw: &RawBlock, depth: usize) -> Result<Node, ParseError> {
        let body = join_stripped(raw.text.lines());
        let content = self.parse_at(&body, raw.line, depth + 1)?;
        Ok(Node::Quote(Quote { content }))
    }
}

/// Parse a document with the default configuration.
pub fn parse(input: &str) -> Result<Ast, ParseError> {
    Parser::new().parse(input)
}

/// Strip the two-character `> ` marker from each line and rejoin.
fn join_stripped<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let stripped: Vec<&str> = lines
        .map(|line| line.get(2..).unwrap_or(""))
        .collect();
    stripped.join("\n")
}

fn format_comment(text: &str) -> Node {
    let start = text.find("<!--").map(|i| i + 4).unwrap_or(0);
    let end = text.rfind("-->").unwrap_or(text.len()).max(start);
    let inner = &text[start..end];
    let trimmed: Vec<&str> = inner.lines().map(str::trim).collect();
    let mut slice: &[&str] = &trimmed;
    while let [first, rest @ ..] = slice {
        if !first.is_empty() {
            break;
        }
        slice = rest;
    }
    while let [rest @ .., last] = slice {
        if !last.is_empty() {
            break;
        }
        slice = rest;
    }
    Node::Comment(Comment {
        text: slice.join("\n"),
    })
}

/// Level from the hash count (the matcher caps it at 6), title after
/// the space.
fn format_atx_heading(text: &str) -> Node {
    let hashes = text.bytes().take_while(|&b| b == b'#').count();
    let title = text[hashes..].trim_start();
    Node::Heading(Heading {
        level: hashes as u8,
        content: parse_inlines(title),
    })
}

/// The underline character picks the level; the title line is taken as
/// is, even when it starts with `#`.
fn format_setext_heading(text: &str) -> Node {
    let mut lines = text.lines();
    let title = lines.next().unwrap_or("");
    let underline = lines.next().unwrap_or("");
    let level = if underline.starts_with('=') { 1 } else { 2 };
    Node::Heading(Heading {
        level,
        content: parse_inlines(title),
    })
}

fn format_http(text: &str) -> Node {
    let rest = text.strip_prefix("%% ").unwrap_or(text);
    let (method, path) = rest.split_once(' ').unwrap_or((rest, ""));
    let mut parts = Vec::with_capacity(4);
    // The segmenter only classifies lines with a known method token.
    if let Some(method) = HttpMethod::from_token(method) {
        parts.push(HttpPart::Method(method));
    }

    let mut remaining = path;
    while !remaining.is_empty() {
        match remaining.find('{') {
            Some(0) => match remaining.find('}') {
                Some(end) => {
                    parts.push(HttpPart::Param(remaining[..=end].to_string()));
                    remaining = &remaining[end + 1..];
                }
                None => {
                    // Unbalanced brace: no partial param node.
                    parts.push(HttpPart::Text(remaining.to_string()));
                    remaining = "";
                }
            },
            Some(brace) => {
                parts.push(HttpPart::Text(remaining[..brace].to_string()));
                remaining = &remaining[brace..];
            }
            None => {
                parts.push(HttpPart::Text(remaining.to_string()));
                remaining = "";
            }
        }
    }

    Node::Http(HttpRoute { parts })
}

fn format_code(text: &str) -> Node {
    let mut lines = text.lines();
    let fence = lines.next().unwrap_or("");
    let tag = fence.trim_start_matches('`').trim();
    let language = if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    };

    let inner: Vec<&str> = lines.collect();
    let content = match inner.split_last() {
        // Drop the closing fence line.
        Some((_, body)) => body.join("\n"),
        None => String::new(),
    };

    Node::Code(CodeBlock { language, content })
}

fn format_table(text: &str) -> Node {
    let mut lines = text.lines();
    let head_line = lines.next().unwrap_or("");
    let align_line = lines.next().unwrap_or("");

    let centered = split_columns(align_line)
        .into_iter()
        .map(|cell| cell.contains(':'))
        .collect();
    let head = split_columns(head_line)
        .into_iter()
        .map(|cell| parse_inlines(cell.trim()))
        .collect();
    let rows = lines
        .map(|row| {
            split_columns(row)
                .into_iter()
                .map(|cell| parse_inlines(cell.trim()))
                .collect()
        })
        .collect();

    Node::Table(Table {
        centered,
        head,
        rows,
    })
}
