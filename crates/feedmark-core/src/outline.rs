//! Title and section extraction.
//!
//! Downstream tooling treats the first level-1 heading as the document
//! title and every level-2 heading as a section part. The parser
//! guarantees headings are first-class nodes with an explicit level, so
//! this scan is a plain walk over the top-level AST. Whether a missing
//! title is an error is the caller's call, not the parser's.

use crate::ast::{Inline, Node};

/// Document title and section parts extracted from an AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    /// Text of the first level-1 heading.
    pub title: String,
    /// One entry per level-2 heading, in document order.
    pub parts: Vec<OutlinePart>,
}

/// A section part: its visible name and a slug usable as an anchor id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlinePart {
    pub id: String,
    pub name: String,
}

/// Extract the outline of a document.
///
/// Returns `None` when the document has no level-1 heading with
/// extractable text.
pub fn extract(ast: &[Node]) -> Option<Outline> {
    let title = ast.iter().find_map(|node| match node {
        Node::Heading(h) if h.level == 1 => Some(flatten_to_text(&h.content)),
        _ => None,
    })?;
    if title.trim().is_empty() {
        return None;
    }

    let parts = ast
        .iter()
        .filter_map(|node| match node {
            Node::Heading(h) if h.level == 2 => {
                let name = flatten_to_text(&h.content);
                if name.trim().is_empty() {
                    None
                } else {
                    Some(OutlinePart {
                        id: sluggify(&name),
                        name,
                    })
                }
            }
            _ => None,
        })
        .collect();

    Some(Outline { title, parts })
}

/// Concatenate the visible text of an inline sequence, descending into
/// formatting spans and link labels.
pub fn flatten_to_text(content: &[Inline]) -> String {
    let mut text = String::new();
    flatten_into(content, &mut text);
    text
}

fn flatten_into(content: &[Inline], text: &mut String) {
    for inline in content {
        match inline {
            Inline::Text(t) => text.push_str(t),
            Inline::Code(c) => text.push_str(c),
            Inline::Strong(inner) | Inline::Emphasis(inner) => flatten_into(inner, text),
            Inline::Link(link) => flatten_into(&link.label, text),
        }
    }
}

/// Turn heading text into a URL-safe slug: lowercase alphanumerics with
/// single dashes between runs.
pub fn sluggify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    slug
}
