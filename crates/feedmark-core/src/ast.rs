//! Abstract Syntax Tree types for feedmark documents.
//!
//! Every construct the dialect knows is one variant of a closed sum type,
//! so downstream consumers (outline extraction, code generation) can match
//! exhaustively and never meet an unrecognized kind. Nodes own their
//! content; nested documents (notes, quotes) are plain `Vec<Node>` trees
//! with no sharing and no cycles.

/// A parsed document: the top-level blocks in source order.
///
/// Nested content inside [`Node::Note`] and [`Node::Quote`] uses the same
/// type, so the structure is self-similar all the way down.
pub type Ast = Vec<Node>;

/// Block-level AST nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// HTML-style comment, delimiters stripped and lines trimmed.
    Comment(Comment),
    /// Section heading (levels 1-6), from ATX hashes or a Setext underline.
    Heading(Heading),
    /// Text paragraph with inline formatting.
    Paragraph(Paragraph),
    /// Callout note; its body is a fully parsed nested document.
    Note(Note),
    /// Block quotation; its body is a fully parsed nested document.
    Quote(Quote),
    /// Ordered or unordered list, nested by indentation.
    List(List),
    /// HTTP route declaration (`%% GET /users/{id}`).
    Http(HttpRoute),
    /// Fenced code block; content is kept verbatim.
    Code(CodeBlock),
    /// Pipe table with per-column alignment.
    Table(Table),
    /// Horizontal ruler, no payload.
    Ruler,
}

/// Comment contents with the `<!--` / `-->` delimiters removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

/// Section heading with level and inline content.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Heading level (1-6).
    pub level: u8,
    /// Inline content (may include formatting).
    pub content: Vec<Inline>,
}

/// Text paragraph containing inline elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub content: Vec<Inline>,
}

/// Severity of a callout note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Info,
    Warn,
    Danger,
}

impl NoteKind {
    /// Resolve a note marker (the text after `>` on the opening line).
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "info" => Some(NoteKind::Info),
            "warn" => Some(NoteKind::Warn),
            "danger" => Some(NoteKind::Danger),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteKind::Info => "info",
            NoteKind::Warn => "warn",
            NoteKind::Danger => "danger",
        }
    }
}

/// Callout note with a severity and an arbitrarily nested body.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub kind: NoteKind,
    /// Recursively parsed body blocks.
    pub content: Ast,
}

/// Block quotation with a recursively parsed body.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub content: Ast,
}

/// A list block. Nesting is expressed by [`ListEntry::Nested`] entries
/// appearing between sibling items.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    /// True when the first marker is a number (`1.`), false for bullets.
    pub ordered: bool,
    /// Items and nested sublists in source order.
    pub items: Vec<ListEntry>,
}

/// One entry of a [`List`]: either a leaf item or a deeper list.
///
/// A nested list always follows the sibling item it belongs under.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    /// Leaf item, marker stripped, text inline-parsed.
    Item(Vec<Inline>),
    /// Sublist produced by a run of deeper-indented lines.
    Nested(List),
}

/// The closed set of HTTP methods the route grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    /// Resolve a method token; anything else makes the route rule fail.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            "HEAD" => Some(HttpMethod::Head),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

/// One piece of an HTTP route: the method, a literal path fragment, or a
/// `{param}` placeholder (braces retained).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpPart {
    Method(HttpMethod),
    Text(String),
    Param(String),
}

/// HTTP route block: method followed by alternating path text and params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRoute {
    pub parts: Vec<HttpPart>,
}

/// Fenced code block. Content is never inline-parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag from the opening fence, if any.
    pub language: Option<String>,
    /// Inner lines, verbatim.
    pub content: String,
}

/// Pipe table. Every row has exactly as many cells as the header;
/// candidates violating that are never recognized as tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Per-column centering flags from the alignment row.
    pub centered: Vec<bool>,
    /// Header cells.
    pub head: Vec<Vec<Inline>>,
    /// Body rows.
    pub rows: Vec<Vec<Vec<Inline>>>,
}

/// Inline-level AST nodes (within paragraphs, headings, cells, items).
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Plain text, escapes already resolved.
    Text(String),
    /// Strong text (double marker), content recursively parsed.
    Strong(Vec<Inline>),
    /// Emphasized text (single marker), content recursively parsed.
    Emphasis(Vec<Inline>),
    /// Inline code span; content is verbatim and never re-parsed.
    Code(String),
    /// `[label](target)` link.
    Link(Link),
}

/// Hyperlink with a formatted label and a plain-text target.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub label: Vec<Inline>,
    pub target: String,
}
