//! # feedmark Core
//!
//! A parser for the feedmark Markdown dialect used by documentation
//! sources: ATX/Setext headings, `>info`-style callout notes, quotes,
//! nested lists, fenced code, pipe tables, `%%` HTTP route blocks, and a
//! small inline grammar (emphasis, code spans, links, escapes).
//!
//! Parsing is a pure function from text to a typed AST: segmentation
//! splits the document into classified raw blocks with a prioritized rule
//! table, then each block is formatted into one node of a closed sum
//! type. Notes and quotes re-enter the full pipeline, so nesting depth is
//! only bounded by the configurable recursion limit.
//!
//! ## Quick Start
//!
//! ```rust
//! use feedmark_core::{parse, Node};
//!
//! let ast = parse("# Hello World\n\nThis is a **paragraph**.").unwrap();
//!
//! assert_eq!(ast.len(), 2);
//! assert!(matches!(ast[0], Node::Heading(_)));
//! ```
//!
//! ## Structural fallback
//!
//! Malformed tables and half-formed HTTP routes are never errors: the
//! rule simply does not match and the text parses as a paragraph. Only
//! exceeding the recursion limit fails a parse:
//!
//! ```rust
//! use feedmark_core::{Parser, ParseErrorKind};
//!
//! let deep = "> ".repeat(10) + "too deep";
//! let err = Parser::new().max_depth(4).parse(&deep).unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::RecursionLimit);
//! ```

pub mod ast;
pub mod error;
pub mod inline;
pub mod outline;
pub mod parser;

mod lines;
mod list;
mod segment;

pub use ast::{Ast, Inline, Node};
pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse, Parser, DEFAULT_MAX_DEPTH};
