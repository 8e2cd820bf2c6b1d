use std::fmt;

/// Error kinds for categorizing parse failures.
///
/// Structural ambiguities (malformed tables, half-formed HTTP routes) are
/// never errors: the matching rule simply fails and the text falls through
/// to the paragraph catch-all. Only genuinely exceptional conditions end up
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Nested quote/note/list structure exceeded the configured depth.
    RecursionLimit,
    /// The segmenter failed to consume input. Unreachable as long as the
    /// paragraph catch-all is in the rule table; reported instead of
    /// looping forever if the table is ever broken.
    SegmentationGap,
}

/// A fatal parse error with the line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// 1-based line in the source document, when known.
    pub line: Option<usize>,
    /// Error categorization.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create an error for nesting beyond the configured maximum depth.
    pub fn recursion_limit(max_depth: usize, line: usize) -> Self {
        Self {
            message: format!("nesting exceeds the maximum depth of {}", max_depth),
            line: Some(line),
            kind: ParseErrorKind::RecursionLimit,
        }
    }

    /// Create an internal invariant violation for unconsumed input.
    pub fn segmentation_gap(line: usize) -> Self {
        Self {
            message: "no block rule consumed input (internal invariant violated)".to_string(),
            line: Some(line),
            kind: ParseErrorKind::SegmentationGap,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(line) = self.line {
            write!(f, " at line {}", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
