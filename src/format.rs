//! Defines the physical text layout of settings files.
//!
//! # Layout
//! A file consists of an optional header block followed by the body:
//!
//! ```text
//! /// ==========
//! // header line 1
//! // header line 2
//! /// ==========
//!
//! Count = 3
//! // Label = "hi"
//! ```
//!
//! The header block is bounded by two identical `///` marker lines; the rule
//! between the markers is `=` repeated `max(3, longest header line) + 2`
//! times. Body lines are `name = value` pairs; a line whose first
//! non-whitespace characters are a comment indicator is skipped on read, which
//! is how optional properties document their default without forcing a value.
//!
//! Value tokens: `"quoted"` for strings, `'c'` for chars, `True`/`False` for
//! booleans, locale-independent numeric and date literals otherwise, and the
//! literal `Null` for an absent value.

/// Marker opening and closing a header block.
pub const HEADER_MARKER: &str = "///";

/// Comment indicators recognized on read, checked in order.
pub const DEFAULT_COMMENT_INDICATORS: [&str; 2] = ["//", "#"];

/// Default name/value separator.
pub const DEFAULT_SEPARATOR: char = '=';

/// Token encoding an absent value, distinct from the quoted string `"Null"`.
pub const NULL_TOKEN: &str = "Null";

/// Minimum length of the `=` rule in a written header block.
pub const MIN_HEADER_RULE: usize = 3;

/// Configuration for a [`PlainReader`](crate::reader::PlainReader).
///
/// Applied at construction and immutable for the lifetime of the reader.
/// Input is consumed as UTF-8 text; callers needing another encoding wrap
/// the stream before handing it to the reader.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Character separating a property name from its value.
    pub separator: char,
    /// Line prefixes treated as comments, checked in order.
    pub comment_indicators: Vec<String>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            comment_indicators: DEFAULT_COMMENT_INDICATORS
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }
}

/// Configuration for a [`PlainWriter`](crate::writer::PlainWriter).
///
/// Applied at construction and immutable for the lifetime of the writer.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Character separating a property name from its value.
    pub separator: char,
    /// Whether a single space surrounds the separator (`name = value`
    /// instead of `name=value`).
    pub separator_spacing: bool,
    /// Prefix used when emitting comment lines.
    pub comment_indicator: String,
    /// Suppress the header block entirely.
    pub omit_header: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            separator_spacing: true,
            comment_indicator: "//".to_owned(),
            omit_header: false,
        }
    }
}
