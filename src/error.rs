//! Centralized error handling for textset.
//!
//! All failure conditions are propagated through the crate-wide [`Result`]
//! type; the library contains no panicking paths (enforced by
//! `#![deny(clippy::panic)]` and `#![deny(clippy::unwrap_used)]`).
//!
//! ## Error Categories
//!
//! Errors are categorized by their domain:
//!
//! - **Argument** ([`TextsetError::Argument`]): an invalid argument supplied
//!   by the caller (empty property name, bad option value)
//! - **Schema** ([`TextsetError::Schema`]): the target type violates a
//!   structural rule, e.g. two fields resolving to the same effective name
//! - **Format** ([`TextsetError::Format`]): malformed input text: a broken
//!   header block, a missing separator, a token that does not match the
//!   expected literal shape
//! - **Range** ([`TextsetError::Range`]): a well-formed numeric token whose
//!   value falls outside the target type's range
//! - **Line** ([`TextsetError::Line`]): positional wrapper added while
//!   deserializing, carrying the 1-based line number and the original error
//! - **Io** ([`TextsetError::Io`]): underlying stream failures, propagated
//!   unchanged
//!
//! ## Propagation Policy
//!
//! Schema errors are fatal and reported before any output is written.
//! Per-line format errors during deserialization are wrapped in
//! [`TextsetError::Line`] and re-raised; there is no best-effort recovery of
//! a malformed line. Unrecognized property names are *not* errors; they are
//! reported through the unknown-element callbacks on
//! [`Deserializer`](crate::api::Deserializer).
//!
//! ## Examples
//!
//! ```rust
//! use std::error::Error;
//! use textset::TextsetError;
//!
//! fn describe(err: &TextsetError) {
//!     match err {
//!         TextsetError::Io(e) => eprintln!("I/O error: {e}"),
//!         TextsetError::Line { line, source } => {
//!             eprintln!("line {line}: {source}");
//!             assert!(err.source().is_some());
//!         }
//!         other => eprintln!("{other}"),
//!     }
//! }
//! ```

use std::fmt;
use std::io;
use std::sync::Arc;

/// A specialized `Result` type for textset operations.
///
/// Equivalent to `std::result::Result<T, TextsetError>`, used throughout the
/// library to simplify error handling.
pub type Result<T> = std::result::Result<T, TextsetError>;

/// The master error enum covering all failure domains in textset.
///
/// This type is `Clone` so errors can be stored for later analysis; I/O
/// errors are wrapped in `Arc` to make cloning cheap.
#[derive(Debug, Clone)]
pub enum TextsetError {
    /// An invalid argument was supplied by the caller.
    ///
    /// Raised for conditions the type system cannot rule out, such as
    /// writing a property with an empty name.
    Argument(String),

    /// The target type violates a structural rule of the codec.
    ///
    /// The canonical case is two fields resolving to the same effective
    /// name. Most structural rules of the schema (scalar-only members,
    /// settable fields, a parameterless constructor) are enforced at compile
    /// time by the derive macro and therefore never surface here.
    Schema(String),

    /// The input text does not conform to the line format.
    ///
    /// ## Common Causes
    ///
    /// - A header block opened with `///` but never closed
    /// - A property line with no separator character
    /// - A comment indicator inside a property name
    /// - A token that is not the expected literal shape (`'c'`, `"..."`,
    ///   `True`/`False`, a numeric or date literal)
    Format(String),

    /// A well-formed numeric token whose value is outside the range of the
    /// requested target type.
    Range(String),

    /// Positional wrapper for errors raised while consuming a stream.
    ///
    /// Added by the deserializer so a malformed line reports where it was
    /// found. The original error is preserved and available through
    /// [`std::error::Error::source`].
    Line {
        /// 1-based physical line number at which the error was raised.
        line: usize,
        /// The original error.
        source: Box<TextsetError>,
    },

    /// Low-level I/O failure (file not found, permission denied, disk full).
    ///
    /// The underlying `io::Error` is wrapped in an `Arc` to keep the error
    /// `Clone`.
    Io(Arc<io::Error>),
}

impl fmt::Display for TextsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argument(s) => write!(f, "Argument Error: {s}"),
            Self::Schema(s) => write!(f, "Schema Error: {s}"),
            Self::Format(s) => write!(f, "Format Error: {s}"),
            Self::Range(s) => write!(f, "Range Error: {s}"),
            Self::Line { line, source } => write!(f, "line {line}: {source}"),
            Self::Io(e) => write!(f, "I/O Error: {e}"),
        }
    }
}

impl std::error::Error for TextsetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Line { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for TextsetError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl TextsetError {
    /// Wraps `self` with the 1-based line position at which it occurred.
    ///
    /// Positional wrappers are not nested: re-wrapping an already positioned
    /// error keeps the innermost position, which is the one closest to the
    /// offending line.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            already @ Self::Line { .. } => already,
            other => Self::Line {
                line,
                source: Box::new(other),
            },
        }
    }
}
