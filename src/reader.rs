//! The read-side engine.
//!
//! Forward-only, line-buffered parsing of the text format into classified
//! lines: an optional header block, property lines, comment lines. The
//! reader knows nothing about the object model; it hands `(name, value)`
//! pairs to the deserializer one at a time and never buffers a document.
//!
//! A reader wraps exactly one input stream for its whole lifetime and is
//! meant for single-threaded, sequential use from open to end of stream.
//! Ownership makes use-after-close unrepresentable: dropping the reader
//! releases the stream, and no handle remains to call.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, TextsetError};
use crate::format::{ReaderOptions, HEADER_MARKER};

/// Reads the line-oriented settings format from any buffered stream.
///
/// ## Examples
///
/// ```rust
/// use textset::PlainReader;
///
/// let text = "// banner-less file\nCount = 3\n";
/// let mut reader = PlainReader::new(text.as_bytes());
/// let (name, value) = reader.read_next_value()?.expect("one property");
/// assert_eq!(name, "Count");
/// assert_eq!(value, "3");
/// # Ok::<(), textset::TextsetError>(())
/// ```
#[derive(Debug)]
pub struct PlainReader<R> {
    input: R,
    options: ReaderOptions,
    line: usize,
}

impl PlainReader<BufReader<File>> {
    /// Opens a file for reading with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> PlainReader<R> {
    /// Wraps a buffered stream with default options.
    pub fn new(input: R) -> Self {
        Self::with_options(input, ReaderOptions::default())
    }

    /// Wraps a buffered stream with explicit options.
    pub fn with_options(input: R, options: ReaderOptions) -> Self {
        Self {
            input,
            options,
            line: 0,
        }
    }

    /// The 1-based number of the last physical line consumed.
    ///
    /// Zero before the first read. Used by the deserializer to annotate
    /// errors with their position.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// The options this reader was constructed with.
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Reads the header block, if the stream starts with one.
    ///
    /// A header opens with a `///` marker line, carries `//` lines, and
    /// closes with another `///` line. Entries are returned with markers and
    /// surrounding whitespace stripped.
    ///
    /// If the first line does not open a header, `Ok(None)` is returned and
    /// that line has been consumed; callers that probe for a header lose the
    /// first body line of a header-less file. This reproduces the behavior
    /// settings files in the wild rely on (the standard writer always emits
    /// a header) and is kept as-is rather than silently changed.
    ///
    /// ## Errors
    ///
    /// [`TextsetError::Format`] if an intervening line does not start with
    /// `//`, or the stream ends before the closing marker.
    pub fn read_header(&mut self) -> Result<Option<Vec<String>>> {
        let first = match self.next_line()? {
            Some(line) => line,
            None => return Ok(None),
        };
        if !first.trim_start().starts_with(HEADER_MARKER) {
            return Ok(None);
        }

        let mut entries = Vec::new();
        loop {
            let line = self.next_line()?.ok_or_else(|| {
                TextsetError::Format("header block is missing its closing marker".to_owned())
            })?;
            let trimmed = line.trim();
            if trimmed.starts_with(HEADER_MARKER) {
                return Ok(Some(entries));
            }
            let entry = trimmed.strip_prefix("//").ok_or_else(|| {
                TextsetError::Format(format!(
                    "header line {} does not start with a comment marker",
                    self.line
                ))
            })?;
            entries.push(entry.trim().to_owned());
        }
    }

    /// Reads the next `(name, value)` property line.
    ///
    /// Blank lines and comment lines are skipped. The qualifying line is
    /// split at the first occurrence of the configured separator; a trailing
    /// comment in the value portion is stripped before trimming. Returns
    /// `Ok(None)` at end of stream.
    ///
    /// ## Errors
    ///
    /// [`TextsetError::Format`] if the line has no separator, or the name
    /// portion contains a comment indicator.
    pub fn read_next_value(&mut self) -> Result<Option<(String, String)>> {
        // Iterative on purpose: a long run of blank or comment lines must
        // not consume stack.
        loop {
            let line = match self.next_line()? {
                Some(line) => line,
                None => return Ok(None),
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || self.starts_with_indicator(trimmed) {
                continue;
            }

            let (name, rest) = trimmed
                .split_once(self.options.separator)
                .ok_or_else(|| {
                    TextsetError::Format(format!(
                        "missing separator '{}'",
                        self.options.separator
                    ))
                })?;

            if self.find_indicator(name).is_some() {
                return Err(TextsetError::Format(format!(
                    "name '{}' contains a comment indicator",
                    name.trim()
                )));
            }

            let value = match self.find_indicator(rest) {
                Some(pos) => &rest[..pos],
                None => rest,
            };
            return Ok(Some((name.trim().to_owned(), value.trim().to_owned())));
        }
    }

    /// Reads the next comment line, skipping everything else.
    ///
    /// The returned text has the indicator and surrounding whitespace
    /// removed. Returns `Ok(None)` at end of stream.
    pub fn read_next_comment(&mut self) -> Result<Option<String>> {
        loop {
            let line = match self.next_line()? {
                Some(line) => line,
                None => return Ok(None),
            };
            let trimmed = line.trim();
            for indicator in &self.options.comment_indicators {
                if let Some(text) = trimmed.strip_prefix(indicator.as_str()) {
                    return Ok(Some(text.trim().to_owned()));
                }
            }
        }
    }

    /// Consumes one physical line, maintaining the position counter.
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    fn starts_with_indicator(&self, line: &str) -> bool {
        self.options
            .comment_indicators
            .iter()
            .any(|ind| line.starts_with(ind.as_str()))
    }

    /// Position of the earliest comment indicator occurrence, if any.
    fn find_indicator(&self, text: &str) -> Option<usize> {
        self.options
            .comment_indicators
            .iter()
            .filter_map(|ind| text.find(ind.as_str()))
            .min()
    }
}
