//! The write-side engine.
//!
//! Emits the line-oriented settings format: a delimited header block,
//! `name = value` property lines, comment lines. Like the reader, the
//! writer wraps exactly one output stream for its whole lifetime; all
//! stream failures propagate unchanged as [`TextsetError::Io`].
//!
//! [`TextsetError::Io`]: crate::TextsetError::Io

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TextsetError};
use crate::format::{WriterOptions, HEADER_MARKER, MIN_HEADER_RULE};

/// Writes the line-oriented settings format to any output stream.
///
/// ## Examples
///
/// ```rust
/// use textset::PlainWriter;
///
/// let mut buf = Vec::new();
/// let mut writer = PlainWriter::new(&mut buf);
/// writer.write_property("Count", "3", false, false)?;
/// writer.write_property("Label", "\"hi\"", true, false)?;
/// writer.flush()?;
/// drop(writer);
/// assert_eq!(buf, b"Count = 3\n// Label = \"hi\"\n");
/// # Ok::<(), textset::TextsetError>(())
/// ```
#[derive(Debug)]
pub struct PlainWriter<W: Write> {
    out: W,
    options: WriterOptions,
}

impl PlainWriter<BufWriter<File>> {
    /// Creates (truncating) a file for writing with default options.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> PlainWriter<W> {
    /// Wraps an output stream with default options.
    pub fn new(out: W) -> Self {
        Self::with_options(out, WriterOptions::default())
    }

    /// Wraps an output stream with explicit options.
    pub fn with_options(out: W, options: WriterOptions) -> Self {
        Self { out, options }
    }

    /// The options this writer was constructed with.
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Emits the header block.
    ///
    /// No-op when header omission is configured or every supplied line is
    /// empty. Otherwise emits an `=` rule of `max(3, longest line) + 2`
    /// characters as a `///` line, each non-empty line as a `//` line, the
    /// rule again, and one blank line.
    pub fn write_header<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        if self.options.omit_header || lines.iter().all(|l| l.as_ref().is_empty()) {
            return Ok(());
        }

        let longest = lines.iter().map(|l| l.as_ref().len()).max().unwrap_or(0);
        let rule = "=".repeat(longest.max(MIN_HEADER_RULE) + 2);

        writeln!(self.out, "{HEADER_MARKER} {rule}")?;
        for line in lines {
            let line = line.as_ref();
            if !line.is_empty() {
                writeln!(self.out, "// {line}")?;
            }
        }
        writeln!(self.out, "{HEADER_MARKER} {rule}")?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Emits one property line.
    ///
    /// When `newline` is set, a blank line precedes the property. When
    /// `optional` is set, the whole line is emitted as a comment, so the
    /// file documents the default value without forcing an explicit one.
    ///
    /// ## Errors
    ///
    /// [`TextsetError::Argument`] if `name` is empty.
    pub fn write_property(
        &mut self,
        name: &str,
        value: &str,
        optional: bool,
        newline: bool,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(TextsetError::Argument(
                "property name must not be empty".to_owned(),
            ));
        }
        if newline {
            writeln!(self.out)?;
        }

        let ws = if self.options.separator_spacing { " " } else { "" };
        let sep = self.options.separator;
        if optional {
            let indicator = &self.options.comment_indicator;
            writeln!(self.out, "{indicator} {name}{ws}{sep}{ws}{value}")?;
        } else {
            writeln!(self.out, "{name}{ws}{sep}{ws}{value}")?;
        }
        Ok(())
    }

    /// Emits a comment line with the configured indicator.
    pub fn write_comment(&mut self, text: &str) -> Result<()> {
        let indicator = self.options.comment_indicator.clone();
        self.write_comment_with(&indicator, text)
    }

    /// Emits a comment line with an explicit indicator.
    pub fn write_comment_with(&mut self, indicator: &str, text: &str) -> Result<()> {
        writeln!(self.out, "{indicator} {text}")?;
        Ok(())
    }

    /// Flushes the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying stream.
    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
