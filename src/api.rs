//! Full-object serialize and deserialize, composing the codec, the schema,
//! and the line protocol reader/writer.

use std::io::{BufRead, BufReader, Cursor, Read, Write};
use std::path::Path;

use crate::error::{Result, TextsetError};
use crate::format::{ReaderOptions, WriterOptions};
use crate::object::{find_field, ordered_indices, validate_schema, TextsetObject};
use crate::reader::PlainReader;
use crate::writer::PlainWriter;

/// Informational header written at the top of every serialized file.
const FILE_HEADER: [&str; 2] = [
    "Machine-written settings file. Entries follow the `name = value` form.",
    "Commented entries are optional and show their default value.",
];

/// The main entry point for saving and loading settings objects.
///
/// These are the hooks a surrounding load/save/reload layer needs: open the
/// file, run the codec, release the handle on every exit path.
///
/// ## Examples
///
/// ```rust
/// use textset::{Textset, TextsetObject};
///
/// #[derive(Debug, Default, PartialEq, TextsetObject)]
/// struct Server {
///     #[textset(priority = 1)]
///     port: u16,
///     #[textset(optional)]
///     motd: String,
/// }
///
/// let server = Server { port: 8080, motd: String::new() };
/// let mut buf = Vec::new();
/// Textset::write(&mut buf, &server)?;
/// let loaded: Server = Textset::read(buf.as_slice())?;
/// assert_eq!(server, loaded);
/// # Ok::<(), textset::TextsetError>(())
/// ```
#[derive(Debug)]
pub struct Textset;

impl Textset {
    /// Serializes `object` to a file with default options.
    pub fn save<T, P>(path: P, object: &T) -> Result<()>
    where
        T: TextsetObject,
        P: AsRef<Path>,
    {
        Self::save_with(path, object, WriterOptions::default())
    }

    /// Serializes `object` to a file with explicit writer options.
    pub fn save_with<T, P>(path: P, object: &T, options: WriterOptions) -> Result<()>
    where
        T: TextsetObject,
        P: AsRef<Path>,
    {
        let file = std::fs::File::create(path)?;
        let mut writer = PlainWriter::with_options(std::io::BufWriter::new(file), options);
        to_writer(&mut writer, object)?;
        writer.flush()
    }

    /// Serializes `object` to an in-memory output stream.
    pub fn write<T, W>(dst: W, object: &T) -> Result<()>
    where
        T: TextsetObject,
        W: Write,
    {
        let mut writer = PlainWriter::new(dst);
        to_writer(&mut writer, object)?;
        writer.flush()
    }

    /// Deserializes a fresh `T` from a file with default options.
    ///
    /// Unknown property names are ignored; use [`Deserializer`] to observe
    /// them.
    pub fn load<T, P>(path: P) -> Result<T>
    where
        T: TextsetObject,
        P: AsRef<Path>,
    {
        Self::load_with(path, ReaderOptions::default())
    }

    /// Deserializes a fresh `T` from a file with explicit reader options.
    pub fn load_with<T, P>(path: P, options: ReaderOptions) -> Result<T>
    where
        T: TextsetObject,
        P: AsRef<Path>,
    {
        let file = std::fs::File::open(path)?;
        let mut reader = PlainReader::with_options(BufReader::new(file), options);
        Deserializer::new().read_from(&mut reader)
    }

    /// Deserializes a fresh `T` from an in-memory input stream.
    pub fn read<T, R>(src: R) -> Result<T>
    where
        T: TextsetObject,
        R: Read,
    {
        let mut reader = PlainReader::new(BufReader::new(src));
        Deserializer::new().read_from(&mut reader)
    }

    /// Deserializes a fresh `T` from a string slice.
    pub fn read_str<T: TextsetObject>(text: &str) -> Result<T> {
        let mut reader = PlainReader::new(Cursor::new(text.as_bytes()));
        Deserializer::new().read_from(&mut reader)
    }
}

/// Serializes `object` through an existing [`PlainWriter`].
///
/// Validates the schema first (fail fast, before any output), builds the
/// default instance for optional comparisons, then emits the header and
/// every field in priority order. A field flagged optional is written as a
/// comment line only while its value equals the default; once mutated it is
/// written live.
pub fn to_writer<T, W>(writer: &mut PlainWriter<W>, object: &T) -> Result<()>
where
    T: TextsetObject,
    W: Write,
{
    validate_schema::<T>()?;
    let defaults = T::default();
    let descriptors = T::descriptors();

    writer.write_header(&FILE_HEADER)?;
    for index in ordered_indices::<T>() {
        let desc = &descriptors[index];
        let token = object.encode_field(index);
        let elide = desc.optional && object.field_is_default(index, &defaults);
        writer.write_property(desc.name, &token, elide, desc.newline)?;
    }
    Ok(())
}

/// Streaming deserializer with observer-style unknown-element reporting.
///
/// Zero or more callbacks may be registered; each unmatched property line
/// notifies all of them, in registration order, with the raw name and value
/// token. No handling is required; deserialization continues either way.
///
/// ## Examples
///
/// ```rust
/// use textset::{Deserializer, PlainReader, TextsetObject};
///
/// #[derive(Debug, Default, TextsetObject)]
/// struct Narrow {
///     kept: i32,
/// }
///
/// let text = "kept = 1\nGhost = \"x\"\n";
/// let mut ghosts = Vec::new();
/// let mut reader = PlainReader::new(text.as_bytes());
/// let narrow: Narrow = Deserializer::new()
///     .on_unknown(|name, value| ghosts.push((name.to_owned(), value.to_owned())))
///     .read_from(&mut reader)?;
/// assert_eq!(narrow.kept, 1);
/// assert_eq!(ghosts, vec![("Ghost".to_owned(), "\"x\"".to_owned())]);
/// # Ok::<(), textset::TextsetError>(())
/// ```
pub struct Deserializer<'a> {
    unknown_handlers: Vec<Box<dyn FnMut(&str, &str) + 'a>>,
}

impl Default for Deserializer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Deserializer<'a> {
    /// Creates a deserializer with no unknown-element callbacks.
    pub fn new() -> Self {
        Self {
            unknown_handlers: Vec::new(),
        }
    }

    /// Registers a callback invoked once per unmatched property line.
    #[must_use]
    pub fn on_unknown<F: FnMut(&str, &str) + 'a>(mut self, handler: F) -> Self {
        self.unknown_handlers.push(Box::new(handler));
        self
    }

    /// Deserializes a fresh `T` from an existing [`PlainReader`].
    ///
    /// Constructs `T::default()` and assigns every property line to its
    /// matching field. Format and range errors raised mid-stream are
    /// re-wrapped with the 1-based line position, the original error kept as
    /// `source()`.
    pub fn read_from<T, R>(mut self, reader: &mut PlainReader<R>) -> Result<T>
    where
        T: TextsetObject,
        R: BufRead,
    {
        let mut object = T::default();
        loop {
            let next = reader.read_next_value();
            let line = reader.line_number();
            let Some((name, value)) = next.map_err(|e| e.at_line(line))? else {
                return Ok(object);
            };

            if name.is_empty() {
                return Err(
                    TextsetError::Format("property name is empty".to_owned()).at_line(line)
                );
            }
            if value.is_empty() {
                return Err(TextsetError::Format(format!(
                    "property '{name}' has an empty value"
                ))
                .at_line(line));
            }

            match find_field::<T>(&name) {
                Some(index) => object
                    .decode_field(index, &value)
                    .map_err(|e| e.at_line(line))?,
                None => {
                    for handler in &mut self.unknown_handlers {
                        handler(&name, &value);
                    }
                }
            }
        }
    }
}
