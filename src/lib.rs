//! # Textset
//!
//! A schema-validating flat-text settings codec: it serializes the scalar
//! fields of a struct into a human-editable, line-oriented text format and
//! back, driven by per-field attributes.
//!
//! ## Overview
//!
//! Textset is deliberately small. It handles exactly one shape of data: a
//! flat struct of scalar values, and in exchange produces files a person
//! can open in any editor, tweak, and feed back:
//!
//! ```text
//! /// =====================================
//! // Machine-written settings file.
//! /// =====================================
//!
//! Port = 8080
//! Greeting = "hello"
//! // Timeout = 30
//! ```
//!
//! Optional settings still at their default value are written as comment
//! lines, so the file documents every knob without forcing a value.
//!
//! ### Key Features
//!
//! *   **Attribute-driven schema:** `#[derive(TextsetObject)]` resolves each
//!     field and its `#[textset(...)]` attribute into a static descriptor
//!     table. Ignore fields, rename them, order them by priority, flag them
//!     optional, all declaratively.
//! *   **Schema validation before I/O:** duplicate effective names abort
//!     serialization before a byte is written; unsupported field types do
//!     not even compile.
//! *   **Stable output:** fields are emitted by descending priority with
//!     declaration order breaking ties, so saving, loading, and saving again
//!     yields byte-identical files.
//! *   **Tolerant input:** blank lines and comments are skipped, trailing
//!     comments are stripped, and unknown property names are reported
//!     through callbacks instead of failing the load.
//! *   **Positional errors:** every malformed line is reported with its
//!     1-based line number, the original error preserved as `source()`.
//!
//! ## Architecture
//!
//! Data flows through four layers, leaves first:
//!
//! 1. [`codec`]: type-directed conversion between scalar values and text
//!    tokens (`TextScalar`).
//! 2. [`reader`] / [`writer`]: the line protocol (headers, comments,
//!    `name = value` lines), independent of any object model.
//! 3. [`object`]: the descriptor table derived from a type, its validation
//!    rules, and the priority ordering contract.
//! 4. [`api`]: the orchestrator composing the above, plus the [`Textset`]
//!    facade for whole files.
//!
//! ## Usage
//!
//! ```rust
//! use textset::{Textset, TextsetObject};
//!
//! #[derive(Debug, Default, PartialEq, TextsetObject)]
//! struct Settings {
//!     #[textset(name = "Port", priority = 1)]
//!     port: u16,
//!     #[textset(name = "Greeting")]
//!     greeting: String,
//!     #[textset(name = "Timeout", optional)]
//!     timeout_secs: u32,
//!     #[textset(ignore)]
//!     dirty: bool,
//! }
//!
//! let settings = Settings { port: 8080, greeting: "hello".into(), ..Default::default() };
//!
//! let mut buf = Vec::new();
//! Textset::write(&mut buf, &settings)?;
//!
//! let loaded: Settings = Textset::read(buf.as_slice())?;
//! assert_eq!(settings, loaded);
//! # Ok::<(), textset::TextsetError>(())
//! ```
//!
//! ### Safety and Error Handling
//!
//! * **No panics:** no `unwrap()` or `panic!()` in the library (enforced by
//!   clippy lints).
//! * **Comprehensive errors:** every failure is a [`TextsetError`].
//! * **Known format limitation:** string tokens are not escaped; a value
//!   containing `"` does not survive a round trip. See [`codec`].

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// --- PUBLIC API MODULES ---
pub mod api;
pub mod codec;
pub mod error;
pub mod format;
pub mod object;
pub mod reader;
pub mod writer;

// --- RE-EXPORTS ---

pub use api::{to_writer, Deserializer, Textset};
pub use codec::TextScalar;
pub use error::{Result, TextsetError};
pub use format::{ReaderOptions, WriterOptions};
pub use object::{FieldDescriptor, TextsetObject};
pub use reader::PlainReader;
pub use writer::PlainWriter;

// Re-export the derive macro so it is accessible as `textset::TextsetObject`.
pub use textset_derive::TextsetObject;
