//! The serialization schema of a target type.
//!
//! [`TextsetObject`] is implemented by `#[derive(TextsetObject)]`, which
//! resolves each non-ignored field and its `#[textset(...)]` attribute into
//! a static [`FieldDescriptor`] table in declaration order. The free
//! functions here operate on that table: duplicate-name validation, the
//! priority ordering contract, and name lookup for the deserializer.
//!
//! Structural rules the original wire format checks at run time are pushed
//! to compile time instead: the `Default` supertrait stands in for a public
//! parameterless constructor, every serialized field type must implement
//! [`TextScalar`](crate::codec::TextScalar) (a nested struct or collection
//! fails to compile), and the derive only accepts structs with named, owned
//! fields. The one rule that stays at run time is effective-name uniqueness,
//! checked before any output is written.

use crate::error::{Result, TextsetError};

/// The resolved serialization plan for one field.
///
/// Derived once per type, at compile time, from the field and its attached
/// `#[textset(...)]` attribute; immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Effective name: the attribute override, or the field's own name.
    pub name: &'static str,
    /// Higher priorities are written first. Default 0.
    pub priority: i32,
    /// Whether the field may be elided to a comment line when its value
    /// equals the type's default.
    pub optional: bool,
    /// Whether a blank line precedes the field in output.
    pub newline: bool,
}

/// A type that can be serialized to and from the flat-text settings format.
///
/// Implemented by `#[derive(TextsetObject)]`; the fresh instance required on
/// every load comes from the `Default` supertrait. Fields are addressed by
/// their index into [`descriptors`](Self::descriptors).
pub trait TextsetObject: Default {
    /// The descriptor table, one entry per serialized field, in declaration
    /// order.
    fn descriptors() -> &'static [FieldDescriptor];

    /// Encodes the field at `index` into its text token.
    ///
    /// Out-of-range indices yield an empty token; the table and the
    /// generated match arms come from the same derive expansion, so the two
    /// cannot disagree.
    fn encode_field(&self, index: usize) -> String;

    /// Decodes `token` and assigns it to the field at `index`.
    fn decode_field(&mut self, index: usize, token: &str) -> Result<()>;

    /// Whether the field at `index` equals the same field on `defaults`.
    ///
    /// Only fields flagged optional are comparable; all others report
    /// `false`, which forces them to be written live.
    fn field_is_default(&self, index: usize, defaults: &Self) -> bool;
}

/// Validates the schema of `T`, failing fast before any I/O.
///
/// The resolved effective names must be pairwise distinct; the first
/// duplicate found is reported as [`TextsetError::Schema`].
pub fn validate_schema<T: TextsetObject>() -> Result<()> {
    let descriptors = T::descriptors();
    for (i, desc) in descriptors.iter().enumerate() {
        if descriptors[..i].iter().any(|d| d.name == desc.name) {
            return Err(TextsetError::Schema(format!(
                "duplicate effective name '{}'",
                desc.name
            )));
        }
    }
    Ok(())
}

/// Descriptor indices in output order.
///
/// Sorted by descending priority; the sort is stable, so fields of equal
/// priority keep declaration order. Deterministic; the idempotent-output
/// guarantee rests on it.
pub fn ordered_indices<T: TextsetObject>() -> Vec<usize> {
    let descriptors = T::descriptors();
    let mut indices: Vec<usize> = (0..descriptors.len()).collect();
    indices.sort_by_key(|&i| std::cmp::Reverse(descriptors[i].priority));
    indices
}

/// Index of the first descriptor whose effective name matches `name`.
///
/// Misses are not errors; the deserializer routes them to its
/// unknown-element callbacks.
pub fn find_field<T: TextsetObject>(name: &str) -> Option<usize> {
    T::descriptors().iter().position(|d| d.name == name)
}
