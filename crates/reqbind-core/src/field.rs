//! Field descriptors and the [`Bind`] trait.
//!
//! A record type describes its bindable fields once, in a `'static` table.
//! The binder never inspects the record beyond what the table exposes.

use std::fmt;

use crate::Slot;

/// The value kinds a field can hold, alone or as a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `String`, copied verbatim.
    Text,
    /// `i64`, base-10 signed.
    Integer,
    /// `bool`.
    Boolean,
    /// `f64`.
    Float,
    /// [`FilePart`](crate::FilePart) handle from a multipart upload.
    File,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Integer => write!(f, "integer"),
            Self::Boolean => write!(f, "boolean"),
            Self::Float => write!(f, "float"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A single value; repeated inputs overwrite it.
    Scalar(Kind),
    /// A `Vec` of values; repeated inputs append in order.
    Sequence(Kind),
    /// Any other declared type. Binding a value into it always fails.
    Unsupported(&'static str),
}

impl FieldType {
    /// Returns true for sequence fields.
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Returns the element kind, if the type is supported.
    #[must_use]
    pub const fn kind(&self) -> Option<Kind> {
        match self {
            Self::Scalar(kind) | Self::Sequence(kind) => Some(*kind),
            Self::Unsupported(_) => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Sequence(kind) => write!(f, "sequence of {kind}"),
            Self::Unsupported(name) => write!(f, "{name}"),
        }
    }
}

/// Static description of one field of a record type `T`.
///
/// Holds the declared identifier, the explicit tags as `(tag key, name)`
/// pairs, the declared type, and an accessor returning a typed [`Slot`].
pub struct FieldDescriptor<T> {
    ident: &'static str,
    tags: &'static [(&'static str, &'static str)],
    ty: FieldType,
    slot: fn(&mut T) -> Slot<'_>,
}

impl<T> FieldDescriptor<T> {
    /// Creates a descriptor. Usable in `const` tables.
    pub const fn new(
        ident: &'static str,
        tags: &'static [(&'static str, &'static str)],
        ty: FieldType,
        slot: fn(&mut T) -> Slot<'_>,
    ) -> Self {
        Self {
            ident,
            tags,
            ty,
            slot,
        }
    }

    /// Returns the field identifier as declared.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Returns the declared field type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.ty
    }

    /// Returns the tag value stored under `tag_key`, if any.
    #[must_use]
    pub fn tag(&self, tag_key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(key, _)| *key == tag_key)
            .map(|(_, value)| *value)
    }

    /// Returns all explicit tags.
    #[must_use]
    pub const fn tags(&self) -> &'static [(&'static str, &'static str)] {
        self.tags
    }

    /// Computes the external name under `tag_key`.
    ///
    /// A non-empty tag wins verbatim. An absent or empty tag falls back to
    /// the identifier with only its first character lowercased.
    #[must_use]
    pub fn external_name(&self, tag_key: &str) -> String {
        match self.tag(tag_key) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => crate::default_name(self.ident),
        }
    }

    /// Borrows the field of `record` this descriptor points at.
    pub fn slot<'r>(&self, record: &'r mut T) -> Slot<'r> {
        (self.slot)(record)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("ident", &self.ident)
            .field("tags", &self.tags)
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

/// A destination record that can be populated from request data.
///
/// Implement this with `#[derive(Bind)]`, or by hand by returning a
/// `const` table of [`FieldDescriptor`]s. The table is built once per type.
pub trait Bind: Sized + 'static {
    /// Returns the field table for this type.
    fn descriptors() -> &'static [FieldDescriptor<Self>];
}
