//! Typed field access and value coercion.

use crate::{CoerceError, FilePart};

/// Mutable, typed view of one record field.
///
/// Every supported field type has a variant; anything else is
/// [`Slot::Unsupported`] and rejects all values.
#[derive(Debug)]
pub enum Slot<'a> {
    /// `String` field.
    Text(&'a mut String),
    /// `i64` field.
    Integer(&'a mut i64),
    /// `bool` field.
    Boolean(&'a mut bool),
    /// `f64` field.
    Float(&'a mut f64),
    /// `Option<FilePart>` field.
    File(&'a mut Option<FilePart>),
    /// `Vec<String>` field.
    TextList(&'a mut Vec<String>),
    /// `Vec<i64>` field.
    IntegerList(&'a mut Vec<i64>),
    /// `Vec<bool>` field.
    BooleanList(&'a mut Vec<bool>),
    /// `Vec<f64>` field.
    FloatList(&'a mut Vec<f64>),
    /// `Vec<FilePart>` field.
    FileList(&'a mut Vec<FilePart>),
    /// A field whose declared type is not bindable; carries the type name.
    Unsupported(&'static str),
}

impl Slot<'_> {
    /// Returns a short name of the slot's declared type, for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "String",
            Self::Integer(_) => "i64",
            Self::Boolean(_) => "bool",
            Self::Float(_) => "f64",
            Self::File(_) => "Option<FilePart>",
            Self::TextList(_) => "Vec<String>",
            Self::IntegerList(_) => "Vec<i64>",
            Self::BooleanList(_) => "Vec<bool>",
            Self::FloatList(_) => "Vec<f64>",
            Self::FileList(_) => "Vec<FilePart>",
            Self::Unsupported(name) => name,
        }
    }

    /// Coerces a text value into the field.
    ///
    /// Scalars are overwritten, sequences get the value appended. The field
    /// is left untouched when coercion fails.
    pub fn assign_text(&mut self, value: &str) -> Result<(), CoerceError> {
        let type_name = self.type_name();
        match self {
            Self::Text(field) => value.clone_into(field),
            Self::Integer(field) => **field = value.parse()?,
            Self::Boolean(field) => **field = parse_bool(value)?,
            Self::Float(field) => **field = value.parse()?,
            Self::TextList(field) => field.push(value.to_owned()),
            Self::IntegerList(field) => field.push(value.parse()?),
            Self::BooleanList(field) => field.push(parse_bool(value)?),
            Self::FloatList(field) => field.push(value.parse()?),
            Self::File(_) | Self::FileList(_) | Self::Unsupported(_) => {
                return Err(CoerceError::UnsupportedKind(type_name));
            }
        }
        Ok(())
    }

    /// Threads a file part into the field without reading its content.
    pub fn assign_file(&mut self, part: &FilePart) -> Result<(), CoerceError> {
        let type_name = self.type_name();
        match self {
            Self::File(field) => **field = Some(part.clone()),
            Self::FileList(field) => field.push(part.clone()),
            _ => return Err(CoerceError::UnsupportedMultipartKind(type_name)),
        }
        Ok(())
    }
}

/// Parses a boolean the way form inputs spell it.
///
/// Accepts `1`, `t`, `true` and `0`, `f`, `false`, ignoring ASCII case.
///
/// # Example
///
/// ```
/// use reqbind_core::parse_bool;
///
/// assert_eq!(parse_bool("TRUE"), Ok(true));
/// assert_eq!(parse_bool("f"), Ok(false));
/// assert!(parse_bool("yes").is_err());
/// ```
pub fn parse_bool(value: &str) -> Result<bool, CoerceError> {
    const TRUE: [&str; 3] = ["1", "t", "true"];
    const FALSE: [&str; 3] = ["0", "f", "false"];

    if TRUE.iter().any(|s| s.eq_ignore_ascii_case(value)) {
        Ok(true)
    } else if FALSE.iter().any(|s| s.eq_ignore_ascii_case(value)) {
        Ok(false)
    } else {
        Err(CoerceError::Boolean(value.to_owned()))
    }
}
