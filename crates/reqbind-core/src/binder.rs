//! The record binder.
//!
//! Binding resolves every field of a record to an external name under one
//! tag key, then walks a [`ValueSource`] (and optionally a [`FileSource`]) in
//! source order, coercing each value into the field registered under its
//! name. Names with no matching field are skipped.

use indexmap::IndexMap;
use tracing::trace;

use crate::{Bind, BindConfig, BindError, FieldDescriptor, FilePart, FileSource, ValueSource};

/// Derives the default external name of a field identifier.
///
/// Strips a raw-identifier prefix and lowercases only the first character;
/// the rest of the identifier is kept as declared.
///
/// # Example
///
/// ```
/// use reqbind_core::default_name;
///
/// assert_eq!(default_name("Query"), "query");
/// assert_eq!(default_name("HTTPVersion"), "hTTPVersion");
/// assert_eq!(default_name("r#type"), "type");
/// ```
#[must_use]
pub fn default_name(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// External name to field lookup for one record type under one tag key.
pub struct FieldTable<T: Bind> {
    fields: IndexMap<String, &'static FieldDescriptor<T>>,
}

impl<T: Bind> FieldTable<T> {
    /// Resolves the external names of `T`'s fields under `tag_key`.
    ///
    /// When two fields resolve to the same name, the one declared later wins.
    #[must_use]
    pub fn resolve(tag_key: &str) -> Self {
        let mut fields = IndexMap::new();
        for desc in T::descriptors() {
            fields.insert(desc.external_name(tag_key), desc);
        }
        Self { fields }
    }

    /// Returns the descriptor registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static FieldDescriptor<T>> {
        self.fields.get(name).copied()
    }

    /// Iterates the resolved external names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Coerces `value` into the field named `name`.
    ///
    /// Returns `Ok(false)` if no field has that name.
    pub fn assign_text(&self, record: &mut T, name: &str, value: &str) -> Result<bool, BindError> {
        let Some(desc) = self.get(name) else {
            return Ok(false);
        };
        desc.slot(record)
            .assign_text(value)
            .map_err(|e| BindError::new(name, e))?;
        Ok(true)
    }

    /// Threads `values` into the field named `name`, in order.
    ///
    /// Stops at the first value that fails to coerce.
    pub fn assign_all(&self, record: &mut T, name: &str, values: &[String]) -> Result<bool, BindError> {
        let Some(desc) = self.get(name) else {
            trace!(name, "skipping unknown key");
            return Ok(false);
        };
        let mut slot = desc.slot(record);
        for value in values {
            slot.assign_text(value)
                .map_err(|e| BindError::new(name, e))?;
        }
        trace!(name, field = desc.ident(), count = values.len(), "bound values");
        Ok(true)
    }

    /// Threads file parts into the field named `name`, in order.
    pub fn assign_files(
        &self,
        record: &mut T,
        name: &str,
        parts: &[FilePart],
    ) -> Result<bool, BindError> {
        let Some(desc) = self.get(name) else {
            trace!(name, "skipping unknown file key");
            return Ok(false);
        };
        let mut slot = desc.slot(record);
        for part in parts {
            slot.assign_file(part)
                .map_err(|e| BindError::new(name, e))?;
        }
        trace!(name, field = desc.ident(), count = parts.len(), "bound files");
        Ok(true)
    }
}

impl<T: Bind> std::fmt::Debug for FieldTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(name, desc)| (name, desc.ident())))
            .finish()
    }
}

/// Binds value and file sources into records under one tag key.
///
/// # Example
///
/// ```
/// # use reqbind_core::{Bind, FieldDescriptor, FieldType, Kind, Slot};
/// # struct Page { number: i64 }
/// # impl Bind for Page {
/// #     fn descriptors() -> &'static [FieldDescriptor<Self>] {
/// #         const FIELDS: &[FieldDescriptor<Page>] = &[FieldDescriptor::new(
/// #             "Number", &[], FieldType::Scalar(Kind::Integer),
/// #             { fn slot(p: &mut Page) -> Slot<'_> { Slot::Integer(&mut p.number) } slot },
/// #         )];
/// #         FIELDS
/// #     }
/// # }
/// use reqbind_core::{Binder, ValueSource};
///
/// let values: ValueSource = [("number", "1"), ("number", "3")].into_iter().collect();
/// let mut page = Page { number: 0 };
///
/// Binder::new("form").bind(&mut page, &values).unwrap();
/// assert_eq!(page.number, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binder {
    tag_key: String,
}

impl Binder {
    /// Creates a binder resolving names under `tag_key`.
    pub fn new(tag_key: impl Into<String>) -> Self {
        Self {
            tag_key: tag_key.into(),
        }
    }

    /// Returns the active tag key.
    #[must_use]
    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    /// Resolves the field table of `T` under this binder's tag key.
    #[must_use]
    pub fn table<T: Bind>(&self) -> FieldTable<T> {
        FieldTable::resolve(&self.tag_key)
    }

    /// Binds every recognized name in `values` into `record`.
    ///
    /// # Errors
    ///
    /// Returns the first coercion failure. Fields bound before it keep their
    /// new values.
    pub fn bind<T: Bind>(&self, record: &mut T, values: &ValueSource) -> Result<(), BindError> {
        let table = self.table::<T>();
        for (name, entries) in values.iter() {
            table.assign_all(record, name, entries)?;
        }
        Ok(())
    }

    /// Binds every recognized name in `files` into `record`.
    ///
    /// # Errors
    ///
    /// Fails when a file part targets a field that is not a file or a
    /// sequence of files.
    pub fn bind_files<T: Bind>(&self, record: &mut T, files: &FileSource) -> Result<(), BindError> {
        let table = self.table::<T>();
        for (name, parts) in files.iter() {
            table.assign_files(record, name, parts)?;
        }
        Ok(())
    }
}

/// Binds `values`, then `files` when present, into `record`.
///
/// Names are resolved under `config`'s tag key.
///
/// # Errors
///
/// Returns the first [`BindError`]; file parts are not bound if a value fails.
pub fn bind<T: Bind>(
    record: &mut T,
    values: &ValueSource,
    files: Option<&FileSource>,
    config: &BindConfig,
) -> Result<(), BindError> {
    let binder = Binder::new(config.tag_key.as_str());
    binder.bind(record, values)?;
    if let Some(files) = files {
        binder.bind_files(record, files)?;
    }
    Ok(())
}
