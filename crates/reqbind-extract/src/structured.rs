//! JSON and XML bodies.
//!
//! A structured body is decoded generically, then its top-level members are
//! bound through the same field table and coercion rules as form values:
//!
//! - JSON: the root must be an object (or `null`, which binds nothing).
//!   Strings, numbers and booleans are bound by their text; `null` members
//!   are skipped; arrays feed their elements in order. Nested objects and
//!   arrays are rejected for recognized fields.
//! - XML: the children of the root element are the members, matched by
//!   local name; their text content is bound. Elements that have child
//!   elements of their own are rejected for recognized fields.
//!
//! Unrecognized members are skipped, whatever their shape.

use std::borrow::Cow;

use quick_xml::events::Event;
use quick_xml::Reader;
use reqbind_core::{Bind, BindError, CoerceError, FieldTable};
use serde_json::Value;
use tracing::trace;

use crate::ExtractionError;

/// Binds the members of a JSON object body into `record`.
///
/// Members are bound in document order. On a coercion failure the members
/// before it keep their new values.
///
/// # Example
///
/// ```rust
/// use reqbind_core::{Bind, FieldDescriptor, FieldType, Kind, Slot};
/// use reqbind_extract::bind_json;
///
/// struct Item { count: i64 }
///
/// impl Bind for Item {
///     fn descriptors() -> &'static [FieldDescriptor<Self>] {
///         const FIELDS: &[FieldDescriptor<Item>] = &[FieldDescriptor::new(
///             "count", &[], FieldType::Scalar(Kind::Integer),
///             { fn slot(i: &mut Item) -> Slot<'_> { Slot::Integer(&mut i.count) } slot },
///         )];
///         FIELDS
///     }
/// }
///
/// let mut item = Item { count: 0 };
/// bind_json(br#"{"count": 3, "other": {"nested": true}}"#, &mut item, "json").unwrap();
/// assert_eq!(item.count, 3);
/// ```
pub fn bind_json<T: Bind>(body: &[u8], record: &mut T, tag_key: &str) -> Result<(), ExtractionError> {
    let members = match serde_json::from_slice::<Value>(body)? {
        Value::Object(members) => members,
        Value::Null => return Ok(()),
        _ => return Err(ExtractionError::NotAnObject),
    };

    let table = FieldTable::<T>::resolve(tag_key);
    for (name, value) in &members {
        if table.get(name).is_none() {
            trace!(name, "skipping unknown key");
            continue;
        }
        match value {
            Value::Array(elements) => {
                for element in elements {
                    bind_json_scalar(&table, record, name, element)?;
                }
            }
            scalar => bind_json_scalar(&table, record, name, scalar)?,
        }
    }
    Ok(())
}

fn bind_json_scalar<T: Bind>(
    table: &FieldTable<T>,
    record: &mut T,
    name: &str,
    value: &Value,
) -> Result<(), BindError> {
    let text: Cow<'_, str> = match value {
        Value::Null => return Ok(()),
        Value::String(s) => Cow::Borrowed(s),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(_) => return Err(BindError::new(name, CoerceError::CompositeValue("array"))),
        Value::Object(_) => return Err(BindError::new(name, CoerceError::CompositeValue("object"))),
    };
    table.assign_text(record, name, &text)?;
    Ok(())
}

/// Binds the child elements of an XML document's root into `record`.
///
/// # Example
///
/// ```rust
/// use reqbind_core::{Bind, FieldDescriptor, FieldType, Kind, Slot};
/// use reqbind_extract::bind_xml;
///
/// struct Item { tags: Vec<String> }
///
/// impl Bind for Item {
///     fn descriptors() -> &'static [FieldDescriptor<Self>] {
///         const FIELDS: &[FieldDescriptor<Item>] = &[FieldDescriptor::new(
///             "tags", &[("xml", "tag")], FieldType::Sequence(Kind::Text),
///             { fn slot(i: &mut Item) -> Slot<'_> { Slot::TextList(&mut i.tags) } slot },
///         )];
///         FIELDS
///     }
/// }
///
/// let mut item = Item { tags: Vec::new() };
/// bind_xml(b"<item><tag>a</tag><tag>b &amp; c</tag></item>", &mut item, "xml").unwrap();
/// assert_eq!(item.tags, vec!["a", "b & c"]);
/// ```
pub fn bind_xml<T: Bind>(body: &[u8], record: &mut T, tag_key: &str) -> Result<(), ExtractionError> {
    let table = FieldTable::<T>::resolve(tag_key);
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut seen_root = false;
    let mut member: Option<XmlMember> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                depth += 1;
                match depth {
                    1 if seen_root => return Err(ExtractionError::NotAnObject),
                    1 => seen_root = true,
                    2 => member = Some(XmlMember::new(start.local_name().as_ref())),
                    _ => {
                        if let Some(member) = member.as_mut() {
                            member.composite = true;
                        }
                    }
                }
            }
            Event::Empty(empty) => match depth {
                0 if seen_root => return Err(ExtractionError::NotAnObject),
                0 => {
                    seen_root = true;
                }
                1 => XmlMember::new(empty.local_name().as_ref()).bind(&table, record)?,
                _ => {
                    if let Some(member) = member.as_mut() {
                        member.composite = true;
                    }
                }
            },
            Event::Text(text) if depth == 2 => {
                if let Some(member) = member.as_mut() {
                    member.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) if depth == 2 => {
                if let Some(member) = member.as_mut() {
                    member.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some(member) = member.take() {
                        member.bind(&table, record)?;
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if seen_root {
        Ok(())
    } else {
        Err(ExtractionError::NotAnObject)
    }
}

struct XmlMember {
    name: String,
    text: String,
    composite: bool,
}

impl XmlMember {
    fn new(local_name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(local_name).into_owned(),
            text: String::new(),
            composite: false,
        }
    }

    fn bind<T: Bind>(self, table: &FieldTable<T>, record: &mut T) -> Result<(), BindError> {
        if table.get(&self.name).is_none() {
            trace!(name = %self.name, "skipping unknown element");
            return Ok(());
        }
        if self.composite {
            return Err(BindError::new(self.name, CoerceError::CompositeValue("element")));
        }
        table.assign_text(record, &self.name, &self.text)?;
        Ok(())
    }
}
