//! Multipart form data source.
//!
//! [`parse_multipart`] splits a `multipart/form-data` body into text values
//! and file parts. A part with a file name in its Content-Disposition is a
//! file; every other part is a value.
//!
//! File content is kept in memory while the running total stays within the
//! configured threshold. A part that would go past it is written to a
//! temporary file instead, owned by its [`FilePart`] handle. Text values must
//! be UTF-8. They are always held in memory and may use at most the threshold
//! plus 10 MiB.

use std::io::{self, Write};

use bytes::{Bytes, BytesMut};
use http::HeaderMap;
use reqbind_core::{BindConfig, FilePart, FileSource, ValueSource};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::ExtractionError;

/// Extra memory granted to non-file values on top of the file threshold.
pub const VALUE_MEMORY_ALLOWANCE: u64 = 10 * 1024 * 1024;

/// Values and files decoded from a multipart body.
#[derive(Debug, Default, Clone)]
pub struct MultipartForm {
    /// Text values, keyed by field name.
    pub values: ValueSource,
    /// File parts, keyed by field name.
    pub files: FileSource,
}

/// Returns the boundary of a `multipart/form-data` Content-Type.
///
/// # Errors
///
/// Returns `ExtractionError::NotMultipart` if the header is missing, is not
/// `multipart/form-data`, or has no boundary parameter.
pub fn multipart_boundary(headers: &HeaderMap) -> Result<String, ExtractionError> {
    let content_type = headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or(ExtractionError::NotMultipart)?;

    let media_type: mime::Mime = content_type
        .parse()
        .map_err(|_| ExtractionError::NotMultipart)?;
    if media_type.type_() != mime::MULTIPART || media_type.subtype() != mime::FORM_DATA {
        return Err(ExtractionError::NotMultipart);
    }

    multer::parse_boundary(content_type).map_err(|_| ExtractionError::NotMultipart)
}

/// Parses a multipart body into values and files.
///
/// # Errors
///
/// Returns `ExtractionError::NotMultipart` for a non-multipart request,
/// `ExtractionError::Multipart` for a malformed body,
/// `ExtractionError::MultipartTooLarge` when text values exceed their limit,
/// `ExtractionError::InvalidUtf8` for a text value that is not UTF-8,
/// and `ExtractionError::Io` if spilling a file to disk fails.
pub async fn parse_multipart(
    headers: &HeaderMap,
    body: &Bytes,
    config: &BindConfig,
) -> Result<MultipartForm, ExtractionError> {
    let boundary = multipart_boundary(headers)?;

    // Create a stream from the body
    let body = body.clone();
    let stream = futures_util::stream::once(async move { Ok::<_, io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut form = MultipartForm::default();
    let mut file_memory = config.multipart_max_memory;
    let mut value_memory = config
        .multipart_max_memory
        .saturating_add(VALUE_MEMORY_ALLOWANCE);

    while let Some(mut field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            trace!("skipping multipart part without a name");
            continue;
        };

        let Some(file_name) = field.file_name().map(str::to_owned) else {
            let data = read_value(&mut field, &mut value_memory).await?;
            match String::from_utf8(Vec::from(data)) {
                Ok(value) => form.values.append(name, value),
                Err(source) => return Err(ExtractionError::InvalidUtf8 { name, source }),
            }
            continue;
        };

        let content_type = field.content_type().map(ToString::to_string);
        let content = read_file(&mut field, &mut file_memory).await?;
        let part = match content {
            FileContent::Memory(data) => {
                FilePart::in_memory(name.clone(), Some(file_name), content_type, data)
            }
            FileContent::Disk(file, size) => {
                debug!(field = %name, size, "spilled multipart file to disk");
                FilePart::on_disk(name.clone(), Some(file_name), content_type, file, size)
            }
        };
        form.files.append(name, part);
    }

    Ok(form)
}

enum FileContent {
    Memory(Bytes),
    Disk(NamedTempFile, u64),
}

async fn read_value(
    field: &mut multer::Field<'_>,
    remaining: &mut u64,
) -> Result<Bytes, ExtractionError> {
    let mut data = BytesMut::new();
    while let Some(chunk) = field.chunk().await? {
        let len = chunk.len() as u64;
        if len > *remaining {
            return Err(ExtractionError::MultipartTooLarge);
        }
        *remaining -= len;
        data.extend_from_slice(&chunk);
    }
    Ok(data.freeze())
}

async fn read_file(
    field: &mut multer::Field<'_>,
    remaining: &mut u64,
) -> Result<FileContent, ExtractionError> {
    let mut data = BytesMut::new();
    let mut spill: Option<NamedTempFile> = None;
    let mut size: u64 = 0;

    while let Some(chunk) = field.chunk().await? {
        size += chunk.len() as u64;
        if let Some(file) = spill.as_mut() {
            file.write_all(&chunk)?;
            continue;
        }
        if size > *remaining {
            let mut file = NamedTempFile::new()?;
            file.write_all(&data)?;
            file.write_all(&chunk)?;
            data.clear();
            spill = Some(file);
            continue;
        }
        data.extend_from_slice(&chunk);
    }

    match spill {
        Some(mut file) => {
            file.flush()?;
            Ok(FileContent::Disk(file, size))
        }
        None => {
            *remaining -= size;
            Ok(FileContent::Memory(data.freeze()))
        }
    }
}
