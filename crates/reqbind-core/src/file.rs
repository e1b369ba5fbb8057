//! Uploaded file handles.

use bytes::Bytes;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Handle to a file part received in a `multipart/form-data` body.
///
/// Exposes the part's metadata and where its content lives. Small parts
/// stay in memory; parts past the configured memory threshold are spilled to
/// a temporary file that is removed when the last clone of the handle drops.
/// Cloning is cheap and never copies content.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use reqbind_core::FilePart;
///
/// let part = FilePart::in_memory(
///     "avatar",
///     Some("me.png".to_string()),
///     Some("image/png".to_string()),
///     Bytes::from_static(b"PNG_DATA"),
/// );
///
/// assert_eq!(part.file_name(), Some("me.png"));
/// assert_eq!(part.size(), 8);
/// ```
#[derive(Clone)]
pub struct FilePart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    size: u64,
    storage: Storage,
}

#[derive(Clone)]
enum Storage {
    Memory(Bytes),
    Disk(Arc<NamedTempFile>),
}

impl FilePart {
    /// Creates a handle for content held in memory.
    pub fn in_memory(
        name: impl Into<String>,
        file_name: Option<String>,
        content_type: Option<String>,
        data: Bytes,
    ) -> Self {
        Self {
            name: name.into(),
            file_name,
            content_type,
            size: data.len() as u64,
            storage: Storage::Memory(data),
        }
    }

    /// Creates a handle for content already written to a temporary file.
    pub fn on_disk(
        name: impl Into<String>,
        file_name: Option<String>,
        content_type: Option<String>,
        file: NamedTempFile,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            file_name,
            content_type,
            size,
            storage: Storage::Disk(Arc::new(file)),
        }
    }

    /// Returns the form field name the part was sent under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the client-supplied file name.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Returns the declared content type of the part.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the content size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns true if the content is held in memory.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        matches!(self.storage, Storage::Memory(_))
    }

    /// Returns the path of the spill file, for parts stored on disk.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            Storage::Memory(_) => None,
            Storage::Disk(file) => Some(file.path()),
        }
    }

    /// Reads the full content.
    ///
    /// In-memory parts return a shared buffer; spilled parts are read from disk.
    pub fn bytes(&self) -> io::Result<Bytes> {
        match &self.storage {
            Storage::Memory(data) => Ok(data.clone()),
            Storage::Disk(file) => fs::read(file.path()).map(Bytes::from),
        }
    }
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.size)
            .field("in_memory", &self.is_in_memory())
            .finish()
    }
}
