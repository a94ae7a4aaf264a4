//! Data structures for representing remote file system entries.
//!
//! This module defines two layers:
//!
//! - [`Metadata`]: the shape a [`RemoteClient`](crate::remote::RemoteClient) hands back
//!   for every listed path, including entries the lister does not display (`Deleted`).
//! - [`Entry`]: what the [`PathAggregator`](crate::aggregate::PathAggregator) stores per
//!   directory bucket, including the [`Entry::Absent`] placeholder that keeps empty
//!   folders visible in recursive listings.

use chrono::{DateTime, Utc};

/// A regular file as reported by the remote tree.
///
/// # Fields
/// * `name` - Last path component
/// * `path_display` - Full `/`-rooted display path
/// * `size` - Size in bytes
/// * `server_modified` - Last modification time recorded by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub name: String,
    pub path_display: String,
    pub size: u64,
    pub server_modified: DateTime<Utc>,
}

impl FileMetadata {
    pub fn new(
        name: impl Into<String>,
        path_display: impl Into<String>,
        size: u64,
        server_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            path_display: path_display.into(),
            size,
            server_modified,
        }
    }
}

/// A folder as reported by the remote tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderMetadata {
    pub name: String,
    pub path_display: String,
}

impl FolderMetadata {
    pub fn new(name: impl Into<String>, path_display: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path_display: path_display.into(),
        }
    }
}

/// A tombstone for a path that no longer exists on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedMetadata {
    pub name: String,
    pub path_display: String,
}

impl DeletedMetadata {
    pub fn new(name: impl Into<String>, path_display: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path_display: path_display.into(),
        }
    }
}

/// One record of a remote listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metadata {
    File(FileMetadata),
    Folder(FolderMetadata),
    Deleted(DeletedMetadata),
}

impl Metadata {
    /// Returns the display path regardless of the variant.
    pub fn path_display(&self) -> &str {
        match self {
            Metadata::File(f) => &f.path_display,
            Metadata::Folder(f) => &f.path_display,
            Metadata::Deleted(d) => &d.path_display,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Metadata::File(f) => &f.name,
            Metadata::Folder(f) => &f.name,
            Metadata::Deleted(d) => &d.name,
        }
    }
}

/// A single page returned by a listing or continuation call.
///
/// # Fields
/// * `entries` - The records on this page (may be empty)
/// * `cursor` - Opaque token for fetching the next page
/// * `has_more` - Whether another page can be fetched with `cursor`
#[derive(Debug, Clone, Default)]
pub struct ListFolderResult {
    pub entries: Vec<Metadata>,
    pub cursor: String,
    pub has_more: bool,
}

/// An entry stored in a directory bucket.
///
/// # Variants
/// * `File` - A regular file, contributes its size to the bucket total
/// * `Folder` - A sub-folder, contributes nothing to the total
/// * `Absent` - Placeholder proving a visited folder exists; never rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File(FileMetadata),
    Folder(FolderMetadata),
    Absent,
}

impl Entry {
    pub fn file(
        name: impl Into<String>,
        path_display: impl Into<String>,
        size: u64,
        server_modified: DateTime<Utc>,
    ) -> Self {
        Entry::File(FileMetadata::new(name, path_display, size, server_modified))
    }

    pub fn folder(name: impl Into<String>, path_display: impl Into<String>) -> Self {
        Entry::Folder(FolderMetadata::new(name, path_display))
    }

    /// Converts a listed record into a bucket entry.
    ///
    /// Returns `None` for records that are neither files nor folders.
    pub fn from_metadata(metadata: Metadata) -> Option<Self> {
        match metadata {
            Metadata::File(f) => Some(Entry::File(f)),
            Metadata::Folder(f) => Some(Entry::Folder(f)),
            Metadata::Deleted(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Entry::File(f) => Some(&f.name),
            Entry::Folder(f) => Some(&f.name),
            Entry::Absent => None,
        }
    }

    pub fn path_display(&self) -> Option<&str> {
        match self {
            Entry::File(f) => Some(&f.path_display),
            Entry::Folder(f) => Some(&f.path_display),
            Entry::Absent => None,
        }
    }

    /// Size in bytes; folders and placeholders count as zero.
    pub fn size(&self) -> u64 {
        match self {
            Entry::File(f) => f.size,
            Entry::Folder(_) | Entry::Absent => 0,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Entry::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_entry_creation() {
        let modified = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let entry = Entry::file("a.txt", "/docs/a.txt", 1024, modified);

        assert_eq!(entry.name(), Some("a.txt"));
        assert_eq!(entry.path_display(), Some("/docs/a.txt"));
        assert_eq!(entry.size(), 1024);
        assert!(!entry.is_absent());
    }

    #[test]
    fn test_absent_has_no_payload() {
        assert_eq!(Entry::Absent.name(), None);
        assert_eq!(Entry::Absent.path_display(), None);
        assert_eq!(Entry::Absent.size(), 0);
        assert!(Entry::Absent.is_absent());
    }

    #[test]
    fn test_from_metadata_drops_deleted() {
        let deleted = Metadata::Deleted(DeletedMetadata::new("gone", "/gone"));
        assert_eq!(Entry::from_metadata(deleted), None);

        let folder = Metadata::Folder(FolderMetadata::new("sub", "/sub"));
        assert_eq!(
            Entry::from_metadata(folder),
            Some(Entry::folder("sub", "/sub"))
        );
    }

    #[test]
    fn test_folder_size_is_zero() {
        assert_eq!(Entry::folder("sub", "/sub").size(), 0);
    }
}
