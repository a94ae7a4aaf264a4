//! In-memory remote tree.
//!
//! [`MemoryClient`] keeps a flat list of [`Metadata`] records and answers listing
//! calls the same way a hosted tree would: recursive listings of a non-root folder
//! start with the folder itself, results are paged through a [`CursorTable`].
//! Failures can be injected per path or per page to exercise error handling.

use super::{CursorTable, RemoteClient};
use crate::data::{DeletedMetadata, FileMetadata, FolderMetadata, ListFolderResult, Metadata};
use crate::error::{RemoteError, RemoteResult};
use crate::utils::parent_dir;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct MemoryClient {
    tree: Vec<Metadata>,
    cursors: CursorTable,
    failing_paths: HashSet<String>,
    failing_page: Option<u64>,
    continue_calls: AtomicU64,
}

impl MemoryClient {
    /// Creates an empty tree served `page_size` entries at a time.
    pub fn new(page_size: usize) -> Self {
        Self {
            tree: Vec::new(),
            cursors: CursorTable::new(page_size),
            failing_paths: HashSet::new(),
            failing_page: None,
            continue_calls: AtomicU64::new(0),
        }
    }

    /// Adds a file. Entries are listed in the order they were added.
    pub fn with_file(mut self, path_display: &str, size: u64, modified: DateTime<Utc>) -> Self {
        self.tree.push(Metadata::File(FileMetadata::new(
            base_name(path_display),
            path_display,
            size,
            modified,
        )));
        self
    }

    pub fn with_folder(mut self, path_display: &str) -> Self {
        self.tree.push(Metadata::Folder(FolderMetadata::new(
            base_name(path_display),
            path_display,
        )));
        self
    }

    /// Adds a tombstone record, as servers report for recently removed paths.
    pub fn with_deleted(mut self, path_display: &str) -> Self {
        self.tree.push(Metadata::Deleted(DeletedMetadata::new(
            base_name(path_display),
            path_display,
        )));
        self
    }

    /// Makes every call for `path` fail.
    pub fn failing_path(mut self, path: &str) -> Self {
        self.failing_paths.insert(path.to_string());
        self
    }

    /// Makes the continuation call that would return page `page` (1-based) fail.
    pub fn failing_page(mut self, page: u64) -> Self {
        self.failing_page = Some(page);
        self
    }

    /// Number of continuation calls served or refused so far.
    pub fn continue_calls(&self) -> u64 {
        self.continue_calls.load(Ordering::Relaxed)
    }

    /// Number of listings the server still holds cursors for.
    pub fn open_listings(&self) -> usize {
        self.cursors.open_listings()
    }

    fn find(&self, path: &str) -> Option<&Metadata> {
        self.tree
            .iter()
            .find(|m| !matches!(m, Metadata::Deleted(_)) && m.path_display() == path)
    }

    fn check_path(&self, path: &str) -> RemoteResult<()> {
        if self.failing_paths.contains(path) {
            return Err(RemoteError::Unavailable(format!(
                "injected failure for '{}'",
                path
            )));
        }
        Ok(())
    }
}

impl RemoteClient for MemoryClient {
    fn list_folder(&self, path: &str, recursive: bool) -> RemoteResult<ListFolderResult> {
        self.check_path(path)?;

        let mut entries = Vec::new();
        if !path.is_empty() {
            match self.find(path) {
                Some(folder @ Metadata::Folder(_)) => {
                    if recursive {
                        entries.push(folder.clone());
                    }
                }
                Some(_) => {
                    return Err(RemoteError::NotAFolder {
                        path: path.to_string(),
                    });
                }
                None => {
                    return Err(RemoteError::NotFound {
                        path: path.to_string(),
                    });
                }
            }
        }

        let key = if path.is_empty() { "/" } else { path };
        let prefix = format!("{}/", path);
        entries.extend(
            self.tree
                .iter()
                .filter(|m| {
                    let p = m.path_display();
                    if recursive {
                        p.starts_with(&prefix)
                    } else {
                        p != "/" && parent_dir(p) == key
                    }
                })
                .cloned(),
        );

        Ok(self.cursors.first_page(entries))
    }

    fn list_folder_continue(&self, cursor: &str) -> RemoteResult<ListFolderResult> {
        self.continue_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(page) = self.failing_page {
            if self.cursors.page_number(cursor) == Some(page) {
                self.cursors.discard(cursor);
                return Err(RemoteError::Unavailable(format!(
                    "injected failure on page {}",
                    page
                )));
            }
        }
        self.cursors.continue_from(cursor)
    }

    fn get_metadata(&self, path: &str) -> RemoteResult<Metadata> {
        self.check_path(path)?;

        if path.is_empty() {
            return Ok(Metadata::Folder(FolderMetadata::new("", "/")));
        }
        self.find(path).cloned().ok_or_else(|| RemoteError::NotFound {
            path: path.to_string(),
        })
    }
}

fn base_name(path_display: &str) -> &str {
    path_display.rsplit('/').next().unwrap_or(path_display)
}
