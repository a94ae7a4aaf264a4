//! A local directory served as a remote tree.
//!
//! Paths handed to [`LocalClient`] are interpreted relative to its root directory
//! (`""` is the root itself, `/docs` is `<root>/docs`). Display paths are built
//! from the relative components joined with `/`, so the output looks the same as
//! for any hosted backend.

use super::{CursorTable, RemoteClient};
use crate::data::{FileMetadata, FolderMetadata, ListFolderResult, Metadata};
use crate::error::{RemoteError, RemoteResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

#[derive(Debug)]
pub struct LocalClient {
    root: PathBuf,
    cursors: CursorTable,
}

impl LocalClient {
    /// Serves `root` with `page_size` entries per page.
    pub fn new(root: impl Into<PathBuf>, page_size: usize) -> Self {
        Self {
            root: root.into(),
            cursors: CursorTable::new(page_size),
        }
    }

    /// Maps a remote path below the root. `..` and absolute components are refused.
    fn resolve(&self, path: &str) -> RemoteResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(RemoteError::InvalidPath {
                path: path.to_string(),
            });
        }
        if relative.as_os_str().is_empty() {
            Ok(self.root.clone())
        } else {
            Ok(self.root.join(relative))
        }
    }

    fn display_path(&self, full: &Path) -> String {
        let relative = full.strip_prefix(&self.root).unwrap_or(full);
        let joined = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        format!("/{}", joined)
    }

    fn to_metadata(&self, full: &Path, md: &fs::Metadata) -> Option<Metadata> {
        let path_display = self.display_path(full);
        let name = full
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if md.is_dir() {
            Some(Metadata::Folder(FolderMetadata::new(name, path_display)))
        } else if md.is_file() {
            let modified = md
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_default();
            Some(Metadata::File(FileMetadata::new(
                name,
                path_display,
                md.len(),
                modified,
            )))
        } else {
            trace!("Skipping special file {}", full.display());
            None
        }
    }
}

fn io_error(path: &str, source: io::Error) -> RemoteError {
    if source.kind() == io::ErrorKind::NotFound {
        RemoteError::NotFound {
            path: path.to_string(),
        }
    } else {
        RemoteError::Io {
            path: path.to_string(),
            source,
        }
    }
}

impl RemoteClient for LocalClient {
    fn list_folder(&self, path: &str, recursive: bool) -> RemoteResult<ListFolderResult> {
        let dir = self.resolve(path)?;
        let md = fs::metadata(&dir).map_err(|e| io_error(path, e))?;
        if !md.is_dir() {
            return Err(RemoteError::NotAFolder {
                path: path.to_string(),
            });
        }

        // Recursive listings of a sub-folder report the folder itself first
        let min_depth = if recursive && !path.trim_matches('/').is_empty() {
            0
        } else {
            1
        };
        let max_depth = if recursive { usize::MAX } else { 1 };

        let mut entries = Vec::new();
        for item in WalkDir::new(&dir)
            .min_depth(min_depth)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name()
        {
            let item = item?;
            let md = item.metadata()?;
            if let Some(metadata) = self.to_metadata(item.path(), &md) {
                entries.push(metadata);
            }
        }

        Ok(self.cursors.first_page(entries))
    }

    fn list_folder_continue(&self, cursor: &str) -> RemoteResult<ListFolderResult> {
        self.cursors.continue_from(cursor)
    }

    fn get_metadata(&self, path: &str) -> RemoteResult<Metadata> {
        let full = self.resolve(path)?;
        let md = fs::metadata(&full).map_err(|e| io_error(path, e))?;
        if path.trim_matches('/').is_empty() {
            return Ok(Metadata::Folder(FolderMetadata::new("", "/")));
        }
        self.to_metadata(&full, &md)
            .ok_or_else(|| RemoteError::NotFound {
                path: path.to_string(),
            })
    }
}
