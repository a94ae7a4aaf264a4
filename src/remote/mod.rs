//! Remote listing backends.
//!
//! The lister only talks to a [`RemoteClient`]. Two backends ship with the crate:
//!
//! - [`LocalClient`]: serves a local directory as if it were a remote tree
//! - [`MemoryClient`]: an in-memory tree with failure injection, used by tests and benches
//!
//! Both page their results through a [`CursorTable`], so pagination behaves the same
//! way regardless of where the entries come from.

pub mod local;
pub mod memory;

pub use local::LocalClient;
pub use memory::MemoryClient;

use crate::data::{ListFolderResult, Metadata};
use crate::error::{RemoteError, RemoteResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A paginated, read-only view of a remote file tree.
///
/// Paths are `/`-rooted with the root spelled as the empty string.
/// Implementations must be `Sync`: pagination runs on the rayon pool.
pub trait RemoteClient: Sync {
    /// Lists `path`, descending into sub-folders when `recursive` is set.
    fn list_folder(&self, path: &str, recursive: bool) -> RemoteResult<ListFolderResult>;

    /// Fetches the page following the one that returned `cursor`.
    fn list_folder_continue(&self, cursor: &str) -> RemoteResult<ListFolderResult>;

    /// Looks up a single path.
    fn get_metadata(&self, path: &str) -> RemoteResult<Metadata>;
}

/// Hands out fixed-size pages of a listing behind opaque cursors.
///
/// A cursor has the form `<listing id>:<offset>`. Listings are dropped once their
/// last page has been served, or when a continuation from them fails.
#[derive(Debug)]
pub struct CursorTable {
    page_size: usize,
    next_id: AtomicU64,
    listings: Mutex<HashMap<u64, Arc<Vec<Metadata>>>>,
}

impl CursorTable {
    /// Creates a table serving `page_size` entries per page (at least one).
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            next_id: AtomicU64::new(0),
            listings: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a complete listing and returns its first page.
    pub fn first_page(&self, entries: Vec<Metadata>) -> ListFolderResult {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let listing = Arc::new(entries);
        let page = self.page_at(id, &listing, 0);
        if page.has_more {
            self.listings.lock().insert(id, listing);
        }
        page
    }

    /// Returns the page a cursor points at.
    pub fn continue_from(&self, cursor: &str) -> RemoteResult<ListFolderResult> {
        let invalid = || RemoteError::InvalidCursor(cursor.to_string());
        let (id, offset) = parse_cursor(cursor).ok_or_else(invalid)?;

        let listing = self.listings.lock().get(&id).cloned().ok_or_else(invalid)?;
        if offset > listing.len() {
            self.discard(cursor);
            return Err(invalid());
        }

        let page = self.page_at(id, &listing, offset);
        if !page.has_more {
            self.listings.lock().remove(&id);
        }
        Ok(page)
    }

    /// 1-based number of the page a cursor would fetch.
    pub fn page_number(&self, cursor: &str) -> Option<u64> {
        parse_cursor(cursor).map(|(_, offset)| (offset / self.page_size) as u64 + 1)
    }

    /// Drops the listing behind `cursor`; later continuations from it fail.
    pub fn discard(&self, cursor: &str) {
        if let Some((id, _)) = parse_cursor(cursor) {
            self.listings.lock().remove(&id);
        }
    }

    /// Number of listings that still have pages to serve.
    pub fn open_listings(&self) -> usize {
        self.listings.lock().len()
    }

    fn page_at(&self, id: u64, listing: &[Metadata], offset: usize) -> ListFolderResult {
        let end = (offset + self.page_size).min(listing.len());
        ListFolderResult {
            entries: listing[offset..end].to_vec(),
            cursor: format!("{}:{}", id, end),
            has_more: end < listing.len(),
        }
    }
}

fn parse_cursor(cursor: &str) -> Option<(u64, usize)> {
    let (id, offset) = cursor.split_once(':')?;
    Some((id.parse().ok()?, offset.parse().ok()?))
}
