//! Shared per-directory index filled by concurrent page tasks.
//!
//! [`PathAggregator`] maps a parent-directory path to the entries found in it.
//! All writers go through one `parking_lot::Mutex`, held for a single insert at
//! a time. Readers are expected to call [`PathAggregator::snapshot`] or
//! [`PathAggregator::take`] only after every writer has been joined.

use crate::data::Entry;
use parking_lot::Mutex;
use std::collections::HashMap;

/// A finished listing: parent-directory path to the entries it contains.
pub type Listing = HashMap<String, Vec<Entry>>;

/// Thread-safe map from directory path to its bucket of entries.
#[derive(Debug, Default)]
pub struct PathAggregator {
    paths: Mutex<Listing>,
}

impl PathAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry` to the bucket for `path`, creating the bucket if needed.
    pub fn insert(&self, path: impl Into<String>, entry: Entry) {
        let path = path.into();
        self.paths.lock().entry(path).or_default().push(entry);
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> Listing {
        self.paths.lock().clone()
    }

    /// Moves the current state out, leaving an empty map behind.
    pub fn take(&self) -> Listing {
        std::mem::take(&mut *self.paths.lock())
    }

    /// Drops every bucket.
    pub fn reset(&self) {
        self.paths.lock().clear();
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.paths.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
