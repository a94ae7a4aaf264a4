//! Ordering of entries inside a directory bucket.
//!
//! Folders come before files, each group sorted by name. The [`Entry::Absent`]
//! placeholder sorts after every real entry so it can never lead a bucket.

use crate::data::Entry;
use std::cmp::Ordering;

/// Compares two bucket entries.
///
/// # Behavior
/// * Folder vs Folder and File vs File - ascending by name
/// * Folder vs File - the folder is always `Less`
/// * `Absent` - `Greater` than any real entry, `Equal` to another `Absent`
pub fn compare(a: &Entry, b: &Entry) -> Ordering {
    match (a, b) {
        (Entry::Folder(x), Entry::Folder(y)) => x.name.cmp(&y.name),
        (Entry::File(x), Entry::File(y)) => x.name.cmp(&y.name),
        (Entry::Folder(_), Entry::File(_)) => Ordering::Less,
        (Entry::File(_), Entry::Folder(_)) => Ordering::Greater,
        (Entry::Absent, Entry::Absent) => Ordering::Equal,
        (Entry::Absent, _) => Ordering::Greater,
        (_, Entry::Absent) => Ordering::Less,
    }
}

/// Sorts a bucket in place using [`compare`].
///
/// The sort is stable, so entries with identical names keep their relative order.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(compare);
}
