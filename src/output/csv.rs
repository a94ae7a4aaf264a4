//! CSV output formatter for listings.
//!
//! Rows follow the same order as the text report: directories ascending, entries
//! within a directory folders first, then files, each by name.

use crate::aggregate::Listing;
use crate::data::Entry;
use crate::ordering::sort_entries;
use crate::utils::{format_modified, format_size};
use anyhow::Result;
use ::csv::Writer;
use serde::Serialize;
use std::io;

/// A single CSV record.
///
/// # Fields
/// * `directory` - Bucket key the entry was listed under
/// * `kind` - "folder" or "file"
/// * `name` - Last path component
/// * `path` - Full display path
/// * `size_bytes` / `size` - File size, empty for folders
/// * `modified` - Server modification time, empty for folders
#[derive(Debug, Serialize)]
pub struct CsvRow<'a> {
    pub directory: &'a str,
    pub kind: &'static str,
    pub name: &'a str,
    pub path: &'a str,
    pub size_bytes: Option<u64>,
    pub size: Option<String>,
    pub modified: Option<String>,
}

/// Writes `listing` as CSV to `out`.
pub fn render<W: io::Write>(listing: &Listing, human_readable: bool, out: W) -> Result<()> {
    let mut writer = Writer::from_writer(out);

    let mut keys: Vec<&String> = listing.keys().collect();
    keys.sort();

    for key in keys {
        let mut entries = listing[key].clone();
        sort_entries(&mut entries);

        for entry in &entries {
            let row = match entry {
                Entry::Folder(folder) => CsvRow {
                    directory: key,
                    kind: "folder",
                    name: &folder.name,
                    path: &folder.path_display,
                    size_bytes: None,
                    size: None,
                    modified: None,
                },
                Entry::File(file) => CsvRow {
                    directory: key,
                    kind: "file",
                    name: &file.name,
                    path: &file.path_display,
                    size_bytes: Some(file.size),
                    size: Some(format_size(file.size, human_readable)),
                    modified: Some(format_modified(&file.server_modified)),
                },
                Entry::Absent => continue,
            };
            writer.serialize(row)?;
        }
    }

    writer.flush()?;
    Ok(())
}
