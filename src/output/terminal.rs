//! Text report for a finished listing.
//!
//! Directories are printed in ascending path order. Each block starts with the
//! directory name (recursive listings only) and a `total` line summing the file
//! sizes, followed by one line per folder (`[d]`) and file (`[f]`).

use crate::aggregate::Listing;
use crate::data::Entry;
use crate::ordering::sort_entries;
use crate::utils::{format_modified, format_size};
use anyhow::Result;
use std::io::Write;

/// Renders a listing into report lines.
///
/// # Arguments
/// * `listing` - The aggregated listing; not modified
/// * `recursive` - Whether to print a `<dir>:` header per directory
/// * `human_readable` - Whether sizes use units instead of plain bytes
///
/// # Note
/// Placeholder entries contribute neither a line nor a size.
pub fn render(listing: &Listing, recursive: bool, human_readable: bool) -> Vec<String> {
    let mut keys: Vec<&String> = listing.keys().collect();
    keys.sort();

    let mut lines = Vec::new();
    for key in keys {
        let mut entries = listing[key].clone();
        sort_entries(&mut entries);

        if recursive {
            lines.push(format!("{}:", key));
        }

        let total: u64 = entries
            .iter()
            .filter_map(|e| match e {
                Entry::File(f) => Some(f.size),
                _ => None,
            })
            .sum();
        lines.push(format!("total {}", format_size(total, human_readable)));

        for entry in &entries {
            match entry {
                Entry::Folder(folder) => lines.push(format!("[d]\t{}", folder.path_display)),
                Entry::File(file) => lines.push(format!(
                    "[f]\t{}\t{}\t{}",
                    format_size(file.size, human_readable),
                    format_modified(&file.server_modified),
                    file.path_display
                )),
                Entry::Absent => {}
            }
        }
    }
    lines
}

/// Writes the rendered report to `out`, one line at a time.
pub fn write<W: Write + ?Sized>(
    listing: &Listing,
    recursive: bool,
    human_readable: bool,
    out: &mut W,
) -> Result<()> {
    for line in render(listing, recursive, human_readable) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn listing() -> Listing {
        let t = Utc.with_ymd_and_hms(2019, 12, 31, 23, 59, 59).unwrap();
        let mut listing = Listing::new();
        listing.insert(
            "/".to_string(),
            vec![
                Entry::file("b.txt", "/b.txt", 2048, t),
                Entry::folder("sub", "/sub"),
                Entry::file("a.txt", "/a.txt", 10, t),
            ],
        );
        listing.insert("/sub".to_string(), vec![Entry::Absent]);
        listing
    }

    #[test]
    fn test_render_recursive() {
        let lines = render(&listing(), true, false);
        assert_eq!(
            lines,
            vec![
                "/:",
                "total 2058",
                "[d]\t/sub",
                "[f]\t10\t2019-12-31 23:59:59 +0000 UTC\t/a.txt",
                "[f]\t2048\t2019-12-31 23:59:59 +0000 UTC\t/b.txt",
                "/sub:",
                "total 0",
            ]
        );
    }

    #[test]
    fn test_render_flat_human_readable() {
        let lines = render(&listing(), false, true);
        assert_eq!(lines[0], "total 2.06kB");
        assert!(lines[2].starts_with("[f]\t10B\t"));
        assert!(!lines.iter().any(|l| l.ends_with(':')));
    }

    #[test]
    fn test_write_emits_lines() {
        let mut buf = Vec::new();
        write(&listing(), false, false, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("total 2058\n[d]\t/sub\n"));
        assert!(text.ends_with("total 0\n"));
    }
}
