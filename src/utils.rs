//! Utility functions for `remls`.
//!
//! This module provides:
//! - Remote path normalization ([`fix_path`])
//! - Parent-directory bucket keys ([`parent_dir`])
//! - Size and timestamp formatting for the report

use chrono::{DateTime, Utc};
use humansize::{DECIMAL, FormatSizeOptions, format_size as humanize};

/// Normalizes a user-supplied remote path.
///
/// The root is represented by the empty string. Every other path starts with
/// a single `/`, has no empty or `.` segments and carries no trailing slash.
///
/// # Examples
/// ```rust
/// use remls::utils::fix_path;
///
/// assert_eq!(fix_path("/"), "");
/// assert_eq!(fix_path("docs/"), "/docs");
/// assert_eq!(fix_path("//docs/./a"), "/docs/a");
/// ```
pub fn fix_path(path: &str) -> String {
    path.trim()
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .fold(String::new(), |mut fixed, segment| {
            fixed.push('/');
            fixed.push_str(segment);
            fixed
        })
}

/// Returns the bucket key for a display path: everything before the last `/`.
///
/// Entries directly under the root map to `"/"`.
pub fn parent_dir(path_display: &str) -> String {
    match path_display.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path_display[..idx].to_string(),
    }
}

/// Formats a byte count either as plain decimal digits or with decimal units.
///
/// Human-readable sizes carry no space between value and unit (`10B`, `1.50kB`).
pub fn format_size(bytes: u64, human_readable: bool) -> String {
    if human_readable {
        humanize(bytes, FormatSizeOptions::from(DECIMAL).space_after_value(false))
    } else {
        bytes.to_string()
    }
}

/// Formats a server modification time for the report.
pub fn format_modified(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S %z UTC").to_string()
}
