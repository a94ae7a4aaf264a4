//! Progress spinner for long paginations.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Returns a spinner for listing `path`, or a hidden bar when not `verbose`.
pub fn page_spinner(path: &str, verbose: bool) -> ProgressBar {
    if !verbose {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner} Listing {prefix} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_prefix(if path.is_empty() { "/".to_string() } else { path.to_string() });
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
