//! CLI interface definitions for the `remls` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes:
//!
//! - [`Args`]: the main struct parsed from CLI inputs
//! - [`OutputFormat`]: an enum selecting the text or CSV report
//! - [`ListOptions`]: the immutable listing configuration derived from [`Args`]
//!
//! # Example
//!
//! ```bash
//! remls --root /srv/share -r -H /photos /music
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for `remls`.
///
/// # Examples
///
/// ```rust
/// use remls::Args;
/// use clap::Parser;
///
/// let args = Args::parse_from(["remls", "-r", "/docs"]);
/// assert!(args.recursive);
/// assert_eq!(args.paths, vec!["/docs".to_string()]);
/// ```
#[derive(Parser, Debug, Clone)]
#[command(name = "remls", author = "Sam Green", version, about)]
pub struct Args {
    /// Remote paths to list (defaults to the root)
    pub paths: Vec<String>,

    /// List sub-folders recursively
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Print sizes in human-readable units (e.g. 1.5MB)
    #[arg(short = 'H', long, default_value_t = false)]
    pub human_readable: bool,

    /// Show a progress spinner and debug logging on stderr
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Local directory served as the remote tree
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Number of entries per listing page
    #[arg(long, value_name = "N", default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: u64,

    /// Limit the number of worker threads used for page processing (default: all CPUs)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print phase timings and listing counts when done
    #[arg(long, default_value_t = false)]
    pub profile: bool,

    /// Save profiling data as JSON to FILE
    #[arg(long, value_name = "FILE")]
    pub stats_json: Option<PathBuf>,
}

/// Report format.
///
/// # Variants
/// * `Text` - `ls`-style blocks with a `total` line per directory
/// * `Csv` - One row per entry
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
}

/// Settings for one run of the lister. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub paths: Vec<String>,
    pub recursive: bool,
    pub human_readable: bool,
    pub verbose: bool,
}

impl ListOptions {
    /// The root paths to list; the remote root when none were given.
    pub fn root_paths(&self) -> Vec<String> {
        if self.paths.is_empty() {
            vec![String::new()]
        } else {
            self.paths.clone()
        }
    }
}

impl From<&Args> for ListOptions {
    fn from(args: &Args) -> Self {
        Self {
            paths: args.paths.clone(),
            recursive: args.recursive,
            human_readable: args.human_readable,
            verbose: args.verbose,
        }
    }
}
