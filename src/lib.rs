//! Library crate for remls
//!
//! `remls` produces deterministic, `ls`-style listings of remote file trees.
//!
//! # Features
//!
//! - **Paginated listing**: walks cursor chains through any [`RemoteClient`]
//! - **Concurrent aggregation**: every page is merged by its own task into a shared index
//! - **Stable reports**: folders before files, directories in path order, per-directory totals
//! - **Pluggable backends**: a local directory ([`LocalClient`]) or an in-memory tree ([`MemoryClient`])
//!
//! # Modules
//!
//! - [`data`]: Remote metadata and bucket entries (`Metadata`, `Entry`)
//! - [`ordering`]: Entry ordering within a directory
//! - [`aggregate`]: The shared per-directory index (`PathAggregator`)
//! - [`lister`]: Pagination driver (`Lister`)
//! - [`output`]: Text and CSV reports
//! - [`remote`]: The `RemoteClient` trait and its backends
//! - [`cli`]: Command-line interface definitions and `ListOptions`
//! - [`utils`]: Path normalization and size formatting

pub mod aggregate;
pub mod cli;
pub mod data;
pub mod error;
pub mod lister;
pub mod metrics;
pub mod ordering;
pub mod output;
pub mod progress;
pub mod remote;
pub mod utils;

pub use aggregate::{Listing, PathAggregator};
pub use cli::{Args, ListOptions, OutputFormat};
pub use data::{Entry, Metadata};
pub use error::{ListingError, RemoteError};
pub use lister::{ListReport, Lister, ListingCounts};
pub use remote::{LocalClient, MemoryClient, RemoteClient};
