//! Error types for remls
//!
//! Two layers:
//! - [`RemoteError`]: what a [`RemoteClient`](crate::remote::RemoteClient) reports
//! - [`ListingError`]: what the lister reports, with the root path and page that failed
//!
//! Every remote failure is fatal to the listing it occurred in. There is no
//! distinction between transient and permanent failures and no retry.

use thiserror::Error;

/// Failures reported by a remote listing backend
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The requested path does not exist
    #[error("path not found: '{path}'")]
    NotFound { path: String },

    /// The path points outside the served tree
    #[error("invalid path: '{path}'")]
    InvalidPath { path: String },

    /// A folder listing was requested for a file
    #[error("not a folder: '{path}'")]
    NotAFolder { path: String },

    /// The continuation cursor is unknown or malformed
    #[error("invalid cursor '{0}'")]
    InvalidCursor(String),

    /// The backend refused or failed the call
    #[error("remote unavailable: {0}")]
    Unavailable(String),

    /// Local I/O failure while serving a path
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failure
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Failures of a single root listing
#[derive(Error, Debug)]
pub enum ListingError {
    /// The first listing call failed
    #[error("failed to list '{path}': {source}")]
    ListFolder {
        path: String,
        #[source]
        source: RemoteError,
    },

    /// A continuation call failed after `page` pages were fetched
    #[error("failed to continue listing '{path}' after page {page}: {source}")]
    Continue {
        path: String,
        page: u64,
        #[source]
        source: RemoteError,
    },

    /// Metadata lookup failed
    #[error("failed to get metadata for '{path}': {source}")]
    Metadata {
        path: String,
        #[source]
        source: RemoteError,
    },
}

impl ListingError {
    /// The (normalized) path the failing call was made for.
    pub fn path(&self) -> &str {
        match self {
            ListingError::ListFolder { path, .. }
            | ListingError::Continue { path, .. }
            | ListingError::Metadata { path, .. } => path,
        }
    }
}

/// Result type for backend calls
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Result type for listing calls
pub type ListingResult<T> = std::result::Result<T, ListingError>;
