//! Report formatters for `remls`.
//!
//! # Available Formatters
//!
//! - **Terminal**: `ls`-style text blocks per directory with a `total` line
//! - **CSV**: Machine-readable rows for further processing
//!
//! Both take a finished [`Listing`](crate::aggregate::Listing) and impose the
//! deterministic ordering themselves, so the order in which pages were merged
//! never shows in the output.

pub mod csv;
pub mod terminal;
