//! Timing and listing statistics for `--profile` and `--stats-json`.
//!
//! This module provides:
//! - [`PhaseTimer`] - A wrapper around `Instant` for timing one root listing or render
//! - [`ProfileData`] - Phase timings plus accumulated [`ListingCounts`]
//! - [`print_profile_summary`] - Human-readable summary on stderr
//! - [`save_stats_json`] - JSON output for scripting integration
//!
//! # Usage
//!
//! ```rust
//! use remls::metrics::{PhaseTimer, ProfileData};
//!
//! let mut profile = ProfileData::new();
//! let timer = PhaseTimer::new("list /");
//!
//! // ... do work ...
//!
//! profile.add_phase(timer.finish());
//! assert_eq!(profile.phases.len(), 1);
//! ```

use crate::lister::ListingCounts;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};

/// A timer for measuring the duration of one phase.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    /// The name of the phase being timed
    pub name: String,
    /// The start time of the phase
    pub start: Instant,
}

impl PhaseTimer {
    /// Creates a new timer and starts timing the specified phase.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    /// Finishes timing the phase and returns the elapsed duration.
    pub fn finish(self) -> PhaseResult {
        PhaseResult {
            name: self.name,
            duration: self.start.elapsed(),
        }
    }
}

/// The result of a completed phase timing operation.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseResult {
    /// The name of the phase that was timed
    pub name: String,
    /// The duration of the phase
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Profiling data for a complete run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileData {
    /// Timing results, one per listed root and render
    pub phases: Vec<PhaseResult>,
    /// Listing counters summed over every root
    pub counts: ListingCounts,
    /// Roots listed successfully
    pub roots_listed: u64,
    /// Roots whose listing failed
    pub roots_failed: u64,
}

impl ProfileData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_phase(&mut self, phase: PhaseResult) {
        self.phases.push(phase);
    }

    /// Folds the counters of one root listing into the totals.
    pub fn add_counts(&mut self, counts: ListingCounts, succeeded: bool) {
        self.counts.pages += counts.pages;
        self.counts.tasks += counts.tasks;
        self.counts.entries += counts.entries;
        self.counts.skipped += counts.skipped;
        if succeeded {
            self.roots_listed += 1;
        } else {
            self.roots_failed += 1;
        }
    }

    /// Gets the total duration of all phases combined.
    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|p| p.duration).sum()
    }
}

/// Prints a formatted profile summary to stderr.
///
/// # Example Output
/// ```text
/// Listing phase timings
///   list /            150 ms
///   render /            2 ms
/// Pages:            12 (12 tasks)
/// Entries:          5830 (3 skipped)
/// Roots:            1 listed, 0 failed
/// ```
pub fn print_profile_summary(profile: &ProfileData) {
    eprintln!("\nListing phase timings");
    for phase in &profile.phases {
        eprintln!("  {:<15} {:>7} ms", phase.name, phase.duration.as_millis());
    }
    eprintln!(
        "Pages:            {} ({} tasks)",
        profile.counts.pages, profile.counts.tasks
    );
    eprintln!(
        "Entries:          {} ({} skipped)",
        profile.counts.entries, profile.counts.skipped
    );
    eprintln!(
        "Roots:            {} listed, {} failed",
        profile.roots_listed, profile.roots_failed
    );
    eprintln!();
}

/// Saves profiling statistics as pretty-printed JSON.
pub fn save_stats_json(stats_path: &Path, profile: &ProfileData) -> Result<()> {
    let stats = serde_json::json!({
        "phases": profile.phases,
        "total_duration_ms": profile.total_duration().as_millis() as u64,
        "counts": profile.counts,
        "roots_listed": profile.roots_listed,
        "roots_failed": profile.roots_failed,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    std::fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
        .with_context(|| format!("Failed to write stats to {}", stats_path.display()))?;
    Ok(())
}

/// Times a block of code, returning `(result, PhaseResult)`.
///
/// # Example
/// ```rust
/// use remls::time_phase;
///
/// let (result, timing) = time_phase!("sum", { 40 + 2 });
/// assert_eq!(result, 42);
/// assert_eq!(timing.name, "sum");
/// ```
#[macro_export]
macro_rules! time_phase {
    ($name:expr, $code:block) => {{
        let timer = $crate::metrics::PhaseTimer::new($name);
        let result = $code;
        let timing = timer.finish();
        (result, timing)
    }};
}
