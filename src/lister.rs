//! Paginated listing of remote folders.
//!
//! [`Lister::get_listing`] walks the cursor chain of one root listing. Every
//! non-empty page is handed to its own task on the rayon pool while the next
//! page is being fetched; the tasks merge their entries into a shared
//! [`PathAggregator`]. The rayon scope closing is the barrier after which the
//! aggregated [`Listing`] is read.
//!
//! Any failed remote call aborts the listing. Page tasks that are already
//! running stop inserting as soon as they see the cancellation flag, and the
//! error is returned once they have all been joined.

use crate::aggregate::{Listing, PathAggregator};
use crate::cli::{ListOptions, OutputFormat};
use crate::data::{Entry, Metadata};
use crate::error::{ListingError, ListingResult};
use crate::metrics::{PhaseTimer, ProfileData};
use crate::output;
use crate::progress::page_spinner;
use crate::remote::RemoteClient;
use crate::time_phase;
use crate::utils::{fix_path, parent_dir};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, error, info, trace};

/// Counters for the most recent [`Lister::get_listing`] call.
///
/// # Fields
/// * `pages` - Pages fetched from the remote, including an empty first page
/// * `tasks` - Page tasks spawned (one per non-empty page)
/// * `entries` - Records seen by the page tasks
/// * `skipped` - Records dropped because they were neither file nor folder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListingCounts {
    pub pages: u64,
    pub tasks: u64,
    pub entries: u64,
    pub skipped: u64,
}

/// Outcome of [`Lister::list`].
#[derive(Debug, Default)]
pub struct ListReport {
    /// One error per root that could not be listed
    pub failures: Vec<ListingError>,
    /// Timings and counters for every root
    pub profile: ProfileData,
}

impl ListReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
struct ListingStats {
    pages: AtomicU64,
    tasks: AtomicU64,
    entries: AtomicU64,
    skipped: AtomicU64,
}

impl ListingStats {
    fn reset(&self) {
        self.pages.store(0, Ordering::Relaxed);
        self.tasks.store(0, Ordering::Relaxed);
        self.entries.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
    }

    fn counts(&self) -> ListingCounts {
        ListingCounts {
            pages: self.pages.load(Ordering::Relaxed),
            tasks: self.tasks.load(Ordering::Relaxed),
            entries: self.entries.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

/// Lists remote folders through a [`RemoteClient`].
#[derive(Debug)]
pub struct Lister<C: RemoteClient> {
    options: ListOptions,
    client: C,
    paths: PathAggregator,
    stats: ListingStats,
}

impl<C: RemoteClient> Lister<C> {
    pub fn new(options: ListOptions, client: C) -> Self {
        Self {
            options,
            client,
            paths: PathAggregator::new(),
            stats: ListingStats::default(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Counters of the last listing, including a failed one.
    pub fn stats(&self) -> ListingCounts {
        self.stats.counts()
    }

    /// Lists every configured root path and writes one report per root to `out`.
    ///
    /// A root that fails to list produces no output; its error is logged and
    /// collected in the returned [`ListReport`], and the remaining roots are
    /// still listed.
    ///
    /// # Errors
    /// Returns an error only if writing the report fails.
    pub fn list<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<ListReport> {
        let mut report = ListReport::default();

        for path in self.options.root_paths() {
            info!("Listing files in '{}' (recursively: {})", path, self.options.recursive);

            let (listing, timing) = time_phase!(&format!("list {}", display_root(&path)), {
                self.get_listing(&path)
            });
            report.profile.add_phase(timing);
            report.profile.add_counts(self.stats(), listing.is_ok());

            let listing = match listing {
                Ok(listing) => listing,
                Err(e) => {
                    error!("{}", e);
                    report.failures.push(e);
                    continue;
                }
            };

            let timer = PhaseTimer::new(&format!("render {}", display_root(&path)));
            match format {
                OutputFormat::Text => output::terminal::write(
                    &listing,
                    self.options.recursive,
                    self.options.human_readable,
                    out,
                )?,
                OutputFormat::Csv => {
                    output::csv::render(&listing, self.options.human_readable, &mut *out)?
                }
            }
            report.profile.add_phase(timer.finish());
        }

        Ok(report)
    }

    /// Looks up a single remote path.
    pub fn get_metadata(&self, path: &str) -> ListingResult<Metadata> {
        let path = fix_path(path);
        self.client
            .get_metadata(&path)
            .map_err(|source| ListingError::Metadata { path, source })
    }

    /// Fetches the complete listing of `path`, grouped by parent directory.
    ///
    /// # Errors
    /// Returns the first remote failure; no partial listing is returned.
    pub fn get_listing(&self, path: &str) -> ListingResult<Listing> {
        let root = fix_path(path);
        let recursive = self.options.recursive;
        self.paths.reset();
        self.stats.reset();

        let pb = page_spinner(&root, self.options.verbose);

        let mut page = match self.client.list_folder(&root, recursive) {
            Ok(page) => page,
            Err(source) => {
                pb.finish_and_clear();
                return Err(ListingError::ListFolder { path: root, source });
            }
        };
        self.stats.pages.fetch_add(1, Ordering::Relaxed);

        let cancelled = AtomicBool::new(false);
        let paths = &self.paths;
        let stats = &self.stats;
        let root_ref = root.as_str();
        let cancelled_ref = &cancelled;

        let result = rayon::scope(|s| {
            let mut fetched: u64 = 1;
            while !page.entries.is_empty() {
                let entries = std::mem::take(&mut page.entries);
                debug!("Page {} of '{}': {} entries", fetched, root_ref, entries.len());
                stats.tasks.fetch_add(1, Ordering::Relaxed);
                s.spawn(move |_| {
                    process_page(paths, stats, root_ref, recursive, entries, cancelled_ref)
                });

                if !page.has_more {
                    break;
                }

                pb.set_message(format!("page {}", fetched + 1));
                page = match self.client.list_folder_continue(&page.cursor) {
                    Ok(next) => next,
                    Err(source) => {
                        cancelled_ref.store(true, Ordering::Relaxed);
                        return Err(ListingError::Continue {
                            path: root_ref.to_string(),
                            page: fetched,
                            source,
                        });
                    }
                };
                fetched += 1;
                stats.pages.fetch_add(1, Ordering::Relaxed);
            }
            Ok(())
        });

        pb.finish_and_clear();
        result?;

        Ok(self.paths.take())
    }
}

fn display_root(path: &str) -> &str {
    if path.trim_matches('/').is_empty() {
        "/"
    } else {
        path
    }
}

/// Merges one page of records into the aggregator.
fn process_page(
    paths: &PathAggregator,
    stats: &ListingStats,
    root: &str,
    recursive: bool,
    entries: Vec<Metadata>,
    cancelled: &AtomicBool,
) {
    for metadata in entries {
        if cancelled.load(Ordering::Relaxed) {
            return;
        }
        stats.entries.fetch_add(1, Ordering::Relaxed);

        let entry = match metadata {
            Metadata::File(file) => Entry::File(file),
            Metadata::Folder(folder) => {
                // Keeps empty folders visible as their own bucket
                if recursive {
                    paths.insert(folder.path_display.clone(), Entry::Absent);
                }
                Entry::Folder(folder)
            }
            Metadata::Deleted(deleted) => {
                trace!("Skipping deleted entry {}", deleted.path_display);
                stats.skipped.fetch_add(1, Ordering::Relaxed);
                continue;
            }
        };

        let Some(path_display) = entry.path_display() else {
            continue;
        };
        if path_display == root {
            continue;
        }
        let parent = parent_dir(path_display);
        paths.insert(parent, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryClient;
    use chrono::{DateTime, TimeZone, Utc};

    fn t() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 2, 2, 2, 2, 2).unwrap()
    }

    fn options(recursive: bool) -> ListOptions {
        ListOptions {
            recursive,
            ..ListOptions::default()
        }
    }

    fn names(listing: &Listing, key: &str) -> Vec<String> {
        let mut bucket = listing[key].clone();
        crate::ordering::sort_entries(&mut bucket);
        bucket
            .iter()
            .map(|e| e.name().unwrap_or("<absent>").to_string())
            .collect()
    }

    #[test]
    fn test_single_page_root_listing() {
        let client = MemoryClient::new(10).with_file("/a.txt", 10, t());
        let lister = Lister::new(options(false), client);

        let listing = lister.get_listing("").unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(names(&listing, "/"), vec!["a.txt"]);
        assert_eq!(
            lister.stats(),
            ListingCounts {
                pages: 1,
                tasks: 1,
                entries: 1,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_recursive_empty_folder_gets_bucket() {
        let client = MemoryClient::new(10).with_folder("/sub");
        let lister = Lister::new(options(true), client);

        let listing = lister.get_listing("/").unwrap();
        assert_eq!(names(&listing, "/"), vec!["sub"]);
        assert_eq!(listing["/sub"], vec![Entry::Absent]);
    }

    #[test]
    fn test_non_recursive_has_no_placeholders() {
        let client = MemoryClient::new(10).with_folder("/sub");
        let lister = Lister::new(options(false), client);

        let listing = lister.get_listing("").unwrap();
        assert!(!listing.contains_key("/sub"));
    }

    #[test]
    fn test_root_folder_is_not_its_own_entry() {
        let client = MemoryClient::new(1)
            .with_folder("/docs")
            .with_file("/docs/x.txt", 5, t())
            .with_folder("/docs/empty");
        let lister = Lister::new(options(true), client);

        let listing = lister.get_listing("docs/").unwrap();
        for bucket in listing.values() {
            assert!(bucket.iter().all(|e| e.path_display() != Some("/docs")));
        }
        assert_eq!(names(&listing, "/docs"), vec!["empty", "x.txt", "<absent>"]);
        assert_eq!(listing["/docs/empty"], vec![Entry::Absent]);
        assert_eq!(lister.stats().pages, 3);
    }

    #[test]
    fn test_deleted_entries_are_dropped() {
        let client = MemoryClient::new(10)
            .with_file("/keep.txt", 1, t())
            .with_deleted("/gone.txt");
        let lister = Lister::new(options(false), client);

        let listing = lister.get_listing("").unwrap();
        assert_eq!(names(&listing, "/"), vec!["keep.txt"]);
        assert_eq!(lister.stats().skipped, 1);
    }

    #[test]
    fn test_empty_root_yields_empty_listing() {
        let lister = Lister::new(options(true), MemoryClient::new(10));
        let listing = lister.get_listing("").unwrap();
        assert!(listing.is_empty());
        assert_eq!(lister.stats().tasks, 0);
    }

    #[test]
    fn test_failed_continuation_aborts() {
        let client = MemoryClient::new(1)
            .with_file("/a.txt", 1, t())
            .with_file("/b.txt", 2, t())
            .with_file("/c.txt", 3, t())
            .failing_page(2);
        let lister = Lister::new(options(false), client);

        let err = lister.get_listing("").unwrap_err();
        assert!(matches!(err, ListingError::Continue { page: 1, .. }));
        assert_eq!(lister.client().continue_calls(), 1);
        assert_eq!(lister.client().open_listings(), 0);
    }

    #[test]
    fn test_redundant_slashes_do_not_record_root() {
        let client = MemoryClient::new(1)
            .with_folder("/docs")
            .with_file("/docs/b.txt", 3, t());
        let lister = Lister::new(options(true), client);

        for path in ["//docs", "/./docs//", " docs "] {
            let listing = lister.get_listing(path).unwrap();
            assert!(!listing.contains_key("/"), "root recorded for {path:?}");
            assert_eq!(listing.keys().collect::<Vec<_>>(), vec!["/docs"]);
            assert_eq!(names(&listing, "/docs"), vec!["b.txt", "<absent>"]);
        }
    }

    #[test]
    fn test_failed_first_call() {
        let client = MemoryClient::new(1).failing_path("/broken");
        let lister = Lister::new(options(false), client);

        let err = lister.get_listing("/broken").unwrap_err();
        assert!(matches!(err, ListingError::ListFolder { .. }));
        assert_eq!(err.path(), "/broken");
    }

    #[test]
    fn test_failed_first_call_with_spinner() {
        let options = ListOptions {
            verbose: true,
            ..options(true)
        };
        let lister = Lister::new(options, MemoryClient::new(1));

        let err = lister.get_listing("/nowhere").unwrap_err();
        assert!(matches!(err, ListingError::ListFolder { .. }));
        assert_eq!(lister.stats().pages, 0);

        // The next listing starts from a clean slate
        assert!(lister.get_listing("").unwrap().is_empty());
    }

    #[test]
    fn test_each_call_starts_fresh() {
        let client = MemoryClient::new(10)
            .with_folder("/a")
            .with_file("/a/one.txt", 1, t())
            .with_folder("/b")
            .with_file("/b/two.txt", 2, t());
        let lister = Lister::new(options(false), client);

        let first = lister.get_listing("/a").unwrap();
        let second = lister.get_listing("/b").unwrap();
        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["/a"]);
        assert_eq!(second.keys().collect::<Vec<_>>(), vec!["/b"]);
    }

    #[test]
    fn test_get_metadata_normalizes_path() {
        let client = MemoryClient::new(10).with_file("/a.txt", 10, t());
        let lister = Lister::new(options(false), client);

        let md = lister.get_metadata("a.txt").unwrap();
        assert_eq!(md.path_display(), "/a.txt");

        let err = lister.get_metadata("/missing").unwrap_err();
        assert!(matches!(err, ListingError::Metadata { .. }));
    }
}
