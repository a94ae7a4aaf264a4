//! Main entry point for the `remls` CLI application.
//!
//! `remls` lists a remote file tree the way `ls -l` lists a local one: one block
//! per directory with a `total` line, folders first, then files.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Sets up `tracing` logging and the rayon pool
//! - Delegates pagination and aggregation to [`Lister`]
//! - Writes the report to stdout or `--output`, and the profile on request
//!
//! # Flags of Interest
//! - `-r`: Recurse into sub-folders
//! - `-H`: Human-readable sizes
//! - `--root DIR`: Local directory served as the remote tree
//! - `--format csv`: CSV instead of text

use anyhow::{Context, Result};
use clap::Parser;
use remls::metrics::{print_profile_summary, save_stats_json};
use remls::{Args, ListOptions, Lister, LocalClient};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the listing; `Ok(false)` when at least one root could not be listed.
fn run() -> Result<bool> {
    let args = Args::parse();

    setup_logging(args.verbose)?;
    setup_thread_pool(&args)?;

    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("Failed to open root directory {}", args.root.display()))?;
    debug!("Serving {} as remote tree", root.display());

    let client = LocalClient::new(root, args.page_size as usize);
    let lister = Lister::new(ListOptions::from(&args), client);

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let report = lister.list(args.format, &mut out)?;
    out.flush().context("Failed to flush report")?;

    if let Some(path) = &args.output {
        eprintln!("Report written to: {}", path.display());
    }
    if args.profile {
        print_profile_summary(&report.profile);
    }
    if let Some(path) = &args.stats_json {
        save_stats_json(path, &report.profile)?;
        eprintln!("Listing stats saved to: {}", path.display());
    }

    Ok(report.is_success())
}

/// Default filter directives: our own events at `info` (`debug` when verbose),
/// everything else at `warn`.
fn log_directives(verbose: bool) -> &'static str {
    if verbose {
        "remls=debug,warn"
    } else {
        "remls=info,warn"
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_directives(verbose)))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Sets up the rayon pool that runs page tasks.
fn setup_thread_pool(args: &Args) -> Result<()> {
    let threads = args.threads.unwrap_or_else(num_cpus::get).max(1);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Failed to configure thread pool")?;
    debug!("Using {} worker thread(s)", threads);
    Ok(())
}
