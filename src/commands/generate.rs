//! Generate command implementation.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::combiner::combine;
use crate::config::Config;
use crate::emitter::Emitter;
use crate::error::RangegenError;
use crate::fetcher::{fetch_bulk, BulkFetch, HttpDownloader, SourceOutcome};
use crate::fs_abstraction::{real_fs, FileSystem};
use crate::hotspots::{Category, HotspotList, HOTSPOT_LISTS};
use crate::pipeline::build_categories;
use crate::utils::group_digits;

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub counts: Vec<(Category, usize)>,
    pub combined: usize,
    pub category_files: Vec<PathBuf>,
    pub combined_file: PathBuf,
    pub config_files: Vec<PathBuf>,
    pub failed_sources: Vec<String>,
}

/// Run the generate command
pub async fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config_file {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let config = cli.apply_to(config);

    info!("Downloading all Russia ranges...");
    let downloader = HttpDownloader::new(Duration::from_secs(config.fetch_timeout_secs))
        .context("Failed to create HTTP client")?;
    let fetched = fetch_bulk(&downloader, &config.sources).await;

    let summary = generate(
        &fetched,
        &HOTSPOT_LISTS,
        &config,
        cli.configs,
        cli.allow_empty_bulk,
        real_fs(),
        Local::now().naive_local(),
    )?;

    print_summary(&summary, &config);
    Ok(())
}

/// Run the pipeline on fetched data and write every output file.
///
/// If every bulk source failed the run stops before writing anything, unless
/// `allow_empty_bulk` is set. Sources that answered with an empty list only
/// leave the bulk category empty.
pub fn generate(
    fetched: &BulkFetch,
    hotspots: &[HotspotList],
    config: &Config,
    with_configs: bool,
    allow_empty_bulk: bool,
    fs: &dyn FileSystem,
    now: NaiveDateTime,
) -> Result<RunSummary, RangegenError> {
    if fetched.all_failed() {
        warn!("{}", RangegenError::TotalFetchFailure);
        if !allow_empty_bulk {
            return Err(RangegenError::TotalFetchFailure);
        }
        warn!("Continuing with curated hotspot categories only");
    } else if fetched.cidrs.is_empty() {
        warn!("Bulk sources returned no CIDR blocks");
    }

    info!("Generating category ranges...");
    let results = build_categories(fetched.cidrs.as_slice(), hotspots);
    if results.bulk_is_empty() && !fetched.cidrs.is_empty() {
        warn!("No valid CIDR blocks in fetched bulk list");
    }

    let combined = combine(&results);

    info!("Saving files...");
    let emitter = Emitter::new(fs, now);
    let category_files = emitter.write_categories(&results, &config.directory)?;
    let combined_file = emitter.write_combined(&combined, &config.output)?;

    let config_files = if with_configs {
        emitter.write_scan_configs(&config.output, &config.directory, &config.configs_dir)?
    } else {
        Vec::new()
    };

    let failed_sources = fetched
        .failures()
        .filter_map(|outcome| match outcome {
            SourceOutcome::Failed { name, .. } => Some(name.clone()),
            SourceOutcome::Fetched { .. } => None,
        })
        .collect();

    Ok(RunSummary {
        counts: results.iter().map(|(c, r)| (c, r.len())).collect(),
        combined: combined.len(),
        category_files,
        combined_file,
        config_files,
        failed_sources,
    })
}

fn print_summary(summary: &RunSummary, config: &Config) {
    println!();
    println!("STATISTICS:");
    for (category, count) in &summary.counts {
        println!(
            "  {:<18} {:>10} ranges",
            format!("{}:", category.label()),
            group_digits(*count)
        );
    }
    println!(
        "  {:<18} {:>10} ranges ({})",
        "Combined:",
        group_digits(summary.combined),
        summary.combined_file.display()
    );

    if !summary.failed_sources.is_empty() {
        println!();
        println!("[WARN] Failed sources: {}", summary.failed_sources.join(", "));
    }

    println!();
    println!("USAGE:");
    println!("  All ranges: {}", config.output.display());
    for category in Category::ALL.into_iter().filter(|c| !c.is_bulk()) {
        println!(
            "  {}: {}",
            category.label(),
            config.directory.join(category.file_name()).display()
        );
    }
    if !summary.config_files.is_empty() {
        println!("  Scanner configs: {}", config.configs_dir.display());
    }
    println!();
    println!("Key ports: 80, 3000, 8000, 37777");
}
