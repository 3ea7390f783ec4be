//! Convert command implementation.
//!
//! The convert command:
//! 1. Lists experiment directories under the given root
//! 2. Scans each experiment's summaries tree for event files
//! 3. Classifies and groups the decoded records
//! 4. Writes CSV tables and PNG images into the experiment's out directory

use crate::aggregator::{ExportImageSeries, ExportTable, MetricGroups};
use crate::output::{sanitize_metric_name, write_image_series, write_table};
use crate::parser::scan_events;
use crate::utils::config::{DEFAULT_KEEP_TAGS, OUT_DIR, SUMMARIES_DIR};
use crate::utils::error::ParseError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Root directory whose immediate children are experiment names
    pub root: PathBuf,

    /// Metric names to retain. Empty keeps every non-image, non-histogram
    /// tag; the CLI fills in the default eleven-name list.
    pub keep_tags: Vec<String>,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            keep_tags: default_keep_tags(),
        }
    }
}

/// The fixed allow-list of training/validation metrics
///
/// **Public** - the allow-list is an explicit parameter of the conversion
/// entry points, never an implicit global
pub fn default_keep_tags() -> Vec<String> {
    DEFAULT_KEEP_TAGS.iter().map(|s| s.to_string()).collect()
}

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// Experiments are processed one after another, each fully before the next.
/// There is no per-experiment isolation: an error inside one experiment's
/// conversion aborts the whole run.
///
/// # Errors
/// * Unreadable root directory
/// * Fatal decode errors (corrupt embedded images)
/// * File write errors, including a missing out directory
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Converting experiments under: {}", args.root.display());

    let experiments = list_experiments(&args.root)
        .with_context(|| format!("Failed to list experiments in {}", args.root.display()))?;

    for experiment_name in &experiments {
        info!("Handling experiment '{}'", experiment_name);

        let experiment_dir = args.root.join(experiment_name);
        let summary_dir = experiment_dir.join(SUMMARIES_DIR);
        let out_dir = experiment_dir.join(OUT_DIR);

        let (tables, image_series) = convert_run(&summary_dir, &args.keep_tags)
            .with_context(|| format!("Failed to convert experiment '{}'", experiment_name))?;

        debug!(
            "Experiment '{}': {} scalar metrics, {} image metrics",
            experiment_name,
            tables.len(),
            image_series.len()
        );

        for table in &tables {
            let output_path = out_dir.join(format!("{}.csv", sanitize_metric_name(&table.name)));
            info!("Exporting table '{}' to '{}'", table.name, output_path.display());
            write_table(table, &output_path)
                .with_context(|| format!("Failed to write table '{}'", table.name))?;
        }

        for series in &image_series {
            write_image_series(series, &out_dir)
                .with_context(|| format!("Failed to write images for '{}'", series.name))?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        "Converted {} experiment(s) in {:.2}s",
        experiments.len(),
        elapsed.as_secs_f64()
    );

    Ok(())
}

/// Convert one summaries tree into export-ready tables and image series
///
/// **Public** - library entry point, also used directly by tests
///
/// All groups are held in memory until the scan completes; a group's
/// scalar-or-image nature is only known once all of its records are in.
pub fn convert_run(
    summaries_dir: &Path,
    keep_tags: &[String],
) -> Result<(Vec<ExportTable>, Vec<ExportImageSeries>), ParseError> {
    let records = scan_events(summaries_dir, keep_tags)?;
    let groups = MetricGroups::from_records(records);
    Ok(groups.partition())
}

/// List experiment names: the immediate child directories of `root`.
///
/// **Private** - sorted by name so repeated runs are deterministic.
/// Non-directory children are skipped.
fn list_experiments(root: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.root.as_os_str().is_empty() {
        anyhow::bail!("Experiment root cannot be empty");
    }

    if !args.root.exists() {
        anyhow::bail!("Experiment root does not exist: {}", args.root.display());
    }

    if !args.root.is_dir() {
        anyhow::bail!(
            "Experiment root is not a directory: {}",
            args.root.display()
        );
    }

    Ok(())
}
