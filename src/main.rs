//! tbexport CLI
//!
//! Batch converter for TensorBoard event logs: walks an experiment root
//! and exports per-metric CSV tables and PNG image sequences.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use tbexport::commands::{default_keep_tags, execute_convert, validate_args, ConvertArgs};

/// Export TensorBoard event logs to CSV tables and PNG images
#[derive(Parser, Debug)]
#[command(name = "tbexport")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Experiment root directory; its immediate children are experiment
    /// names, each holding a `summaries` and a pre-existing `out` directory
    root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Create convert args with the fixed allow-list
    let args = ConvertArgs {
        root: cli.root,
        keep_tags: default_keep_tags(),
    };

    // Validate args first
    validate_args(&args)?;

    // Execute conversion
    execute_convert(args)?;

    Ok(())
}
