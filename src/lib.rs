//! tbexport
//!
//! Batch conversion of TensorBoard event logs into per-metric CSV tables
//! and PNG image sequences.
//!
//! This crate provides the core implementation for the `tbexport` CLI
//! tool: it walks an experiment root, decodes each experiment's event-log
//! files, groups the records by metric name, and writes one CSV file per
//! scalar metric and one PNG file per logged image.
//!
//! ## Getting Started
//!
//! Most users should use the CLI:
//!
//! ```bash
//! tbexport path/to/experiments
//! ```
//!
//! Library users can drive a single conversion through
//! [`commands::convert_run`].

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
