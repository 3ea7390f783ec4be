//! Aggregation of classified records into export-ready structures.
//!
//! This module transforms scanned event records into:
//! - Insertion-ordered groups keyed by metric name
//! - Scalar tables (one row per record)
//! - Image series (one (step, image) pair per record)

pub mod groups;

// Re-export main types
pub use groups::{ExportImageSeries, ExportTable, ImageEntry, MetricGroups, TableRow};
