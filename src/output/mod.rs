//! Output writers for exported metric data.
//!
//! This module handles writing data to disk:
//! - CSV tables, one file per scalar metric
//! - PNG images, one file per (metric, step) pair

pub mod csv;
pub mod png;

// Re-export main functions
pub use csv::{read_table, sanitize_metric_name, write_table};
pub use png::write_image_series;
