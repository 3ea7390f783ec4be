//! PNG image series output writer.
//!
//! Writes each image of an ExportImageSeries to its own file, named after
//! the metric and the step the image was logged at.

use crate::aggregator::groups::ExportImageSeries;
use crate::output::csv::sanitize_metric_name;
use crate::utils::error::OutputError;
use image::ImageFormat;
use log::info;
use std::path::{Path, PathBuf};

/// Write every image of a series into `out_dir`
///
/// **Public** - main entry point for image output
///
/// Files are named `<sanitized-metric-name>_step<step>.png`, so each
/// filename uniquely encodes the (metric, step) pair. Like the table
/// writer, this never creates directories.
///
/// # Returns
/// The paths written, in series order
///
/// # Errors
/// * `OutputError::ImageFailed` - encode or write failure (including a
///   missing output directory)
/// * `OutputError::InvalidPath` - `out_dir` is empty
pub fn write_image_series(
    series: &ExportImageSeries,
    out_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, OutputError> {
    let out_dir = out_dir.as_ref();

    if out_dir.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    let stem = sanitize_metric_name(&series.name);
    let mut written = Vec::with_capacity(series.entries.len());

    for entry in &series.entries {
        let path = out_dir.join(format!("{}_step{}.png", stem, entry.step));
        info!("Writing image '{}' to: {}", series.name, path.display());

        entry.image.save_with_format(&path, ImageFormat::Png)?;
        written.push(path);
    }

    Ok(written)
}
