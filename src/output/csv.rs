//! CSV table output writer.
//!
//! Writes ExportTable structs to delimited-text files with the fixed
//! column layout `,wall_time,name,step,value` (the unnamed leading column
//! holds the row index).

use crate::aggregator::groups::{ExportTable, TableRow};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a table to a CSV file
///
/// **Public** - main entry point for table output
///
/// The output directory is expected to exist already; this writer never
/// creates directories, so a missing target surfaces as a write failure.
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write (including a
///   missing output directory)
/// * `OutputError::CsvFailed` - row serialization error
/// * `OutputError::InvalidPath` - path is empty or is a directory
pub fn write_table(table: &ExportTable, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!(
        "Writing table '{}' ({} rows) to: {}",
        table.name,
        table.rows.len(),
        output_path.display()
    );

    validate_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    // The header row is emitted from the field names of the first record
    for row in &table.rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(OutputError::WriteFailed)?;

    debug!(
        "Table written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Read a table back from a CSV file
///
/// **Public** - inverse of write_table, useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - file open error
/// * `OutputError::CsvFailed` - malformed row
pub fn read_table(input_path: impl AsRef<Path>) -> Result<Vec<TableRow>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading table from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }

    debug!("Table loaded: {} rows", rows.len());

    Ok(rows)
}

/// Replace path separators in a metric name so it is a safe file stem
///
/// **Public** - shared by the CSV and PNG writers
pub fn sanitize_metric_name(name: &str) -> String {
    name.replace('/', "-")
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
