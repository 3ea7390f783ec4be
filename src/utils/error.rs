//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while decoding event-log files
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error while reading event file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Corrupt record header: {0}")]
    CorruptHeader(String),

    #[error("Failed to decode embedded image for tag '{tag}': {source}")]
    ImageDecode {
        tag: String,
        #[source]
        source: image::ImageError,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize CSV row: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Failed to encode image: {0}")]
    ImageFailed(#[from] image::ImageError),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
