//! Event-log parsing and classification.
//!
//! This module handles:
//! - TFRecord frame decoding (length-prefixed, checksummed records)
//! - Protobuf decode of the event messages inside each frame
//! - Scanning a summaries tree for event files
//! - Classifying each record's first summary value

pub mod event;
pub mod proto;
pub mod record;

// Re-export main types
pub use event::{classify_event, scan_events, EventRecord, MetricValue};
pub use record::{masked_crc32c, RecordReader};
