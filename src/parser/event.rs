//! Event scanning and classification.
//!
//! This module walks a summaries tree, decodes the event records of every
//! event-log file found, and classifies each record's first summary value
//! as scalar, image, or unsupported.

use crate::parser::proto::{Event, SummaryValue};
use crate::parser::record::RecordReader;
use crate::utils::config::{EVENT_FILE_MARKER, HISTOGRAM_TAG_MARKER, IMAGE_TAG_MARKERS};
use crate::utils::error::ParseError;
use image::DynamicImage;
use log::{debug, warn};
use prost::Message;
use std::path::Path;
use walkdir::WalkDir;

/// The payload of one classified record.
///
/// Exactly three kinds exist; classification matches on all of them so a
/// new kind cannot be added without revisiting every consumer.
#[derive(Debug, Clone)]
pub enum MetricValue {
    /// A single numeric measurement
    Scalar(f64),
    /// A decoded raster image
    Image(DynamicImage),
    /// Recognized but not convertible (histogram-tagged records).
    /// Dropped before grouping, never represented downstream.
    Unsupported,
}

impl MetricValue {
    pub fn is_scalar(&self) -> bool {
        matches!(self, MetricValue::Scalar(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MetricValue::Image(_))
    }
}

/// One decoded, classified entry from an event-log file
#[derive(Debug, Clone)]
pub struct EventRecord {
    /// Seconds since epoch, fractional
    pub wall_time: f64,
    /// Step counter, monotonic within a file but not globally
    pub step: i64,
    /// Metric identifier, e.g. "loss/train"
    pub name: String,
    pub value: MetricValue,
}

/// Scan a summaries tree and return every retained record.
///
/// **Public** - main entry point for the scanner
///
/// Walks `root` recursively and reads every file whose name contains the
/// event-log marker, in walk order. Files are opened, fully consumed, and
/// closed one at a time. Records are retained if their tag passes the
/// allow-list (`keep_tags` empty = keep everything) and their value kind is
/// supported.
///
/// # Errors
/// * `ParseError::ImageDecode` - an image-tagged record carried undecodable
///   bytes; treated as a corrupt input file and therefore fatal
pub fn scan_events(
    root: impl AsRef<Path>,
    keep_tags: &[String],
) -> Result<Vec<EventRecord>, ParseError> {
    let root = root.as_ref();
    let mut records = Vec::new();

    if !root.exists() {
        warn!("Summaries directory does not exist: {}", root.display());
        return Ok(records);
    }

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = match entry.file_name().to_str() {
            Some(n) => n,
            None => continue,
        };
        if !name.contains(EVENT_FILE_MARKER) {
            continue;
        }

        debug!("Reading event file: {}", entry.path().display());
        read_event_file(entry.path(), keep_tags, &mut records)?;
    }

    debug!("Scan of {} retained {} records", root.display(), records.len());
    Ok(records)
}

/// Decode one event file, appending retained records in file order.
///
/// **Private** - internal helper for scan_events
fn read_event_file(
    path: &Path,
    keep_tags: &[String],
    records: &mut Vec<EventRecord>,
) -> Result<(), ParseError> {
    let reader = RecordReader::open(path)?;

    for payload in reader {
        let event = match Event::decode(payload.as_slice()) {
            Ok(event) => event,
            Err(e) => {
                // Malformed event message: skippable, like a bad frame
                warn!("Skipping undecodable event in {}: {}", path.display(), e);
                continue;
            }
        };
        if let Some(record) = classify_event(&event, keep_tags)? {
            records.push(record);
        }
    }

    Ok(())
}

/// Classify one event into a retained record, or nothing.
///
/// **Public** - also exercised directly by tests
///
/// Only the first summary value of an event is considered; additional
/// values in the same event are ignored (a preserved simplification of the
/// multi-value event format). Events with no summary values are excluded
/// before classification.
///
/// The allow-list names scalar metrics; image-tagged records are retained
/// regardless, since their tags carry a per-run suffix rather than a fixed
/// name.
pub fn classify_event(
    event: &Event,
    keep_tags: &[String],
) -> Result<Option<EventRecord>, ParseError> {
    let Some(value) = event.summary.as_ref().and_then(|s| s.value.first()) else {
        return Ok(None);
    };

    if !keep_tags.is_empty()
        && !keep_tags.iter().any(|t| t == &value.tag)
        && !is_image_tag(&value.tag)
    {
        return Ok(None);
    }

    let classified = classify_value(value)?;
    match classified {
        MetricValue::Unsupported => {
            debug!("Dropping unsupported (histogram) record: {}", value.tag);
            Ok(None)
        }
        MetricValue::Scalar(_) | MetricValue::Image(_) => Ok(Some(EventRecord {
            wall_time: event.wall_time,
            step: event.step,
            name: value.tag.clone(),
            value: classified,
        })),
    }
}

fn is_image_tag(tag: &str) -> bool {
    IMAGE_TAG_MARKERS.iter().any(|m| tag.contains(m))
}

/// Decide a summary value's kind from its tag and decode the payload.
///
/// **Private** - classification policy lives here
fn classify_value(value: &SummaryValue) -> Result<MetricValue, ParseError> {
    if value.tag.contains(HISTOGRAM_TAG_MARKER) {
        return Ok(MetricValue::Unsupported);
    }

    if is_image_tag(&value.tag) {
        let bytes = value
            .image
            .as_ref()
            .map(|img| img.encoded_image_string.as_slice())
            .unwrap_or_default();
        let decoded = image::load_from_memory(bytes).map_err(|source| ParseError::ImageDecode {
            tag: value.tag.clone(),
            source,
        })?;
        return Ok(MetricValue::Image(decoded));
    }

    Ok(MetricValue::Scalar(f64::from(value.simple_value)))
}
