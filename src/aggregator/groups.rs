//! Grouping of classified records into export-ready structures.
//!
//! Records are accumulated by metric name, preserving first-seen order of
//! names and of records within a name, then partitioned into scalar tables
//! and image series once the full scan has completed.

use crate::parser::event::{EventRecord, MetricValue};
use image::DynamicImage;
use log::debug;
use serde::{Deserialize, Serialize};

/// Classified records grouped by metric name.
///
/// Order is significant twice over: distinct names keep insertion order,
/// and records within a name keep first-seen order from the directory walk.
#[derive(Debug, Default)]
pub struct MetricGroups {
    groups: Vec<(String, Vec<EventRecord>)>,
}

impl MetricGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate the records of a completed scan
    pub fn from_records(records: impl IntoIterator<Item = EventRecord>) -> Self {
        let mut groups = Self::new();
        for record in records {
            groups.insert(record);
        }
        groups
    }

    /// Append one record to its metric's group
    pub fn insert(&mut self, record: EventRecord) {
        match self.groups.iter_mut().find(|(name, _)| name == &record.name) {
            Some((_, records)) => records.push(record),
            None => self.groups.push((record.name.clone(), vec![record])),
        }
    }

    /// Number of distinct metric names seen
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Split the groups into scalar tables and image series.
    ///
    /// **Public** - called once the scan is complete; a group's nature is
    /// only known after all of its records have been seen.
    ///
    /// A group mixing scalar and image values matches neither arm and is
    /// silently excluded from both outputs. Tag-driven classification never
    /// produces such a group, but nothing structurally prevents one.
    pub fn partition(self) -> (Vec<ExportTable>, Vec<ExportImageSeries>) {
        let mut tables = Vec::new();
        let mut series = Vec::new();

        for (name, records) in self.groups {
            if records.iter().all(|r| r.value.is_scalar()) {
                tables.push(ExportTable::from_records(name, &records));
            } else if records.iter().all(|r| r.value.is_image()) {
                series.push(ExportImageSeries::from_records(name, records));
            } else {
                debug!("Excluding mixed scalar/image group: {}", name);
            }
        }

        (tables, series)
    }
}

/// One row of an exported table, in the fixed column order.
///
/// The unnamed leading column carries the row index within the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "")]
    pub index: u64,
    pub wall_time: f64,
    pub name: String,
    pub step: i64,
    pub value: f64,
}

/// A scalar metric reshaped into rows, ready for the CSV writer
#[derive(Debug, Clone)]
pub struct ExportTable {
    pub name: String,
    pub rows: Vec<TableRow>,
}

impl ExportTable {
    /// Build a table from an all-scalar group, row order = group order
    fn from_records(name: String, records: &[EventRecord]) -> Self {
        let rows = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| match record.value {
                MetricValue::Scalar(value) => Some(TableRow {
                    index: index as u64,
                    wall_time: record.wall_time,
                    name: record.name.clone(),
                    step: record.step,
                    value,
                }),
                MetricValue::Image(_) | MetricValue::Unsupported => None,
            })
            .collect();
        Self { name, rows }
    }
}

/// One image of a series, keyed by the step it was logged at
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub step: i64,
    pub image: DynamicImage,
}

/// An image metric reshaped into an ordered (step, image) sequence
#[derive(Debug, Clone)]
pub struct ExportImageSeries {
    pub name: String,
    pub entries: Vec<ImageEntry>,
}

impl ExportImageSeries {
    /// Build a series from an all-image group, order = group order
    fn from_records(name: String, records: Vec<EventRecord>) -> Self {
        let entries = records
            .into_iter()
            .filter_map(|record| match record.value {
                MetricValue::Image(image) => Some(ImageEntry {
                    step: record.step,
                    image,
                }),
                MetricValue::Scalar(_) | MetricValue::Unsupported => None,
            })
            .collect();
        Self { name, entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str, step: i64, value: f64) -> EventRecord {
        EventRecord {
            wall_time: 100.0 + step as f64,
            step,
            name: name.to_string(),
            value: MetricValue::Scalar(value),
        }
    }

    fn img(name: &str, step: i64) -> EventRecord {
        EventRecord {
            wall_time: 100.0 + step as f64,
            step,
            name: name.to_string(),
            value: MetricValue::Image(DynamicImage::new_rgb8(2, 2)),
        }
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let groups = MetricGroups::from_records(vec![
            scalar("b", 0, 1.0),
            scalar("a", 0, 2.0),
            scalar("b", 1, 3.0),
        ]);

        assert_eq!(groups.len(), 2);
        let (tables, _) = groups.partition();

        // First-seen name first, and rows within a name in arrival order
        assert_eq!(tables[0].name, "b");
        assert_eq!(tables[1].name, "a");
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[0].rows[0].value, 1.0);
        assert_eq!(tables[0].rows[1].value, 3.0);
    }

    #[test]
    fn test_partition_separates_kinds() {
        let groups = MetricGroups::from_records(vec![
            scalar("loss/train", 0, 0.5),
            img("confusion_matrix/validation", 5),
        ]);

        let (tables, series) = groups.partition();
        assert_eq!(tables.len(), 1);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "confusion_matrix/validation");
        assert_eq!(series[0].entries[0].step, 5);
    }

    #[test]
    fn test_mixed_group_is_excluded() {
        let groups = MetricGroups::from_records(vec![
            scalar("weird", 0, 0.5),
            img("weird", 1),
            scalar("fine", 0, 1.0),
        ]);

        let (tables, series) = groups.partition();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "fine");
        assert!(series.is_empty());
    }

    #[test]
    fn test_row_index_counts_from_zero() {
        let groups = MetricGroups::from_records(vec![
            scalar("loss/train", 10, 0.9),
            scalar("loss/train", 20, 0.8),
            scalar("loss/train", 30, 0.7),
        ]);

        let (tables, _) = groups.partition();
        let indices: Vec<u64> = tables[0].rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_scan_produces_nothing() {
        let groups = MetricGroups::from_records(vec![]);
        assert!(groups.is_empty());
        let (tables, series) = groups.partition();
        assert!(tables.is_empty());
        assert!(series.is_empty());
    }
}
