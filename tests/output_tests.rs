//! Tests for the CSV and PNG writers.

use pretty_assertions::assert_eq;
use tbexport::aggregator::{ExportImageSeries, ExportTable, ImageEntry, TableRow};
use tbexport::output::{read_table, sanitize_metric_name, write_image_series, write_table};

fn sample_table() -> ExportTable {
    ExportTable {
        name: "avg_accuracy/validation".to_string(),
        rows: vec![
            TableRow {
                index: 0,
                wall_time: 1700000000.125,
                name: "avg_accuracy/validation".to_string(),
                step: 0,
                value: 0.25,
            },
            TableRow {
                index: 1,
                wall_time: 1700000060.5,
                name: "avg_accuracy/validation".to_string(),
                step: 100,
                value: 0.875,
            },
        ],
    }
}

#[test]
fn test_table_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("avg_accuracy-validation.csv");
    let table = sample_table();

    write_table(&table, &path).unwrap();
    let loaded = read_table(&path).unwrap();

    assert_eq!(loaded, table.rows);
}

#[test]
fn test_table_layout_matches_contract() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("table.csv");

    write_table(&sample_table(), &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next().unwrap(), ",wall_time,name,step,value");
    assert_eq!(
        lines.next().unwrap(),
        "0,1700000000.125,avg_accuracy/validation,0,0.25"
    );
    assert_eq!(lines.count(), 1);
}

#[test]
fn test_rewrite_is_byte_identical() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("table.csv");
    let table = sample_table();

    write_table(&table, &path).unwrap();
    let first = std::fs::read(&path).unwrap();

    write_table(&table, &path).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_image_filenames_encode_metric_and_step() {
    let temp_dir = tempfile::tempdir().unwrap();
    let series = ExportImageSeries {
        name: "wrong_examples/validation".to_string(),
        entries: vec![
            ImageEntry {
                step: 1,
                image: image::DynamicImage::new_rgb8(2, 2),
            },
            ImageEntry {
                step: 42,
                image: image::DynamicImage::new_rgb8(2, 2),
            },
        ],
    };

    let written = write_image_series(&series, temp_dir.path()).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "wrong_examples-validation_step1.png".to_string(),
            "wrong_examples-validation_step42.png".to_string(),
        ]
    );
    assert!(written.iter().all(|p| p.exists()));
}

#[test]
fn test_sanitize_replaces_every_separator() {
    assert_eq!(sanitize_metric_name("a/b/c"), "a-b-c");
}

#[test]
fn test_writers_do_not_create_directories() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("out");

    assert!(write_table(&sample_table(), missing.join("t.csv")).is_err());

    let series = ExportImageSeries {
        name: "correct_examples/train".to_string(),
        entries: vec![ImageEntry {
            step: 0,
            image: image::DynamicImage::new_rgb8(2, 2),
        }],
    };
    assert!(write_image_series(&series, &missing).is_err());

    assert!(!missing.exists());
}
