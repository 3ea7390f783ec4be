//! Shared helpers for building synthetic event-log files.

#![allow(dead_code)]

use prost::Message;
use std::path::Path;
use tbexport::parser::masked_crc32c;
use tbexport::parser::proto::{Event, Summary, SummaryImage, SummaryValue};

/// Frame a payload the way an event-log writer would
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let len_bytes = (payload.len() as u64).to_le_bytes();
    out.extend_from_slice(&len_bytes);
    out.extend_from_slice(&masked_crc32c(&len_bytes).to_le_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&masked_crc32c(payload).to_le_bytes());
    out
}

pub fn scalar_event(tag: &str, step: i64, wall_time: f64, value: f32) -> Event {
    Event {
        wall_time,
        step,
        summary: Some(Summary {
            value: vec![SummaryValue {
                tag: tag.to_string(),
                simple_value: value,
                image: None,
            }],
        }),
    }
}

pub fn image_event(tag: &str, step: i64, wall_time: f64, encoded: Vec<u8>) -> Event {
    Event {
        wall_time,
        step,
        summary: Some(Summary {
            value: vec![SummaryValue {
                tag: tag.to_string(),
                simple_value: 0.0,
                image: Some(SummaryImage {
                    height: 0,
                    width: 0,
                    colorspace: 3,
                    encoded_image_string: encoded,
                }),
            }],
        }),
    }
}

/// An event carrying no summary values at all
pub fn empty_event(step: i64) -> Event {
    Event {
        wall_time: step as f64,
        step,
        summary: Some(Summary { value: vec![] }),
    }
}

/// PNG-encode a small solid RGB image
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::new_rgb8(width, height);
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Serialize events into a correctly framed event-log file
pub fn write_event_file(path: &Path, events: &[Event]) {
    let mut data = Vec::new();
    for event in events {
        data.extend(frame(&event.encode_to_vec()));
    }
    std::fs::write(path, data).unwrap();
}
