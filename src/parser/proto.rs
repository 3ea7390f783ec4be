//! Wire-format messages for TensorBoard event logs.
//!
//! Hand-derived `prost` messages covering exactly the fields this tool
//! reads from the TensorFlow `Event`/`Summary` schema. Field numbers match
//! the upstream .proto definitions; everything else on the wire (graph
//! defs, tensors, histograms, metadata) is skipped by prost during decode.

/// One entry of an event log: a timestamped, step-indexed payload.
///
/// Upstream this is a oneof over many payload kinds; we only ever read the
/// `summary` branch, so the other branches are left unmodeled.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Event {
    /// Seconds since epoch, fractional
    #[prost(double, tag = "1")]
    pub wall_time: f64,

    /// Global step. Monotonic within one file, not globally.
    #[prost(int64, tag = "2")]
    pub step: i64,

    #[prost(message, optional, tag = "5")]
    pub summary: Option<Summary>,
}

/// A set of named values attached to one event
#[derive(Clone, PartialEq, prost::Message)]
pub struct Summary {
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<SummaryValue>,
}

/// One named, typed measurement inside a summary.
///
/// `simple_value` and `image` are oneof siblings upstream; decoding them as
/// plain fields is wire-compatible and lets us read whichever is present.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SummaryValue {
    /// Metric identifier, e.g. "loss/train"
    #[prost(string, tag = "1")]
    pub tag: String,

    /// Scalar payload. Absent on the wire decodes as 0.0, matching the
    /// upstream proto3 default the original reader relied on.
    #[prost(float, tag = "2")]
    pub simple_value: f32,

    #[prost(message, optional, tag = "4")]
    pub image: Option<SummaryImage>,
}

/// An encoded raster image payload
#[derive(Clone, PartialEq, prost::Message)]
pub struct SummaryImage {
    #[prost(int32, tag = "1")]
    pub height: i32,

    #[prost(int32, tag = "2")]
    pub width: i32,

    /// 1 = grayscale, 3 = RGB, 4 = RGBA
    #[prost(int32, tag = "3")]
    pub colorspace: i32,

    /// Image bytes in a self-describing container format (PNG in practice)
    #[prost(bytes = "vec", tag = "4")]
    pub encoded_image_string: Vec<u8>,
}
