//! Configuration and constants for the converter.

/// Substring that marks a file as a TensorBoard event log.
/// Writers name these files `events.out.tfevents.<timestamp>.<hostname>`.
pub const EVENT_FILE_MARKER: &str = "events.out.tfevents";

/// Tag substring identifying histogram-shaped summaries.
/// These carry a histogram payload we do not convert (extension point).
pub const HISTOGRAM_TAG_MARKER: &str = "batch_balance";

/// Tag substrings identifying image-shaped summaries
pub const IMAGE_TAG_MARKERS: &[&str] = &["confusion_matrix", "wrong_examples", "correct_examples"];

/// Name of the per-experiment subdirectory that is scanned for event files
pub const SUMMARIES_DIR: &str = "summaries";

/// Name of the per-experiment subdirectory that receives exported files.
/// Expected to pre-exist; the converter never creates it.
pub const OUT_DIR: &str = "out";

/// The eleven training/validation metrics exported by default
pub const DEFAULT_KEEP_TAGS: &[&str] = &[
    "loss/train",
    "avg_accuracy/train",
    "precision/train",
    "recall/train",
    "total_accuracy/train",
    "epoch_loss/train",
    "avg_accuracy/validation",
    "precision/validation",
    "recall/validation",
    "total_accuracy/validation",
    "epoch_loss/validation",
];
