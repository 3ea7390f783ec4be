//! TFRecord frame reader for event-log files.
//!
//! Each physical record on disk is framed as:
//!
//! ```text
//! u64 length (LE) | u32 masked crc32c(length bytes) | payload | u32 masked crc32c(payload)
//! ```
//!
//! The reader yields raw payloads in file order. A record whose payload
//! checksum fails is skipped (its length is known, so the next frame is
//! still reachable); a corrupt length header or a truncated frame ends the
//! stream, since nothing after an untrusted length can be located.

use crate::utils::error::ParseError;
use log::warn;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Mask delta applied to frame checksums, fixed by the TFRecord framing format
const MASK_DELTA: u32 = 0xa282_ead8;

/// Compute the masked CRC32C used by the TFRecord framing
///
/// **Public** - shared with tests that build synthetic event files
pub fn masked_crc32c(bytes: &[u8]) -> u32 {
    let crc = crc32c::crc32c(bytes);
    ((crc >> 15) | (crc << 17)).wrapping_add(MASK_DELTA)
}

/// Streaming reader over the physical records of one event file
pub struct RecordReader<R> {
    reader: R,
    /// Set once the stream has hit EOF or an unrecoverable frame
    done: bool,
}

impl RecordReader<BufReader<File>> {
    /// Open an event file for record iteration
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }

    /// Read the next valid payload, skipping records that fail the payload
    /// checksum. Returns `Ok(None)` at end of stream.
    pub fn next_record(&mut self) -> Result<Option<Vec<u8>>, ParseError> {
        loop {
            if self.done {
                return Ok(None);
            }
            match self.read_frame() {
                Ok(Some(payload)) => return Ok(Some(payload)),
                // Bad payload checksum: frame boundary is intact, keep going
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    return Err(e);
                }
            }
        }
    }

    /// Read one frame. `Ok(Some)` = valid payload, `Ok(None)` = payload
    /// checksum mismatch (skipped), `Err` = header corruption or truncation.
    fn read_frame(&mut self) -> Result<Option<Vec<u8>>, ParseError> {
        let mut len_bytes = [0u8; 8];
        match self.reader.read_exact(&mut len_bytes) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                // Clean end of file between frames
                self.done = true;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }

        let mut len_crc = [0u8; 4];
        self.read_exact_or_truncated(&mut len_crc, "length checksum")?;

        if masked_crc32c(&len_bytes) != u32::from_le_bytes(len_crc) {
            return Err(ParseError::CorruptHeader(
                "length checksum mismatch".to_string(),
            ));
        }

        let len = u64::from_le_bytes(len_bytes) as usize;
        let mut payload = vec![0u8; len];
        self.read_exact_or_truncated(&mut payload, "payload")?;

        let mut data_crc = [0u8; 4];
        self.read_exact_or_truncated(&mut data_crc, "payload checksum")?;

        if masked_crc32c(&payload) != u32::from_le_bytes(data_crc) {
            warn!("Skipping record with payload checksum mismatch ({} bytes)", len);
            return Ok(None);
        }

        Ok(Some(payload))
    }

    fn read_exact_or_truncated(&mut self, buf: &mut [u8], what: &str) -> Result<(), ParseError> {
        self.reader.read_exact(buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                ParseError::CorruptHeader(format!("truncated {}", what))
            } else {
                ParseError::IoError(e)
            }
        })
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Vec<u8>;

    /// Iterate over valid payloads. An unrecoverable frame error ends
    /// iteration with a warning rather than failing the run: the remainder
    /// of the file cannot be located, but other files can still be read.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(item) => item,
            Err(e) => {
                warn!("Stopping event file early: {}", e);
                None
            }
        }
    }
}
