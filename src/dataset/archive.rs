//! Reader for the magic-numbered image/label archive pair used by MNIST and
//! EMNIST.
//!
//! # Image archive layout (big-endian header)
//! ```text
//! bytes  0-3:   magic = 2051
//! bytes  4-7:   N     (number of images)
//! bytes  8-11:  rows
//! bytes 12-15:  cols
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # Label archive layout (big-endian header)
//! ```text
//! bytes  0-3:   magic = 2049
//! bytes  4-7:   N     (number of labels)
//! bytes  8..:   N bytes, one label each
//! ```

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::codec::ByteReader;
use crate::dataset::samples::Samples;
use crate::error::{ConvertError, Result};

pub const IMAGE_MAGIC: u32 = 2051;
pub const LABEL_MAGIC: u32 = 2049;

/// How the stored pixel grid of each image is flattened.
///
/// The two policies are not equivalent and neither is the default: callers
/// must pick one. EMNIST archives store each image transposed relative to
/// MNIST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Flatten each sample exactly as stored.
    RowMajor,
    /// Swap the row and column axes of each sample, then flatten.
    Transposed,
}

/// Raw images as read from an image archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageArchive {
    pub rows: usize,
    pub cols: usize,
    /// One sample of `rows * cols` bytes per image, stored order.
    pub samples: Samples<u8>,
}

/// Raw labels as read from a label archive.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelArchive {
    pub labels: Vec<u8>,
}

impl ImageArchive {
    pub fn count(&self) -> usize {
        self.samples.count()
    }

    pub fn sample_size(&self) -> usize {
        self.samples.sample_size()
    }

    /// Flattens every image according to `layout`.
    ///
    /// With `Transposed`, the stored pixel at `(r, c)` lands at index
    /// `c * rows + r` of its output sample.
    pub fn flatten(&self, layout: PixelLayout) -> Samples<u8> {
        match layout {
            PixelLayout::RowMajor => self.samples.clone(),
            PixelLayout::Transposed => {
                let (rows, cols) = (self.rows, self.cols);
                let mut data = Vec::with_capacity(self.samples.data().len());
                for image in self.samples.iter() {
                    for c in 0..cols {
                        for r in 0..rows {
                            data.push(image[r * cols + c]);
                        }
                    }
                }
                self.samples.with_data(data)
            }
        }
    }
}

impl LabelArchive {
    pub fn count(&self) -> usize {
        self.labels.len()
    }
}

/// Parses an image archive held in memory.
pub fn parse_images(bytes: &[u8]) -> Result<ImageArchive> {
    let mut reader = ByteReader::new(bytes);

    let magic = reader.read_u32_be("image archive magic")?;
    if magic != IMAGE_MAGIC {
        return Err(ConvertError::Format { archive: "image", expected: IMAGE_MAGIC, found: magic });
    }
    let count = reader.read_u32_be("image count")?;
    let rows = reader.read_u32_be("image rows")?;
    let cols = reader.read_u32_be("image cols")?;

    let sample_size = (rows as usize)
        .checked_mul(cols as usize)
        .ok_or(ConvertError::Dimensions { rows, cols })?;
    let payload_len = sample_size
        .checked_mul(count as usize)
        .ok_or(ConvertError::Dimensions { rows, cols })?;

    let payload = reader.read_bytes(payload_len, "image pixels")?;
    if reader.remaining() > 0 {
        warn!("image archive: ignoring {} trailing bytes", reader.remaining());
    }
    debug!("image archive: {count} images of {rows}x{cols}");

    Ok(ImageArchive {
        rows: rows as usize,
        cols: cols as usize,
        samples: Samples::new(count as usize, sample_size, payload.to_vec())?,
    })
}

/// Parses a label archive held in memory. Label values are not range-checked.
pub fn parse_labels(bytes: &[u8]) -> Result<LabelArchive> {
    let mut reader = ByteReader::new(bytes);

    let magic = reader.read_u32_be("label archive magic")?;
    if magic != LABEL_MAGIC {
        return Err(ConvertError::Format { archive: "label", expected: LABEL_MAGIC, found: magic });
    }
    let count = reader.read_u32_be("label count")?;

    let labels = reader.read_bytes(count as usize, "labels")?;
    if reader.remaining() > 0 {
        warn!("label archive: ignoring {} trailing bytes", reader.remaining());
    }
    debug!("label archive: {count} labels");

    Ok(LabelArchive { labels: labels.to_vec() })
}

pub fn read_images(path: impl AsRef<Path>) -> Result<ImageArchive> {
    parse_images(&fs::read(path)?)
}

pub fn read_labels(path: impl AsRef<Path>) -> Result<LabelArchive> {
    parse_labels(&fs::read(path)?)
}
