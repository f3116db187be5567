//! Normalization of raw samples and the count-prefixed dataset binary.
//!
//! # Dataset layout (little-endian)
//! ```text
//! u64 sample_count
//! u64 sample_size
//! f64 payload[sample_count * sample_size]   row-major per sample
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::info;

use crate::codec::ByteReader;
use crate::dataset::archive::{ImageArchive, LabelArchive};
use crate::dataset::samples::Samples;
use crate::error::{ConvertError, Result};

/// Size of the `(count, sample_size)` header.
pub const HEADER_LEN: usize = 16;

/// Maps a pixel byte into `[0.0, 1.0]`.
pub fn normalize_pixel(byte: u8) -> f64 {
    f64::from(byte) / 255.0
}

/// A length-`classes` vector with 1.0 at `class` and 0.0 elsewhere.
pub(crate) fn one_hot(class: usize, classes: usize) -> Vec<f64> {
    let mut v = vec![0.0f64; classes];
    v[class] = 1.0;
    v
}

pub fn normalize_images(images: &Samples<u8>) -> Samples<f64> {
    images.map(|&b| normalize_pixel(b))
}

/// One-hot encodes every label.
///
/// Labels that are not below `class_count` fail with a range error.
pub fn normalize_labels(labels: &[u8], class_count: usize) -> Result<Samples<f64>> {
    let mut data = Vec::with_capacity(labels.len() * class_count);
    for &label in labels {
        let class = label as usize;
        if class >= class_count {
            return Err(ConvertError::Range { label: i64::from(label), classes: class_count });
        }
        data.extend(one_hot(class, class_count));
    }
    Samples::new(labels.len(), class_count, data)
}

/// Checks that an image archive and a label archive describe the same number
/// of samples. Must pass before any output is written.
pub fn ensure_paired(images: &ImageArchive, labels: &LabelArchive) -> Result<()> {
    if images.count() != labels.count() {
        return Err(ConvertError::CountMismatch { images: images.count(), labels: labels.count() });
    }
    Ok(())
}

pub fn encode_dataset(samples: &Samples<f64>) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + samples.data().len() * 8);
    out.extend_from_slice(&(samples.count() as u64).to_le_bytes());
    out.extend_from_slice(&(samples.sample_size() as u64).to_le_bytes());
    for value in samples.data() {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

/// Decodes a dataset binary. The payload must hold exactly
/// `count * sample_size` values; trailing bytes are an error.
pub fn decode_dataset(bytes: &[u8]) -> Result<Samples<f64>> {
    let mut reader = ByteReader::new(bytes);
    let (count, sample_size) = read_header(&mut reader)?;

    let needed = count.checked_mul(sample_size).and_then(|n| n.checked_mul(8));
    let values = match needed {
        Some(n) if n <= reader.remaining() => n / 8,
        _ => {
            return Err(ConvertError::truncated(
                "dataset payload",
                HEADER_LEN,
                needed.unwrap_or(usize::MAX),
                reader.remaining(),
            ))
        }
    };

    let mut data = Vec::with_capacity(values);
    for _ in 0..values {
        data.push(reader.read_f64_le("dataset value")?);
    }
    if reader.remaining() > 0 {
        return Err(ConvertError::Shape { count, sample_size, len: values + reader.remaining() / 8 });
    }
    Samples::new(count, sample_size, data)
}

fn read_header(reader: &mut ByteReader<'_>) -> Result<(usize, usize)> {
    let count = read_dimension(reader, "sample count")?;
    let sample_size = read_dimension(reader, "sample size")?;
    Ok((count, sample_size))
}

/// A header field that does not fit in `usize` can never be backed by a
/// payload on this target, so it is reported as truncated data.
fn read_dimension(reader: &mut ByteReader<'_>, what: &str) -> Result<usize> {
    let offset = reader.position();
    let value = reader.read_u64_le(what)?;
    usize::try_from(value).map_err(|_| ConvertError::truncated(what, offset, usize::MAX, reader.remaining()))
}

/// Writes `samples` as a dataset binary, replacing any existing file.
pub fn write_dataset(path: impl AsRef<Path>, samples: &Samples<f64>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(&(samples.count() as u64).to_le_bytes())?;
    writer.write_all(&(samples.sample_size() as u64).to_le_bytes())?;
    for value in samples.data() {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()?;

    info!(
        "wrote {} samples of size {} to {}",
        samples.count(),
        samples.sample_size(),
        path.display()
    );
    Ok(())
}

pub fn read_dataset(path: impl AsRef<Path>) -> Result<Samples<f64>> {
    decode_dataset(&fs::read(path)?)
}

/// Reads only the 16-byte `(count, sample_size)` header of a dataset file.
pub fn read_dataset_header(path: impl AsRef<Path>) -> Result<(usize, usize)> {
    let mut header = [0u8; HEADER_LEN];
    let mut file = File::open(path)?;
    file.read_exact(&mut header)?;
    read_header(&mut ByteReader::new(&header))
}
