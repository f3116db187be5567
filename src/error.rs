//! Error type shared by every converter.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// The four failure classes a conversion run can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad archive magic number or impossible archive dimensions.
    Format,
    /// Image and label archives disagree on the sample count.
    CountMismatch,
    /// Label value outside the class range.
    Range,
    /// Short read, missing file, unwritable path, or a failing external service.
    Io,
}

/// Errors that can occur while reading, converting or writing files.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// An archive header carried the wrong magic number.
    #[error("invalid {archive} archive magic number: expected {expected}, got {found}")]
    Format {
        /// Which archive was being read ("image" or "label").
        archive: &'static str,
        /// Magic number required by the format.
        expected: u32,
        /// Magic number found in the header.
        found: u32,
    },

    /// `rows * cols` does not fit in memory.
    #[error("image archive dimensions {rows}x{cols} overflow the sample size")]
    Dimensions {
        /// Rows declared in the header.
        rows: u32,
        /// Columns declared in the header.
        cols: u32,
    },

    /// Image and label counts differ; nothing was written.
    #[error("number of images ({images}) and labels ({labels}) do not match")]
    CountMismatch {
        /// Samples in the image archive.
        images: usize,
        /// Samples in the label archive.
        labels: usize,
    },

    /// A label does not name one of the classes.
    #[error("label {label} is outside the allowed range 0..={}", .classes.saturating_sub(1))]
    Range {
        /// Offending label value.
        label: i64,
        /// Number of classes in the one-hot encoding.
        classes: usize,
    },

    /// Flat sample data whose length disagrees with `count * sample_size`.
    #[error("sample data has {len} values, expected {count} x {sample_size}")]
    Shape {
        /// Declared number of samples.
        count: usize,
        /// Declared values per sample.
        sample_size: usize,
        /// Actual number of values.
        len: usize,
    },

    /// Underlying I/O failure, including truncated input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The raster image could not be decoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The network JSON could not be parsed or written.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Classifies this error into one of the four failure classes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format { .. } | Self::Dimensions { .. } => ErrorKind::Format,
            Self::CountMismatch { .. } => ErrorKind::CountMismatch,
            Self::Range { .. } => ErrorKind::Range,
            Self::Shape { .. } | Self::Io(_) | Self::Image(_) | Self::Json(_) => ErrorKind::Io,
        }
    }

    /// Builds the `UnexpectedEof` error raised when a read runs off the buffer.
    pub(crate) fn truncated(what: &str, offset: usize, needed: usize, remaining: usize) -> Self {
        Self::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!(
                "unexpected end of data reading {what} at offset {offset}: \
                 needed {needed} bytes, {remaining} remaining"
            ),
        ))
    }
}
