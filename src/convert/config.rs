use std::path::PathBuf;

use crate::dataset::PixelLayout;

/// Which way a [`NetworkConfig`] run converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkDirection {
    /// `.sn` binary in, JSON out.
    #[default]
    BinaryToJson,
    /// JSON in, `.sn` binary out.
    JsonToBinary,
}

/// Configuration for converting a network file.
///
/// # Fields
/// - `input`     — file to read
/// - `output`    — file to create or replace
/// - `direction` — binary → JSON (inspection) or JSON → binary
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub direction: NetworkDirection,
}

impl NetworkConfig {
    /// Creates a binary → JSON configuration.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        NetworkConfig {
            input: input.into(),
            output: output.into(),
            direction: NetworkDirection::BinaryToJson,
        }
    }

    pub fn with_direction(mut self, direction: NetworkDirection) -> Self {
        self.direction = direction;
        self
    }
}

/// Configuration for converting an image/label archive pair into two
/// dataset binaries.
///
/// # Fields
/// - `images`, `labels`               — archive inputs
/// - `images_output`, `labels_output` — dataset outputs
/// - `layout`                         — pixel flattening policy; has no default
/// - `classes`                        — one-hot width of the label dataset
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub images: PathBuf,
    pub labels: PathBuf,
    pub images_output: PathBuf,
    pub labels_output: PathBuf,
    pub layout: PixelLayout,
    pub classes: usize,
}

impl ArchiveConfig {
    pub fn new(
        images: impl Into<PathBuf>,
        labels: impl Into<PathBuf>,
        images_output: impl Into<PathBuf>,
        labels_output: impl Into<PathBuf>,
        layout: PixelLayout,
    ) -> Self {
        ArchiveConfig {
            images: images.into(),
            labels: labels.into(),
            images_output: images_output.into(),
            labels_output: labels_output.into(),
            layout,
            classes: crate::dataset::raster::DIGIT_CLASSES,
        }
    }
}

/// Configuration for converting one raster image and its digit label into two
/// single-sample dataset binaries.
#[derive(Debug, Clone)]
pub struct RasterConfig {
    pub image: PathBuf,
    /// Digit depicted by the image; must be in `0..=9`.
    pub label: i64,
    pub image_output: PathBuf,
    pub label_output: PathBuf,
}

impl RasterConfig {
    pub fn new(
        image: impl Into<PathBuf>,
        label: i64,
        image_output: impl Into<PathBuf>,
        label_output: impl Into<PathBuf>,
    ) -> Self {
        RasterConfig {
            image: image.into(),
            label,
            image_output: image_output.into(),
            label_output: label_output.into(),
        }
    }
}
