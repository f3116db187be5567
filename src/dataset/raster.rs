//! Single-sample conversion of a raster image and its digit label.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::DynamicImage;
use log::debug;

use crate::dataset::encoder::{normalize_pixel, one_hot};
use crate::dataset::samples::Samples;
use crate::error::{ConvertError, Result};

/// Side length of the square grid every raster image is resized to.
pub const RASTER_SIDE: u32 = 28;
/// Number of digit classes in a label sample.
pub const DIGIT_CLASSES: usize = 10;

/// Loads the image at `path` and converts it into one 784-value sample.
///
/// The image is converted to 8-bit grayscale, resized to exactly 28×28,
/// flattened row-major, and each pixel divided by 255. The resize uses
/// Catmull-Rom, the bicubic kernel Pillow's `Image.resize` applies by
/// default, so samples match those made by `image_to_input.py`.
pub fn build_image(path: impl AsRef<Path>) -> Result<Samples<f64>> {
    let path = path.as_ref();
    let img = image::open(path)?;
    debug!("loaded {} ({}x{})", path.display(), img.width(), img.height());
    raster_to_sample(&img)
}

/// Same as [`build_image`] for encoded image bytes (PNG/JPEG/BMP/GIF).
pub fn build_image_from_memory(bytes: &[u8]) -> Result<Samples<f64>> {
    let img = image::load_from_memory(bytes)?;
    raster_to_sample(&img)
}

fn raster_to_sample(img: &DynamicImage) -> Result<Samples<f64>> {
    let gray = img.to_luma8();
    let resized = imageops::resize(&gray, RASTER_SIDE, RASTER_SIDE, FilterType::CatmullRom);
    let data: Vec<f64> = resized.pixels().map(|p| normalize_pixel(p.0[0])).collect();
    Samples::new(1, (RASTER_SIDE * RASTER_SIDE) as usize, data)
}

/// Builds the one-hot sample for a digit label.
///
/// Fails with a range error unless `0 <= label <= 9`.
pub fn build_label(label: i64) -> Result<Samples<f64>> {
    let class = usize::try_from(label)
        .ok()
        .filter(|&c| c < DIGIT_CLASSES)
        .ok_or(ConvertError::Range { label, classes: DIGIT_CLASSES })?;
    Samples::new(1, DIGIT_CLASSES, one_hot(class, DIGIT_CLASSES))
}
