use std::fs;
use std::path::Path;

use image::{DynamicImage, GrayImage, Luma};
use tempfile::tempdir;

use sn_convert::convert::{run_archive, run_raster, ArchiveConfig, RasterConfig};
use sn_convert::dataset::{self, read_dataset, read_dataset_header, write_dataset};
use sn_convert::{ErrorKind, PixelLayout, Samples};

fn write_image_archive(path: &Path, count: u32, rows: u32, cols: u32) -> Vec<u8> {
    let pixels: Vec<u8> = (0..count * rows * cols).map(|i| (i * 37 % 256) as u8).collect();
    let mut bytes = Vec::new();
    for field in [2051u32, count, rows, cols] {
        bytes.extend_from_slice(&field.to_be_bytes());
    }
    bytes.extend_from_slice(&pixels);
    fs::write(path, bytes).unwrap();
    pixels
}

fn write_label_archive(path: &Path, labels: &[u8]) {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&2049u32.to_be_bytes());
    bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    bytes.extend_from_slice(labels);
    fs::write(path, bytes).unwrap();
}

#[test]
fn count_mismatch_writes_nothing() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images.idx");
    let labels = dir.path().join("labels.idx");
    write_image_archive(&images, 3, 2, 2);
    write_label_archive(&labels, &[1, 2]);

    let config = ArchiveConfig::new(
        &images,
        &labels,
        dir.path().join("images.bin"),
        dir.path().join("labels.bin"),
        PixelLayout::RowMajor,
    );
    let err = run_archive(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CountMismatch);
    assert!(!config.images_output.exists());
    assert!(!config.labels_output.exists());
}

#[test]
fn archive_pair_becomes_two_datasets() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images.idx");
    let labels = dir.path().join("labels.idx");
    let pixels = write_image_archive(&images, 4, 3, 2);
    write_label_archive(&labels, &[0, 9, 4, 4]);

    let config = ArchiveConfig::new(
        &images,
        &labels,
        dir.path().join("images.bin"),
        dir.path().join("labels.bin"),
        PixelLayout::RowMajor,
    );
    assert_eq!(run_archive(&config).unwrap(), 4);

    let image_data = read_dataset(&config.images_output).unwrap();
    assert_eq!((image_data.count(), image_data.sample_size()), (4, 6));
    for (&b, &v) in pixels.iter().zip(image_data.data()) {
        assert_eq!(v, f64::from(b) / 255.0);
    }

    let label_data = read_dataset(&config.labels_output).unwrap();
    assert_eq!((label_data.count(), label_data.sample_size()), (4, 10));
    assert_eq!(label_data.sample(1).unwrap()[9], 1.0);
    assert_eq!(label_data.data().iter().sum::<f64>(), 4.0);
}

#[test]
fn layouts_differ_only_by_transposition() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images.idx");
    let labels = dir.path().join("labels.idx");
    write_image_archive(&images, 2, 3, 4);
    write_label_archive(&labels, &[1, 2]);

    let mut outputs = Vec::new();
    for (name, layout) in [("row", PixelLayout::RowMajor), ("col", PixelLayout::Transposed)] {
        let config = ArchiveConfig::new(
            &images,
            &labels,
            dir.path().join(format!("{name}_images.bin")),
            dir.path().join(format!("{name}_labels.bin")),
            layout,
        );
        run_archive(&config).unwrap();
        outputs.push(read_dataset(&config.images_output).unwrap());
    }

    let (row, col) = (&outputs[0], &outputs[1]);
    assert_ne!(row, col);
    for s in 0..2 {
        let (a, b) = (row.sample(s).unwrap(), col.sample(s).unwrap());
        for r in 0..3 {
            for c in 0..4 {
                assert_eq!(a[r * 4 + c], b[c * 3 + r]);
            }
        }
    }
}

#[test]
fn bad_magic_in_either_archive_is_a_format_error() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images.idx");
    let labels = dir.path().join("labels.idx");
    write_image_archive(&images, 1, 1, 1);
    write_label_archive(&labels, &[1]);

    // The label archive is not an image archive, and vice versa.
    assert_eq!(dataset::read_images(&labels).unwrap_err().kind(), ErrorKind::Format);
    assert_eq!(dataset::read_labels(&images).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn written_header_reads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.bin");
    let samples = Samples::new(3, 5, vec![0.25; 15]).unwrap();
    write_dataset(&path, &samples).unwrap();

    assert_eq!(read_dataset_header(&path).unwrap(), (3, 5));
    assert_eq!(fs::metadata(&path).unwrap().len(), 16 + 15 * 8);
    assert_eq!(read_dataset(&path).unwrap(), samples);
}

#[test]
fn raster_and_label_become_single_sample_datasets() {
    let dir = tempdir().unwrap();
    let png = dir.path().join("digit.png");
    GrayImage::from_pixel(64, 64, Luma([255])).save(&png).unwrap();

    let config = RasterConfig::new(&png, 7, dir.path().join("digit_image.bin"), dir.path().join("digit_label.bin"));
    run_raster(&config).unwrap();

    assert_eq!(read_dataset_header(&config.image_output).unwrap(), (1, 784));
    let label = read_dataset(&config.label_output).unwrap();
    assert_eq!(label.sample_size(), 10);
    assert_eq!(label.data()[7], 1.0);
}

#[test]
fn out_of_range_raster_label_writes_nothing() {
    let dir = tempdir().unwrap();
    let png = dir.path().join("digit.png");
    DynamicImage::ImageLuma8(GrayImage::new(28, 28)).save(&png).unwrap();

    for label in [-1, 10] {
        let config = RasterConfig::new(&png, label, dir.path().join("i.bin"), dir.path().join("l.bin"));
        assert_eq!(run_raster(&config).unwrap_err().kind(), ErrorKind::Range);
        assert!(!config.image_output.exists());
        assert!(!config.label_output.exists());
    }
}
