pub mod archive;
pub mod encoder;
pub mod raster;
pub mod samples;

pub use archive::{parse_images, parse_labels, read_images, read_labels, ImageArchive, LabelArchive, PixelLayout};
pub use encoder::{
    decode_dataset, encode_dataset, ensure_paired, normalize_images, normalize_labels, read_dataset,
    read_dataset_header, write_dataset,
};
pub use raster::{build_image, build_image_from_memory, build_label};
pub use samples::Samples;
