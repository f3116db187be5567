use log::info;

use crate::convert::config::{ArchiveConfig, NetworkConfig, NetworkDirection, RasterConfig};
use crate::dataset::{self, normalize_images, normalize_labels, write_dataset};
use crate::error::Result;
use crate::network::{self, Network};

/// Converts one network file according to `config.direction`.
pub fn run_network(config: &NetworkConfig) -> Result<Network> {
    match config.direction {
        NetworkDirection::BinaryToJson => {
            let network = network::read_network(&config.input)?;
            network.save_json(&config.output)?;
            Ok(network)
        }
        NetworkDirection::JsonToBinary => {
            let network = Network::load_json(&config.input)?;
            network::write_network(&config.output, &network)?;
            Ok(network)
        }
    }
}

/// Converts an archive pair into an image dataset and a one-hot label dataset.
///
/// Both archives are read and their counts compared before anything is
/// written, so a mismatch leaves no output behind. Returns the sample count.
pub fn run_archive(config: &ArchiveConfig) -> Result<usize> {
    let images = dataset::read_images(&config.images)?;
    let labels = dataset::read_labels(&config.labels)?;
    dataset::ensure_paired(&images, &labels)?;

    // Both are normalized before either is written.
    let image_samples = normalize_images(&images.flatten(config.layout));
    let label_samples = normalize_labels(&labels.labels, config.classes)?;

    info!(
        "converting {} samples ({}x{}, {:?})",
        images.count(),
        images.rows,
        images.cols,
        config.layout
    );
    write_dataset(&config.images_output, &image_samples)?;
    write_dataset(&config.labels_output, &label_samples)?;
    Ok(images.count())
}

/// Converts a single raster image and its label into two one-sample datasets.
pub fn run_raster(config: &RasterConfig) -> Result<()> {
    let label = dataset::build_label(config.label)?;
    let image = dataset::build_image(&config.image)?;

    write_dataset(&config.image_output, &image)?;
    write_dataset(&config.label_output, &label)?;
    Ok(())
}
