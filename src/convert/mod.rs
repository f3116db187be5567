pub mod config;
pub mod runner;

pub use config::{ArchiveConfig, NetworkConfig, NetworkDirection, RasterConfig};
pub use runner::{run_archive, run_network, run_raster};
