pub mod codec;
pub mod convert;
pub mod dataset;
pub mod error;
pub mod network;

// Convenience re-exports
pub use convert::{ArchiveConfig, NetworkConfig, NetworkDirection, RasterConfig};
pub use dataset::{ImageArchive, LabelArchive, PixelLayout, Samples};
pub use error::{ConvertError, ErrorKind, Result};
pub use network::{Connection, Layer, Network, Neuron};
