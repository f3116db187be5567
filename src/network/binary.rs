//! The `.sn` network binary.
//!
//! # Layout (little-endian)
//! ```text
//! u64 layer_count
//!   repeat layer_count:
//!     u64 neuron_count
//!     repeat neuron_count:
//!       f64 bias
//!       u64 connection_count
//!       repeat connection_count:
//!         u64 target
//!         f64 weight
//! ```
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::codec::ByteReader;
use crate::error::Result;
use crate::network::network::{Connection, Layer, Network, Neuron};

/// Smallest possible encoding of one layer: an empty neuron count.
const MIN_LAYER_BYTES: usize = 8;
/// Smallest possible encoding of one neuron: bias plus an empty connection count.
const MIN_NEURON_BYTES: usize = 16;
/// Exact encoding of one connection: target plus weight.
const CONNECTION_BYTES: usize = 16;

/// Decodes a network binary.
///
/// Every count is checked against the bytes that remain, so truncated or
/// corrupt input fails with an `UnexpectedEof` I/O error instead of reading
/// garbage. Bytes after the last layer are ignored.
pub fn decode(bytes: &[u8]) -> Result<Network> {
    let mut reader = ByteReader::new(bytes);

    let layer_count = reader.read_count("layer count", MIN_LAYER_BYTES)?;
    let mut layers = Vec::with_capacity(layer_count);

    for _ in 0..layer_count {
        let neuron_count = reader.read_count("neuron count", MIN_NEURON_BYTES)?;
        let mut neurons = Vec::with_capacity(neuron_count);

        for _ in 0..neuron_count {
            let bias = reader.read_f64_le("bias")?;
            let connection_count = reader.read_count("connection count", CONNECTION_BYTES)?;
            let mut connections = Vec::with_capacity(connection_count);

            for _ in 0..connection_count {
                let target = reader.read_u64_le("connection target")?;
                let weight = reader.read_f64_le("connection weight")?;
                connections.push(Connection { target, weight });
            }

            neurons.push(Neuron { bias, connections });
        }

        layers.push(Layer { neurons });
    }

    if reader.remaining() > 0 {
        warn!(
            "ignoring {} trailing bytes after offset {}",
            reader.remaining(),
            reader.position()
        );
    }

    Ok(Network { layers })
}

/// Encodes a network as the exact inverse of [`decode`].
pub fn encode_binary(network: &Network) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(network));

    out.extend_from_slice(&(network.layers.len() as u64).to_le_bytes());
    for layer in &network.layers {
        out.extend_from_slice(&(layer.neurons.len() as u64).to_le_bytes());
        for neuron in &layer.neurons {
            out.extend_from_slice(&neuron.bias.to_le_bytes());
            out.extend_from_slice(&(neuron.connections.len() as u64).to_le_bytes());
            for connection in &neuron.connections {
                out.extend_from_slice(&connection.target.to_le_bytes());
                out.extend_from_slice(&connection.weight.to_le_bytes());
            }
        }
    }

    out
}

fn encoded_len(network: &Network) -> usize {
    8 + network.layer_count() * MIN_LAYER_BYTES
        + network.neuron_count() * MIN_NEURON_BYTES
        + network.connection_count() * CONNECTION_BYTES
}

/// Reads and decodes a network binary file.
pub fn read_network(path: impl AsRef<Path>) -> Result<Network> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());

    let network = decode(&bytes)?;
    info!(
        "decoded {}: {} layers, {} neurons, {} connections",
        path.display(),
        network.layer_count(),
        network.neuron_count(),
        network.connection_count()
    );
    Ok(network)
}

/// Encodes `network` and writes it to `path`, replacing any existing file.
pub fn write_network(path: impl AsRef<Path>, network: &Network) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_binary(network);
    fs::write(path, &bytes)?;
    info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
