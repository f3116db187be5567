pub mod binary;
pub mod json;
pub mod network;
pub mod real;

pub use binary::{decode, encode_binary, read_network, write_network};
pub use json::{from_json, to_json, to_json_writer};
pub use network::{Connection, Layer, Network, Neuron};
