use serde::Deserialize;

use crate::network::real;

/// A weighted edge from a neuron to the neuron at index `target`.
///
/// `target` is stored exactly as read; nothing checks that it names an
/// existing neuron.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Connection {
    pub target: u64,
    #[serde(deserialize_with = "real::deserialize")]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Neuron {
    #[serde(deserialize_with = "real::deserialize")]
    pub bias: f64,
    pub connections: Vec<Connection>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
}

/// Decoded topology of a spaghetti-neurons network: layers of neurons, each
/// with a bias and an ordered list of outgoing connections.
///
/// JSON output goes through [`crate::network::json`], which keeps non-finite
/// reals; deserializing accepts that output.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    pub fn new(layers: Vec<Layer>) -> Network {
        Network { layers }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Total neurons across all layers.
    pub fn neuron_count(&self) -> usize {
        self.layers.iter().map(|l| l.neurons.len()).sum()
    }

    /// Total connections across all neurons.
    pub fn connection_count(&self) -> usize {
        self.neurons().map(|n| n.connections.len()).sum()
    }

    /// Iterates every neuron, layer by layer.
    pub fn neurons(&self) -> impl Iterator<Item = &Neuron> {
        self.layers.iter().flat_map(|l| l.neurons.iter())
    }
}
