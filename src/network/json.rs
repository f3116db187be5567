use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::error::Result;
use crate::network::network::{Connection, Layer, Network, Neuron};
use crate::network::real;

const INDENT: &[u8] = b"    ";

/// Writes `network` as four-space-indented JSON:
/// `{ "layers": [ { "neurons": [ { "bias", "connections": [ { "target", "weight" } ] } ] } ] }`.
///
/// Finite reals use shortest round-trip formatting, so every bias and weight
/// reads back bit-for-bit. NaN and the infinities are written as the bare
/// tokens `NaN`, `Infinity` and `-Infinity`.
pub fn to_json_writer<W: Write>(network: &Network, writer: W) -> Result<()> {
    let mut json = JsonWriter { writer, fmt: PrettyFormatter::with_indent(INDENT) };
    json.network(network)?;
    Ok(())
}

pub fn to_json(network: &Network) -> Result<String> {
    let mut buf = Vec::new();
    to_json_writer(network, &mut buf)?;
    // Only ASCII is ever written.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Parses the JSON shape produced by [`to_json`], non-finite tokens included.
pub fn from_json(text: &str) -> Result<Network> {
    let text = real::quote_non_finite(text);
    Ok(serde_json::from_str(&text)?)
}

/// Walks the tree with serde_json's pretty formatter. serde's own `f64`
/// serialization turns non-finite values into `null`, so reals are written
/// here instead.
struct JsonWriter<W> {
    writer: W,
    fmt: PrettyFormatter<'static>,
}

impl<W: Write> JsonWriter<W> {
    fn network(&mut self, network: &Network) -> io::Result<()> {
        self.fmt.begin_object(&mut self.writer)?;
        self.key("layers", true)?;
        self.array(&network.layers, Self::layer)?;
        self.fmt.end_object_value(&mut self.writer)?;
        self.fmt.end_object(&mut self.writer)
    }

    fn layer(&mut self, layer: &Layer) -> io::Result<()> {
        self.fmt.begin_object(&mut self.writer)?;
        self.key("neurons", true)?;
        self.array(&layer.neurons, Self::neuron)?;
        self.fmt.end_object_value(&mut self.writer)?;
        self.fmt.end_object(&mut self.writer)
    }

    fn neuron(&mut self, neuron: &Neuron) -> io::Result<()> {
        self.fmt.begin_object(&mut self.writer)?;
        self.key("bias", true)?;
        self.real(neuron.bias)?;
        self.fmt.end_object_value(&mut self.writer)?;
        self.key("connections", false)?;
        self.array(&neuron.connections, Self::connection)?;
        self.fmt.end_object_value(&mut self.writer)?;
        self.fmt.end_object(&mut self.writer)
    }

    fn connection(&mut self, connection: &Connection) -> io::Result<()> {
        self.fmt.begin_object(&mut self.writer)?;
        self.key("target", true)?;
        self.fmt.write_u64(&mut self.writer, connection.target)?;
        self.fmt.end_object_value(&mut self.writer)?;
        self.key("weight", false)?;
        self.real(connection.weight)?;
        self.fmt.end_object_value(&mut self.writer)?;
        self.fmt.end_object(&mut self.writer)
    }

    /// Writes `"name": `. Keys are plain ASCII, no escaping needed.
    fn key(&mut self, name: &str, first: bool) -> io::Result<()> {
        self.fmt.begin_object_key(&mut self.writer, first)?;
        self.fmt.begin_string(&mut self.writer)?;
        self.fmt.write_string_fragment(&mut self.writer, name)?;
        self.fmt.end_string(&mut self.writer)?;
        self.fmt.end_object_key(&mut self.writer)?;
        self.fmt.begin_object_value(&mut self.writer)
    }

    fn array<T>(
        &mut self,
        items: &[T],
        mut item: impl FnMut(&mut Self, &T) -> io::Result<()>,
    ) -> io::Result<()> {
        self.fmt.begin_array(&mut self.writer)?;
        for (i, value) in items.iter().enumerate() {
            self.fmt.begin_array_value(&mut self.writer, i == 0)?;
            item(self, value)?;
            self.fmt.end_array_value(&mut self.writer)?;
        }
        self.fmt.end_array(&mut self.writer)
    }

    fn real(&mut self, value: f64) -> io::Result<()> {
        match real::non_finite_token(value) {
            Some(token) => self.writer.write_all(token.as_bytes()),
            None => self.fmt.write_f64(&mut self.writer, value),
        }
    }
}

impl Network {
    /// Serializes the network to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        to_json_writer(self, &mut writer)?;
        writer.flush()?;
        info!("wrote network JSON to {}", path.display());
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        from_json(&fs::read_to_string(path)?)
    }
}
