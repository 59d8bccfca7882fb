use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::dsigmoid;
use crate::error::{NnError, NnResult};
use crate::layers::dense::Layer;

/// Per-layer outputs of a forward pass; index 0 is the raw input.
#[derive(Debug, Clone, PartialEq)]
pub struct Activations(Vec<Vec<f64>>);

impl Activations {
    pub fn layer(&self, index: usize) -> &[f64] {
        &self.0[index]
    }

    pub fn output(&self) -> &[f64] {
        self.0.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_output(mut self) -> Vec<f64> {
        self.0.pop().unwrap_or_default()
    }
}

/// A fully connected sigmoid network.
///
/// Construct it through [`Network::random`] or [`Network::from_layers`]; both
/// check the layer shapes once so the forward and backward passes can run
/// without bounds bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    layers: Vec<Layer>,
}

/// Serialized form of a [`Network`] before its shapes are checked.
#[derive(Deserialize)]
struct RawNetwork {
    layers: Vec<Layer>,
}

impl TryFrom<RawNetwork> for Network {
    type Error = NnError;

    fn try_from(raw: RawNetwork) -> NnResult<Network> {
        Network::from_layers(raw.layers)
    }
}

impl Network {
    /// Builds a randomly initialised network from layer sizes, input layer first.
    pub fn random<R: Rng + ?Sized>(sizes: &[usize], rng: &mut R) -> NnResult<Network> {
        let Some(&input_size) = sizes.first() else {
            return Err(NnError::InvalidConfig("a network needs at least two layers".into()));
        };
        let mut layers = vec![Layer::input(input_size)];
        for pair in sizes.windows(2) {
            layers.push(Layer::random(pair[1], pair[0], rng));
        }
        Network::from_layers(layers)
    }

    /// Wraps pre-built layers after checking every shape invariant.
    pub fn from_layers(layers: Vec<Layer>) -> NnResult<Network> {
        if layers.len() < 2 {
            return Err(NnError::InvalidConfig(format!(
                "a network needs at least two layers, got {}",
                layers.len()
            )));
        }
        let input = &layers[0];
        if input.size == 0 {
            return Err(NnError::InvalidConfig("input layer has size 0".into()));
        }
        if !input.is_input() {
            return Err(NnError::InvalidConfig(
                "input layer must not carry weights or biases".into(),
            ));
        }
        for (index, pair) in layers.windows(2).enumerate() {
            pair[1].validate(index + 1, pair[0].size)?;
        }
        Ok(Network { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(|l| l.size).collect()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].size
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].size
    }

    /// Rejects an example whose input or target length does not fit this network.
    pub fn check_shapes(&self, input: &[f64], target: &[f64]) -> NnResult<()> {
        if input.len() != self.input_size() {
            return Err(NnError::shape("example input", self.input_size(), input.len()));
        }
        if target.len() != self.output_size() {
            return Err(NnError::shape("example target", self.output_size(), target.len()));
        }
        Ok(())
    }

    /// Forward pass. Does not touch the weights.
    pub fn forward(&self, input: &[f64]) -> Activations {
        let mut activations = Vec::with_capacity(self.layers.len());
        activations.push(input.to_vec());
        for layer in &self.layers[1..] {
            let next = layer.feed_from(&activations[activations.len() - 1]);
            activations.push(next);
        }
        Activations(activations)
    }

    /// Output of the last layer for `input`.
    pub fn predict(&self, input: &[f64]) -> Vec<f64> {
        self.forward(input).into_output()
    }

    /// One online backpropagation update towards `target`.
    ///
    /// All deltas are computed from the pre-update weights before any layer
    /// changes. Returns the output seen before the update.
    pub fn train_step(&mut self, input: &[f64], target: &[f64], lr: f64) -> Vec<f64> {
        let activations = self.forward(input);
        let deltas = self.deltas(&activations, target);

        for (index, delta) in deltas.iter().enumerate() {
            let below = activations.layer(index);
            self.layers[index + 1].apply_delta(delta, below, lr);
        }

        activations.into_output()
    }

    /// Deltas for layers `1..=L`, in layer order.
    fn deltas(&self, activations: &Activations, target: &[f64]) -> Vec<Vec<f64>> {
        let last = self.layers.len() - 1;
        let mut delta: Vec<f64> = activations
            .output()
            .iter()
            .zip(target)
            .map(|(&out, &t)| (t - out) * dsigmoid(out))
            .collect();

        let mut deltas = Vec::with_capacity(last);
        for l in (1..last).rev() {
            let lower = self.layers[l + 1].backpropagate(&delta, activations.layer(l));
            deltas.push(std::mem::replace(&mut delta, lower));
        }
        deltas.push(delta);
        deltas.reverse();
        deltas
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> NnResult<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        debug!("saved network {:?} to {}", self.layer_sizes(), path.display());
        Ok(())
    }

    /// Deserializes a network written by `save_json`, re-checking its shapes.
    pub fn load_json(path: impl AsRef<Path>) -> NnResult<Network> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let raw: RawNetwork = serde_json::from_reader(reader)?;
        Network::try_from(raw)
    }
}
