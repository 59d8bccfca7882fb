use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::{dsigmoid, sigmoid};
use crate::error::{NnError, NnResult};
use crate::math::init;

/// One stage of a fully connected sigmoid network.
///
/// The input layer only carries its `size`; every later layer holds one weight
/// row and one bias per neuron, where `weights[j][i]` connects input unit `i`
/// to neuron `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub size: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub biases: Vec<f64>,
}

impl Layer {
    pub fn input(size: usize) -> Layer {
        Layer { size, weights: Vec::new(), biases: Vec::new() }
    }

    pub fn random<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        Layer {
            size,
            weights: init::weights(size, input_size, rng),
            biases: init::biases(size, rng),
        }
    }

    pub fn from_parts(size: usize, weights: Vec<Vec<f64>>, biases: Vec<f64>) -> Layer {
        Layer { size, weights, biases }
    }

    pub fn is_input(&self) -> bool {
        self.weights.is_empty() && self.biases.is_empty()
    }

    /// Checks this computation layer against the size of the layer feeding it.
    pub(crate) fn validate(&self, index: usize, input_size: usize) -> NnResult<()> {
        if self.size == 0 {
            return Err(NnError::InvalidConfig(format!("layer {index} has size 0")));
        }
        if self.biases.len() != self.size {
            return Err(NnError::shape(
                format!("layer {index} biases"),
                self.size,
                self.biases.len(),
            ));
        }
        if self.weights.len() != self.size {
            return Err(NnError::shape(
                format!("layer {index} weight rows"),
                self.size,
                self.weights.len(),
            ));
        }
        for (j, row) in self.weights.iter().enumerate() {
            if row.len() != input_size {
                return Err(NnError::shape(
                    format!("layer {index} weight row {j}"),
                    input_size,
                    row.len(),
                ));
            }
        }
        Ok(())
    }

    /// `sigmoid(b_j + Σ_i w_ji · x_i)` for every neuron `j`.
    pub fn feed_from(&self, input: &[f64]) -> Vec<f64> {
        debug_assert!(self.weights.iter().all(|row| row.len() == input.len()));
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                let sum = row.iter().zip(input).fold(*bias, |acc, (w, x)| acc + w * x);
                sigmoid(sum)
            })
            .collect()
    }

    /// Error signal this layer sends to the layer below it:
    /// `dsigmoid(a_i) · Σ_j w_ji · δ_j`, where `below` holds the lower layer's activations.
    pub fn backpropagate(&self, delta: &[f64], below: &[f64]) -> Vec<f64> {
        below
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                let error: f64 = self.weights.iter().zip(delta).map(|(row, d)| row[i] * d).sum();
                error * dsigmoid(a)
            })
            .collect()
    }

    /// Plain gradient step: `w_ji += lr · δ_j · x_i`, `b_j += lr · δ_j`.
    pub fn apply_delta(&mut self, delta: &[f64], input: &[f64], lr: f64) {
        for ((row, bias), d) in self.weights.iter_mut().zip(self.biases.iter_mut()).zip(delta) {
            let step = lr * d;
            for (w, x) in row.iter_mut().zip(input) {
                *w += step * x;
            }
            *bias += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_layer_has_consistent_shape() {
        let layer = Layer::random(3, 4, &mut StdRng::seed_from_u64(1));
        assert_eq!(layer.size, 3);
        assert_eq!(layer.biases.len(), 3);
        assert!(layer.weights.iter().all(|row| row.len() == 4));
        assert!(layer.validate(1, 4).is_ok());
        assert!(!layer.is_input());
    }

    #[test]
    fn validate_reports_bad_row() {
        let layer = Layer::from_parts(2, vec![vec![0.0, 0.0], vec![0.0]], vec![0.0, 0.0]);
        match layer.validate(1, 2) {
            Err(NnError::ShapeMismatch { expected, got, .. }) => {
                assert_eq!((expected, got), (2, 1));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn feed_from_applies_sigmoid_to_weighted_sum() {
        let layer = Layer::from_parts(1, vec![vec![1.0, -2.0]], vec![0.5]);
        let out = layer.feed_from(&[2.0, 1.0]);
        assert!((out[0] - sigmoid(0.5)).abs() < 1e-12);
    }

    #[test]
    fn apply_delta_moves_weights_along_input() {
        let mut layer = Layer::from_parts(1, vec![vec![0.0, 0.0]], vec![0.0]);
        layer.apply_delta(&[2.0], &[1.0, 0.5], 0.1);
        assert!((layer.weights[0][0] - 0.2).abs() < 1e-12);
        assert!((layer.weights[0][1] - 0.1).abs() < 1e-12);
        assert!((layer.biases[0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn input_layer_serializes_size_only() {
        let json = serde_json::to_string(&Layer::input(4)).unwrap();
        assert_eq!(json, r#"{"size":4}"#);
        let back: Layer = serde_json::from_str(&json).unwrap();
        assert!(back.is_input());
    }
}
