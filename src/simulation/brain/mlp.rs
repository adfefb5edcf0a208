//! Multi-layer perceptron implementation.

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single layer of a multi-layer perceptron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mlp {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
}

impl Mlp {
    /// Creates a new layer with weights and biases uniform in `[-scale, scale)`.
    pub fn new_random<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        scale: f32,
        rng: &mut R,
    ) -> Self {
        Self {
            weights: Array2::from_shape_fn((output_size, input_size), |_| {
                rng.random_range(-scale..scale)
            }),
            biases: Array1::from_shape_fn(output_size, |_| rng.random_range(-scale..scale)),
        }
    }

    /// Performs forward pass with tanh activation.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;

        output.mapv_inplace(f32::tanh);
        output
    }

    /// Mutates weights and biases by adding uniform noise in `[-scale, scale)`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, mutation_scale: f32, rng: &mut R) {
        if mutation_scale <= 0.0 {
            return;
        }
        self.weights
            .mapv_inplace(|w| w + rng.random_range(-mutation_scale..mutation_scale));
        self.biases
            .mapv_inplace(|b| b + rng.random_range(-mutation_scale..mutation_scale));
    }

    /// Creates a new layer by weighted averaging two parent layers.
    pub fn crossover_weighted(parent1: &Mlp, parent2: &Mlp, weight1: f32) -> Self {
        let weight2 = 1.0 - weight1;
        Self {
            weights: &parent1.weights * weight1 + &parent2.weights * weight2,
            biases: &parent1.biases * weight1 + &parent2.biases * weight2,
        }
    }

    /// Number of trainable parameters in this layer.
    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }
}
