//! Neural network implementation for bird controllers.
//!
//! A fixed-topology multi-layer perceptron with tanh activation, plus the
//! genetic operators (mutation and crossover) used by the evolution driver.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::controller::Controller;

pub mod mlp;

pub use mlp::Mlp;

/// Feed-forward network that decides when a bird jumps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Mlp>,
}

impl Brain {
    /// Creates a new MLP brain with random weights in `[-scale, scale)`.
    ///
    /// `layer_sizes` lists the width of every layer including input and
    /// output, so it needs at least two entries.
    pub fn new<R: Rng + ?Sized>(layer_sizes: &[usize], scale: f32, rng: &mut R) -> Self {
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Mlp::new_random(pair[0], pair[1], scale, rng))
            .collect();

        Brain { layers }
    }

    /// Runs a forward pass through the brain.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        output
    }

    /// Creates a new brain by weighted averaging two parent brains.
    /// `weight1` is the weight for `parent1`; `parent2` gets `1 - weight1`.
    pub fn crossover_weighted(parent1: &Brain, parent2: &Brain, weight1: f32) -> Self {
        let layers = parent1
            .layers
            .iter()
            .zip(&parent2.layers)
            .map(|(layer1, layer2)| Mlp::crossover_weighted(layer1, layer2, weight1))
            .collect();
        Brain { layers }
    }

    /// Mutates all parameters in the brain.
    pub fn mutate<R: Rng + ?Sized>(&mut self, mutation_scale: f32, rng: &mut R) {
        for layer in &mut self.layers {
            layer.mutate(mutation_scale, rng);
        }
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Mlp::parameter_count).sum()
    }
}

impl Controller for Brain {
    fn activate(&self, inputs: &Array1<f32>) -> Array1<f32> {
        self.think(inputs)
    }
}
