//! Decision-making interface supplied per bird by the learning process.

use ndarray::Array1;

/// Maps an observation vector to a decision vector.
///
/// The game only reads the first output component and compares it with the
/// configured jump threshold. Implementations must be pure: the same input
/// always yields the same output.
pub trait Controller {
    /// Evaluates the controller for one observation.
    fn activate(&self, inputs: &Array1<f32>) -> Array1<f32>;
}

impl<F> Controller for F
where
    F: Fn(&Array1<f32>) -> Array1<f32>,
{
    fn activate(&self, inputs: &Array1<f32>) -> Array1<f32> {
        self(inputs)
    }
}

/// Returns true when the controller's first output exceeds `threshold`.
///
/// An empty output never jumps.
pub fn wants_jump(outputs: &Array1<f32>, threshold: f32) -> bool {
    outputs.first().is_some_and(|&value| value > threshold)
}
