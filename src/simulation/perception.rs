//! What a bird sees: its height and its distance to the next gap's edges.

use ndarray::Array1;

use super::bird::Bird;
use super::pipe::Pipe;

/// Number of values in an observation.
pub const OBSERVATION_SIZE: usize = 3;

/// Builds the observation `(y, |y - gap_top|, |y - gap_bottom|)`.
pub fn observe(bird: &Bird, pipe: &Pipe) -> Array1<f32> {
    Array1::from_vec(vec![
        bird.y,
        (bird.y - pipe.height as f32).abs(),
        (bird.y - pipe.bottom).abs(),
    ])
}

/// Index of the pipe the cohort should aim for.
///
/// Once the lead bird is past the front pipe's right edge, the second pipe
/// becomes the target. Callers freeze this at the start of a tick.
pub fn next_pipe_index(lead: &Bird, pipes: &[Pipe]) -> usize {
    match pipes {
        [front, _, ..] if lead.x > front.right() => 1,
        _ => 0,
    }
}
