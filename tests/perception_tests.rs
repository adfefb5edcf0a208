#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::bird::Bird;
use flappy_evo::simulation::controller::{Controller, wants_jump};
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::perception::{OBSERVATION_SIZE, next_pipe_index, observe};
use flappy_evo::simulation::pipe::Pipe;
use ndarray::{Array1, array};

#[test]
fn test_observation_measures_distance_to_gap_edges() {
    let params = Params::default();
    let bird = Bird::new(230.0, 300.0, Default::default());
    let pipe = Pipe::new(600.0, 250, &params);

    let observation = observe(&bird, &pipe);

    assert_eq!(observation.len(), OBSERVATION_SIZE);
    assert_eq!(observation, array![300.0_f32, 50.0, 150.0]);
}

#[test]
fn test_observation_uses_absolute_distances() {
    let params = Params::default();
    let bird = Bird::new(230.0, 100.0, Default::default());
    let pipe = Pipe::new(600.0, 250, &params);

    let observation = observe(&bird, &pipe);

    assert_eq!(observation, array![100.0_f32, 150.0, 350.0]);
}

#[test]
fn test_front_pipe_is_the_target_until_cleared() {
    let params = Params::default();
    let bird = Bird::at_start(&params);

    let front = Pipe::new(200.0, 200, &params);
    let back = Pipe::new(600.0, 300, &params);
    assert_eq!(next_pipe_index(&bird, &[front.clone(), back.clone()]), 0);

    // Right edge at 226: the bird at x = 230 is past it.
    let cleared = Pipe::new(122.0, 200, &params);
    assert_eq!(next_pipe_index(&bird, &[cleared.clone(), back]), 1);

    // Without a second pipe the front stays the target.
    assert_eq!(next_pipe_index(&bird, &[cleared]), 0);
}

#[test]
fn test_jump_decision_reads_first_output_only() {
    assert!(wants_jump(&array![0.6], 0.5));
    assert!(!wants_jump(&array![0.5], 0.5));
    assert!(!wants_jump(&array![0.1, 0.9], 0.5));
    assert!(wants_jump(&array![0.9, -1.0], 0.5));
    assert!(!wants_jump(&Array1::zeros(0), 0.5));
}

#[test]
fn test_closures_are_controllers() {
    let doubler = |inputs: &Array1<f32>| inputs * 2.0_f32;

    let outputs = doubler.activate(&array![1.0, 2.0, 3.0]);

    assert_eq!(outputs, array![2.0_f32, 4.0, 6.0]);
}
