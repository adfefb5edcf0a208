#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::brain::Brain;
use flappy_evo::simulation::controller::Controller;
use flappy_evo::simulation::error::SimulationError;
use flappy_evo::simulation::evolution::{
    self, EvolutionConfig, Population, generation_seed, rank,
};
use flappy_evo::simulation::game::Game;
use flappy_evo::simulation::params::Params;
use ndarray::array;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn small_config() -> EvolutionConfig {
    EvolutionConfig {
        population_size: 6,
        max_generations: 3,
        fitness_threshold: None,
        seed: 3,
        ..EvolutionConfig::default()
    }
}

fn limited_params() -> Params {
    Params {
        max_ticks: Some(300),
        ..Params::default()
    }
}

#[test]
fn test_brain_shape() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let brain = Brain::new(&[3, 6, 1], 1.0, &mut rng);

    assert_eq!(brain.layers.len(), 2);
    assert_eq!(brain.layers[0].weights.dim(), (6, 3));
    assert_eq!(brain.layers[1].weights.dim(), (1, 6));
    assert_eq!(brain.parameter_count(), 3 * 6 + 6 + 6 + 1);
}

#[test]
fn test_brain_output_is_bounded() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let brain = Brain::new(&[3, 6, 1], 1.0, &mut rng);

    for input in [array![0.0, 0.0, 0.0], array![350.0, 100.0, 100.0], array![-5.0, 3.0, 700.0]] {
        let output = brain.activate(&input);
        assert_eq!(output.len(), 1);
        assert!((-1.0_f32..=1.0).contains(&output[0]));
    }
}

#[test]
fn test_mutation_changes_weights() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let original = Brain::new(&[3, 6, 1], 1.0, &mut rng);

    let mut untouched = original.clone();
    untouched.mutate(0.0, &mut rng);
    assert_eq!(untouched, original);

    let mut mutated = original.clone();
    mutated.mutate(0.1, &mut rng);
    assert_ne!(mutated, original);
    for (a, b) in mutated.layers[0].weights.iter().zip(&original.layers[0].weights) {
        assert!((a - b).abs() <= 0.1 + 1e-6);
    }
}

#[test]
fn test_crossover_weight_selects_parent() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let a = Brain::new(&[3, 4, 1], 1.0, &mut rng);
    let b = Brain::new(&[3, 4, 1], 1.0, &mut rng);

    assert_eq!(Brain::crossover_weighted(&a, &b, 1.0), a);
    assert_eq!(Brain::crossover_weighted(&a, &b, 0.0), b);

    let mixed = Brain::crossover_weighted(&a, &b, 0.5);
    let expected = (a.layers[0].weights[[0, 0]] + b.layers[0].weights[[0, 0]]) / 2.0;
    assert!((mixed.layers[0].weights[[0, 0]] - expected).abs() < 1e-6);
}

#[test]
fn test_brains_fly_in_a_game() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let brains: Vec<Brain> = (0..4).map(|_| Brain::new(&[3, 6, 1], 1.0, &mut rng)).collect();

    let mut game = Game::new(limited_params(), brains, 11).unwrap();
    let outcome = game.run();

    assert_eq!(outcome.results.len(), 4);
    assert!(outcome.ticks <= 300);
}

#[test]
fn test_rank_orders_best_first() {
    assert_eq!(rank(&[1.0, 3.0, 3.0, 2.0]), vec![1, 2, 3, 0]);
    assert_eq!(rank(&[-1.0, -0.5]), vec![1, 0]);
    let empty: [f32; 0] = [];
    assert!(rank(&empty).is_empty());
}

#[test]
fn test_evolve_keeps_size_and_elites() {
    let config = EvolutionConfig {
        population_size: 10,
        ..EvolutionConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut population = Population::new(&config, &mut rng).unwrap();
    let before = population.brains.clone();
    let fitness: Vec<f32> = (0..10).map(|i| i as f32).collect();

    population.evolve(&fitness, &config, &mut rng).unwrap();

    assert_eq!(population.brains.len(), 10);
    assert_eq!(population.generation, 1);
    assert_eq!(population.brains[0], before[9]);
    assert_eq!(population.brains[1], before[8]);
    for brain in &population.brains {
        assert_eq!(brain.parameter_count(), before[0].parameter_count());
    }
}

#[test]
fn test_evolve_rejects_mismatched_fitness() {
    let config = small_config();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut population = Population::new(&config, &mut rng).unwrap();

    let result = population.evolve(&[1.0, 2.0], &config, &mut rng);

    assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
    assert_eq!(population.generation, 0);
}

#[test]
fn test_config_validation() {
    assert!(EvolutionConfig::default().validate().is_ok());

    let bad = [
        EvolutionConfig {
            population_size: 0,
            ..EvolutionConfig::default()
        },
        EvolutionConfig {
            elite_count: 100,
            ..EvolutionConfig::default()
        },
        EvolutionConfig {
            layer_sizes: vec![4, 6, 1],
            ..EvolutionConfig::default()
        },
        EvolutionConfig {
            min_mutation_scale: 0.5,
            max_mutation_scale: 0.1,
            ..EvolutionConfig::default()
        },
        EvolutionConfig {
            parent_fraction: 0.0,
            ..EvolutionConfig::default()
        },
        EvolutionConfig {
            weight_scale: f32::INFINITY,
            ..EvolutionConfig::default()
        },
        EvolutionConfig {
            weight_scale: f32::NAN,
            ..EvolutionConfig::default()
        },
        EvolutionConfig {
            max_mutation_scale: f32::INFINITY,
            ..EvolutionConfig::default()
        },
    ];
    for config in bad {
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_generation_seeds_differ() {
    assert_eq!(generation_seed(9, 0), 9);
    assert_ne!(generation_seed(9, 1), generation_seed(9, 2));
}

#[test]
fn test_run_reports_every_generation() {
    let evolution = evolution::run(&limited_params(), &small_config()).unwrap();
    let report = &evolution.report;

    assert_eq!(report.generations.len(), 3);
    assert!(!report.solved);
    for (i, stats) in report.generations.iter().enumerate() {
        assert_eq!(stats.generation, i as u32);
        assert!(stats.ticks <= 300);
        assert!(stats.best_fitness + 1e-3 >= stats.mean_fitness);
        assert!(stats.champion < 6);
    }
    assert_eq!(evolution.champion.parameter_count(), 31);
}

#[test]
fn test_run_is_deterministic() {
    let first = evolution::run(&limited_params(), &small_config()).unwrap();
    let second = evolution::run(&limited_params(), &small_config()).unwrap();

    assert_eq!(first.report, second.report);
    assert_eq!(first.champion, second.champion);
}

#[test]
fn test_run_stops_at_threshold() {
    let config = EvolutionConfig {
        fitness_threshold: Some(-100.0),
        max_generations: 10,
        ..small_config()
    };

    let evolution = evolution::run(&limited_params(), &config).unwrap();

    assert_eq!(evolution.report.generations.len(), 1);
    assert!(evolution.report.solved);
}

#[test]
fn test_run_requires_tick_limit() {
    let result = evolution::run(&Params::default(), &small_config());

    assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
}
