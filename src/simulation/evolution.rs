//! Generation-over-generation evolution of bird brains.
//!
//! Each generation flies one [`Game`] with a clone of every brain. Fitness
//! from that game ranks the population; the best brains survive unchanged and
//! the rest of the next generation is bred from the top of the ranking by
//! weighted crossover followed by mutation.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::brain::Brain;
use super::error::SimulationError;
use super::game::{Game, GenerationOutcome};
use super::params::Params;
use super::perception::OBSERVATION_SIZE;
use super::sprites::Sprites;

/// Multiplier used to derive per-generation game seeds from the run seed.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Settings for the evolution driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Brains per generation.
    pub population_size: usize,
    /// Upper bound on generations.
    pub max_generations: u32,
    /// Stop as soon as the best fitness of a generation reaches this value.
    pub fitness_threshold: Option<f32>,
    /// Best brains copied unchanged into the next generation.
    pub elite_count: usize,
    /// Fraction of the ranking eligible as parents.
    pub parent_fraction: f32,
    /// Lower bound of the log-uniform mutation scale.
    pub min_mutation_scale: f32,
    /// Upper bound of the log-uniform mutation scale.
    pub max_mutation_scale: f32,
    /// Initial weights are uniform in `[-weight_scale, weight_scale)`.
    pub weight_scale: f32,
    /// Layer widths from input to output. The input must match the observation.
    pub layer_sizes: Vec<usize>,
    /// Seed for brains, breeding and pipe courses.
    pub seed: u64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 50,
            fitness_threshold: Some(100.0),
            elite_count: 2,
            parent_fraction: 0.2,
            min_mutation_scale: 0.002,
            max_mutation_scale: 0.2,
            weight_scale: 1.0,
            layer_sizes: vec![OBSERVATION_SIZE, 6, 1],
            seed: 0,
        }
    }
}

impl EvolutionConfig {
    /// Checks population and generation parameters.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.population_size == 0 {
            return Err(SimulationError::InvalidConfig(
                "population_size must be positive",
            ));
        }
        if self.max_generations == 0 {
            return Err(SimulationError::InvalidConfig(
                "max_generations must be positive",
            ));
        }
        if self.elite_count > self.population_size {
            return Err(SimulationError::InvalidConfig(
                "elite_count cannot exceed population_size",
            ));
        }
        if !(self.parent_fraction > 0.0 && self.parent_fraction <= 1.0) {
            return Err(SimulationError::InvalidConfig(
                "parent_fraction must be in (0, 1]",
            ));
        }
        if !(self.min_mutation_scale > 0.0
            && self.min_mutation_scale <= self.max_mutation_scale
            && self.max_mutation_scale.is_finite())
        {
            return Err(SimulationError::InvalidConfig(
                "mutation scales must be finite and satisfy 0 < min <= max",
            ));
        }
        if !(self.weight_scale > 0.0 && self.weight_scale.is_finite()) {
            return Err(SimulationError::InvalidConfig(
                "weight_scale must be positive and finite",
            ));
        }
        if self.layer_sizes.len() < 2 || self.layer_sizes.contains(&0) {
            return Err(SimulationError::InvalidConfig(
                "layer_sizes needs at least two non-zero layers",
            ));
        }
        if self.layer_sizes[0] != OBSERVATION_SIZE {
            return Err(SimulationError::InvalidConfig(
                "the first layer must match the observation size",
            ));
        }
        if self.fitness_threshold.is_some_and(|t| !t.is_finite()) {
            return Err(SimulationError::InvalidConfig(
                "fitness_threshold must be finite",
            ));
        }
        Ok(())
    }
}

/// The brains of one generation.
#[derive(Debug, Clone)]
pub struct Population {
    /// One brain per contestant; index `i` flies contestant `i`.
    pub brains: Vec<Brain>,
    /// Zero-based generation number.
    pub generation: u32,
}

impl Population {
    /// Creates `population_size` random brains.
    pub fn new<R: Rng + ?Sized>(
        config: &EvolutionConfig,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let brains = (0..config.population_size)
            .map(|_| Brain::new(&config.layer_sizes, config.weight_scale, rng))
            .collect();
        Ok(Self {
            brains,
            generation: 0,
        })
    }

    /// Flies one game with every brain and returns the per-brain results.
    pub fn evaluate(
        &self,
        params: &Params,
        sprites: &Sprites,
        seed: u64,
    ) -> Result<GenerationOutcome, SimulationError> {
        let mut game = Game::with_sprites(
            params.clone(),
            sprites.clone(),
            self.brains.iter().cloned(),
            seed,
        )?;
        Ok(game.run())
    }

    /// Replaces the population with the next generation.
    ///
    /// `fitness[i]` must be the fitness of `brains[i]`.
    pub fn evolve<R: Rng + ?Sized>(
        &mut self,
        fitness: &[f32],
        config: &EvolutionConfig,
        rng: &mut R,
    ) -> Result<(), SimulationError> {
        if fitness.len() != self.brains.len() {
            return Err(SimulationError::InvalidConfig(
                "fitness must have one value per brain",
            ));
        }

        let ranked = rank(fitness);
        let size = self.brains.len();
        let parents = ((size as f32 * config.parent_fraction).ceil() as usize).clamp(1, size);

        let mut next: Vec<Brain> = ranked
            .iter()
            .take(config.elite_count)
            .map(|&i| self.brains[i].clone())
            .collect();

        while next.len() < size {
            let parent_1 = &self.brains[ranked[rng.random_range(0..parents)]];
            let parent_2 = &self.brains[ranked[rng.random_range(0..parents)]];

            let weight = rng.random::<f32>();
            let mut child = Brain::crossover_weighted(parent_1, parent_2, weight);
            child.mutate(sample_mutation_scale(config, rng), rng);
            next.push(child);
        }

        self.brains = next;
        self.generation += 1;
        Ok(())
    }
}

/// Indices sorted by fitness, best first. Ties keep the lower index first.
pub fn rank(fitness: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
    order
}

/// Samples a mutation scale using logarithmic random distribution.
fn sample_mutation_scale<R: Rng + ?Sized>(config: &EvolutionConfig, rng: &mut R) -> f32 {
    let log_min = config.min_mutation_scale.ln();
    let log_max = config.max_mutation_scale.ln();
    rng.random_range(log_min..=log_max).exp()
}

/// Seed of the pipe course for one generation.
pub fn generation_seed(base_seed: u64, generation: u32) -> u64 {
    base_seed.wrapping_add(u64::from(generation).wrapping_mul(SEED_STRIDE))
}

/// Summary of one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Zero-based generation number.
    pub generation: u32,
    /// Highest fitness in the generation.
    pub best_fitness: f32,
    /// Mean fitness over the generation.
    pub mean_fitness: f32,
    /// Index of the best brain.
    pub champion: usize,
    /// Pipes passed.
    pub score: u32,
    /// Ticks simulated.
    pub ticks: u64,
    /// Birds alive at the tick limit.
    pub survivors: usize,
}

impl GenerationStats {
    /// Summarizes a finished game.
    pub fn from_outcome(generation: u32, outcome: &GenerationOutcome) -> Self {
        let fitness = outcome.fitness();
        let mean_fitness = if fitness.is_empty() {
            0.0
        } else {
            fitness.iter().sum::<f32>() / fitness.len() as f32
        };
        let (champion, best_fitness) = outcome
            .best()
            .map(|r| (r.id, r.fitness))
            .unwrap_or((0, 0.0));

        Self {
            generation,
            best_fitness,
            mean_fitness,
            champion,
            score: outcome.score,
            ticks: outcome.ticks,
            survivors: outcome.survivors(),
        }
    }
}

/// Statistics for a whole evolution run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionReport {
    /// One entry per evaluated generation.
    pub generations: Vec<GenerationStats>,
    /// Whether the fitness threshold was reached.
    pub solved: bool,
}

impl EvolutionReport {
    /// Best generation so far; ties go to the earliest.
    pub fn best(&self) -> Option<&GenerationStats> {
        self.generations
            .iter()
            .fold(None, |best: Option<&GenerationStats>, g| match best {
                Some(b) if b.best_fitness >= g.best_fitness => Some(b),
                _ => Some(g),
            })
    }

    /// Saves the report to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimulationError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a report from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let json = std::fs::read_to_string(path)?;
        let report = serde_json::from_str(&json)?;
        Ok(report)
    }
}

/// Result of [`run`]: the statistics and the best brain seen.
#[derive(Debug, Clone)]
pub struct Evolution {
    /// Per-generation statistics.
    pub report: EvolutionReport,
    /// Brain with the highest fitness across all generations.
    pub champion: Brain,
}

/// Evolves brains until the generation budget runs out or a generation's best
/// fitness reaches the threshold.
///
/// `params.max_ticks` must be set: a flock that never crashes would otherwise
/// keep a generation running forever.
pub fn run(params: &Params, config: &EvolutionConfig) -> Result<Evolution, SimulationError> {
    params.validate()?;
    config.validate()?;
    if params.max_ticks.is_none() {
        return Err(SimulationError::InvalidConfig(
            "evolution requires max_ticks so every generation ends",
        ));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let sprites = Sprites::new(params);
    let mut population = Population::new(config, &mut rng)?;
    let mut report = EvolutionReport::default();
    let mut champion: Option<(f32, Brain)> = None;

    for generation in 0..config.max_generations {
        let seed = generation_seed(config.seed, generation);
        let outcome = population.evaluate(params, &sprites, seed)?;
        let stats = GenerationStats::from_outcome(generation, &outcome);

        info!(
            generation,
            best = stats.best_fitness,
            mean = stats.mean_fitness,
            score = stats.score,
            ticks = stats.ticks,
            "generation finished"
        );

        if champion
            .as_ref()
            .is_none_or(|(best, _)| stats.best_fitness > *best)
        {
            champion = Some((stats.best_fitness, population.brains[stats.champion].clone()));
        }

        let reached = config
            .fitness_threshold
            .is_some_and(|threshold| stats.best_fitness >= threshold);
        report.generations.push(stats);

        if reached {
            report.solved = true;
            info!(generation, "fitness threshold reached");
            break;
        }
        if generation + 1 < config.max_generations {
            population.evolve(&outcome.fitness(), config, &mut rng)?;
        }
    }

    let champion = match champion {
        Some((_, brain)) => brain,
        None => population.brains.swap_remove(0),
    };
    Ok(Evolution { report, champion })
}
