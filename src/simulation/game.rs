//! The simulation loop for one generation.
//!
//! A game owns the cohort of contestants, the pipes, the floor and the score.
//! Every call to [`Game::step`] runs one tick in a fixed order:
//!
//! 1. every live bird collects the survival reward, moves, observes the target
//!    pipe and asks its controller whether to jump;
//! 2. the floor scrolls;
//! 3. every pipe scrolls and is tested against every live bird, recording
//!    collisions, passes and retirements;
//! 4. recorded passes and retirements are applied;
//! 5. birds touching the floor (or above the ceiling) die;
//! 6. dead contestants are compacted out of the cohort, order preserved.
//!
//! The order is part of the contract: the first live bird decides which pipe
//! everyone observes, so reordering the cohort would change results.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::bird::Bird;
use super::collision::collides;
use super::contestant::{Contestant, Death, DeathCause};
use super::controller::{Controller, wants_jump};
use super::error::SimulationError;
use super::events::{EventQueue, TickEvent, apply_events};
use super::floor::Floor;
use super::locatable::Locatable;
use super::params::Params;
use super::perception::{next_pipe_index, observe};
use super::pipe::Pipe;
use super::sprites::Sprites;

/// Whether a game can still advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// At least one bird is alive and the tick limit is not reached.
    Running,
    /// Every bird has died.
    Extinct,
    /// The configured tick limit was reached with birds still alive.
    TickLimit,
}

/// What one call to [`Game::step`] did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSummary {
    /// Tick number after the step (1 for the first tick).
    pub tick: u64,
    /// Events in the order they were applied.
    pub events: Vec<TickEvent>,
    /// Status after the step.
    pub status: GameStatus,
}

/// Final fitness and fate of one contestant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    /// Contestant id (index of its controller in the input).
    pub id: usize,
    /// Accumulated fitness.
    pub fitness: f32,
    /// How the bird died, or `None` if it survived to the tick limit.
    pub death: Option<Death>,
}

/// Result of a completed generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// One result per contestant, ordered by id.
    pub results: Vec<AgentResult>,
    /// Pipes passed by the cohort.
    pub score: u32,
    /// Ticks simulated.
    pub ticks: u64,
}

impl GenerationOutcome {
    /// Fitness values ordered by contestant id.
    pub fn fitness(&self) -> Vec<f32> {
        self.results.iter().map(|r| r.fitness).collect()
    }

    /// The contestant with the highest fitness; ties go to the lowest id.
    pub fn best(&self) -> Option<&AgentResult> {
        self.results.iter().fold(None, |best: Option<&AgentResult>, r| match best {
            Some(b) if b.fitness >= r.fitness => Some(b),
            _ => Some(r),
        })
    }

    /// Number of contestants still alive when the game ended.
    pub fn survivors(&self) -> usize {
        self.results.iter().filter(|r| r.death.is_none()).count()
    }
}

/// How [`Game::run_until`] ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The game reached a terminal status.
    Completed(GenerationOutcome),
    /// The quit signal fired at a tick boundary; fitness is discarded.
    Aborted {
        /// Ticks completed before the signal.
        tick: u64,
    },
}

/// One generation of birds flying through an endless pipe course.
#[derive(Debug, Clone)]
pub struct Game<C> {
    /// World configuration.
    pub params: Params,
    /// Collision silhouettes.
    pub sprites: Sprites,
    /// Live contestants, in cohort order.
    pub contestants: Vec<Contestant<C>>,
    /// Dead contestants, in order of death.
    pub fallen: Vec<Contestant<C>>,
    /// Pipes on the field, front first.
    pub pipes: Vec<Pipe>,
    /// Scrolling ground.
    pub floor: Floor,
    /// Pipes passed by the cohort.
    pub score: u32,
    /// Ticks simulated so far.
    pub tick: u64,
    pub(crate) rng: ChaCha8Rng,
}

impl<C: Controller> Game<C> {
    /// Creates a game with one bird per controller, all at the start
    /// position, and a single pipe at the spawn position.
    ///
    /// The seed fixes the whole pipe sequence.
    pub fn new(
        params: Params,
        controllers: impl IntoIterator<Item = C>,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        params.validate()?;
        let sprites = Sprites::new(&params);
        Self::with_sprites(params, sprites, controllers, seed)
    }

    /// Like [`Game::new`] but reuses prebuilt sprites.
    ///
    /// The sprite sizes must match the sizes in `params`.
    pub fn with_sprites(
        params: Params,
        sprites: Sprites,
        controllers: impl IntoIterator<Item = C>,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        params.validate()?;
        if !sprites.matches(&params) {
            return Err(SimulationError::InvalidConfig(
                "sprite sizes must match the bird and pipe sizes in params",
            ));
        }

        let contestants: Vec<_> = controllers
            .into_iter()
            .enumerate()
            .map(|(id, controller)| Contestant::new(id, Bird::at_start(&params), controller))
            .collect();
        if contestants.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "a generation needs at least one controller",
            ));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pipes = vec![Pipe::spawn(&params, &mut rng)];
        let floor = Floor::new(&params);

        Ok(Self {
            params,
            sprites,
            fallen: Vec::with_capacity(contestants.len()),
            contestants,
            pipes,
            floor,
            score: 0,
            tick: 0,
            rng,
        })
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        if self.contestants.is_empty() {
            GameStatus::Extinct
        } else if self.params.max_ticks.is_some_and(|limit| self.tick >= limit) {
            GameStatus::TickLimit
        } else {
            GameStatus::Running
        }
    }

    /// True while [`Game::step`] still has work to do.
    pub fn is_running(&self) -> bool {
        self.status() == GameStatus::Running
    }

    /// Advances the game by one tick. Does nothing once the game has ended.
    pub fn step(&mut self) -> TickSummary {
        if !self.is_running() {
            return TickSummary {
                tick: self.tick,
                events: Vec::new(),
                status: self.status(),
            };
        }
        self.tick += 1;
        let tick = self.tick;

        if self.pipes.is_empty() {
            let pipe = Pipe::spawn(&self.params, &mut self.rng);
            self.pipes.push(pipe);
        }

        // Frozen for the whole tick so removals cannot shift it.
        let target = next_pipe_index(&self.contestants[0].bird, &self.pipes);

        let threshold = self.params.jump_threshold;
        for contestant in &mut self.contestants {
            contestant.fitness.reward(self.params.survival_reward);
            contestant.bird.advance();

            let observation = observe(&contestant.bird, &self.pipes[target]);
            let outputs = contestant.controller.activate(&observation);
            if wants_jump(&outputs, threshold) {
                contestant.bird.jump();
            }
        }

        self.floor.advance();

        let mut queue = EventQueue::new();
        for (index, pipe) in self.pipes.iter_mut().enumerate() {
            pipe.advance();
            for contestant in self.contestants.iter_mut().filter(|c| c.is_alive()) {
                if collides(&contestant.bird, pipe, &self.sprites) {
                    contestant.fitness.penalize(self.params.collision_penalty);
                    contestant.kill(DeathCause::Collision, tick);
                    debug!(tick, id = contestant.id, pipe = index, "bird hit a pipe");
                    queue.push(TickEvent::BirdDied {
                        id: contestant.id,
                        cause: DeathCause::Collision,
                    });
                    continue;
                }

                if !pipe.passed && pipe.x < contestant.bird.x {
                    pipe.passed = true;
                    queue.push(TickEvent::PipePassed { index });
                }
            }

            if pipe.is_off_screen() {
                queue.push(TickEvent::PipeRetired { index });
            }
        }

        let mut events = apply_events(self, queue);

        let bird_height = self.sprites.bird_height as f32;
        for contestant in self.contestants.iter_mut().filter(|c| c.is_alive()) {
            let bird = &contestant.bird;
            let cause = if bird.y + bird_height >= self.floor.y {
                DeathCause::Ground
            } else if self.params.ceiling_kills && bird.y < 0.0 {
                DeathCause::Ceiling
            } else {
                continue;
            };
            contestant.kill(cause, tick);
            debug!(tick, id = contestant.id, ?cause, "bird left the field");
            events.push(TickEvent::BirdDied {
                id: contestant.id,
                cause,
            });
        }

        self.compact();

        TickSummary {
            tick,
            events,
            status: self.status(),
        }
    }

    /// Runs until the game ends or `quit` returns true at a tick boundary.
    pub fn run_until(&mut self, mut quit: impl FnMut(&Self) -> bool) -> RunOutcome {
        while self.is_running() {
            if quit(&*self) {
                warn!(tick = self.tick, live = self.contestants.len(), "generation aborted");
                return RunOutcome::Aborted { tick: self.tick };
            }
            self.step();
        }
        RunOutcome::Completed(self.outcome())
    }

    /// Runs until every bird has died or the tick limit is reached.
    pub fn run(&mut self) -> GenerationOutcome {
        while self.is_running() {
            self.step();
        }
        self.outcome()
    }
}

impl<C> Game<C> {
    /// Results for every contestant so far, ordered by id.
    pub fn outcome(&self) -> GenerationOutcome {
        let mut results: Vec<AgentResult> = self
            .contestants
            .iter()
            .chain(&self.fallen)
            .map(|c| AgentResult {
                id: c.id,
                fitness: c.fitness.value(),
                death: c.death,
            })
            .collect();
        results.sort_by_key(|r| r.id);

        GenerationOutcome {
            results,
            score: self.score,
            ticks: self.tick,
        }
    }

    /// Moves dead contestants to `fallen`, keeping the survivors' order.
    fn compact(&mut self) {
        if self.contestants.iter().all(Contestant::is_alive) {
            return;
        }
        let (alive, dead): (Vec<_>, Vec<_>) = std::mem::take(&mut self.contestants)
            .into_iter()
            .partition(Contestant::is_alive);
        self.contestants = alive;
        self.fallen.extend(dead);
    }
}
