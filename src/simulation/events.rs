//! Event system for deferred per-tick state updates.
//!
//! During the pipe sweep the game only records what happened. Pipe passes and
//! retirements are applied afterwards, so the sweep never mutates the pipe
//! list it is iterating and a pass is credited exactly once.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::contestant::DeathCause;
use super::game::Game;
use super::pipe::Pipe;

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    /// A bird left the cohort.
    BirdDied {
        /// Contestant id.
        id: usize,
        /// What killed it.
        cause: DeathCause,
    },
    /// The cohort flew past a pipe.
    PipePassed {
        /// Index of the pipe in the pipe list during the sweep.
        index: usize,
    },
    /// A pipe left the field and was removed.
    PipeRetired {
        /// Index of the pipe in the pipe list during the sweep.
        index: usize,
    },
    /// A new pipe entered at the spawn position.
    PipeSpawned {
        /// Gap-top height of the new pipe.
        height: i32,
    },
}

/// Queue for collecting events during the sweep.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<TickEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: TickEvent) {
        self.events.push(event);
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing was queued.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drains all events from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, TickEvent> {
        self.events.drain(..)
    }
}

/// Applies queued events to the game and returns everything that happened,
/// including pipes spawned as a consequence.
///
/// Each pass adds one point to the score, rewards every bird still alive and
/// spawns a replacement pipe. Retired pipes are removed last, highest index
/// first, so the recorded indices stay valid.
pub fn apply_events<C>(game: &mut Game<C>, mut queue: EventQueue) -> Vec<TickEvent> {
    let mut applied = Vec::with_capacity(queue.len());
    let mut retired = Vec::new();

    for event in queue.drain() {
        applied.push(event);
        match event {
            TickEvent::PipePassed { index } => {
                game.score += 1;
                let reward = game.params.pass_reward;
                for contestant in game.contestants.iter_mut().filter(|c| c.is_alive()) {
                    contestant.fitness.reward(reward);
                }

                let pipe = Pipe::spawn(&game.params, &mut game.rng);
                debug!(
                    tick = game.tick,
                    pipe = index,
                    score = game.score,
                    next_height = pipe.height,
                    "pipe passed"
                );
                applied.push(TickEvent::PipeSpawned {
                    height: pipe.height,
                });
                game.pipes.push(pipe);
            }
            TickEvent::PipeRetired { index } => retired.push(index),
            TickEvent::BirdDied { .. } | TickEvent::PipeSpawned { .. } => {}
        }
    }

    retired.sort_unstable();
    retired.dedup();
    for index in retired.into_iter().rev() {
        if index < game.pipes.len() {
            game.pipes.remove(index);
        }
    }

    applied
}
