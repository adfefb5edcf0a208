//! One entry in a generation: a bird, its controller and its fitness.
//!
//! Keeping all three in a single record means a removal can never leave a
//! controller paired with the wrong bird.

use serde::{Deserialize, Serialize};

use super::bird::Bird;

/// Why a bird left the cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Touched a pipe.
    Collision,
    /// Touched the floor.
    Ground,
    /// Flew above the top of the field.
    Ceiling,
}

/// When and how a bird died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Death {
    /// What killed the bird.
    pub cause: DeathCause,
    /// Tick during which it happened.
    pub tick: u64,
}

/// Accumulated fitness of one bird.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Fitness(pub f32);

impl Fitness {
    /// Adds `amount`.
    pub fn reward(&mut self, amount: f32) {
        self.0 += amount;
    }

    /// Subtracts `amount`.
    pub fn penalize(&mut self, amount: f32) {
        self.0 -= amount;
    }

    /// Current value.
    pub fn value(self) -> f32 {
        self.0
    }
}

/// A bird together with the controller that flies it.
#[derive(Debug, Clone)]
pub struct Contestant<C> {
    /// Stable identity: the index of the controller in the generation input.
    pub id: usize,
    /// Physical state.
    pub bird: Bird,
    /// Decision maker.
    pub controller: C,
    /// Fitness collected so far.
    pub fitness: Fitness,
    /// Set once the bird has died; dead contestants are compacted out at the
    /// end of the tick.
    pub death: Option<Death>,
}

impl<C> Contestant<C> {
    /// Creates a live contestant with zero fitness.
    pub fn new(id: usize, bird: Bird, controller: C) -> Self {
        Self {
            id,
            bird,
            controller,
            fitness: Fitness::default(),
            death: None,
        }
    }

    /// True until the bird dies.
    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    /// Marks the bird dead. A second call keeps the first cause.
    pub fn kill(&mut self, cause: DeathCause, tick: u64) {
        if self.death.is_none() {
            self.death = Some(Death { cause, tick });
        }
    }
}
