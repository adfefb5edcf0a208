//! Trait for entities that have a horizontal position and advance every tick.
//!
//! Birds, pipes and the floor all move once per simulation tick. Movement is
//! driven by the tick itself, never by wall-clock time, so two runs with the
//! same inputs produce the same trajectories.

/// Trait for entities with a position that advance one tick at a time.
pub trait Locatable {
    /// Returns the entity's leftmost x coordinate.
    fn x(&self) -> f32;

    /// Advances the entity by exactly one simulation tick.
    fn advance(&mut self);
}
