//! # Flappy Evo - Neuro-evolution of Flappy Birds
//!
//! A tick-exact simulation of the side-scrolling pipe game in which a whole
//! generation of birds flies at once, each steered by its own controller.
//! The simulation reports per-bird fitness so an evolutionary process can
//! breed better controllers.
//!
//! ## Features
//!
//! - Tick-count driven bird physics with jump impulses and tilt
//! - Randomized pipe course from a seed, reproducible run to run
//! - Pixel-mask collision with rotated bird silhouettes
//! - Generic [`simulation::controller::Controller`] seam for any decision maker
//! - MLP brains and a fixed-topology genetic algorithm driver
//!
//! ## Core Modules
//!
//! - [`simulation::game`] - The per-generation simulation loop
//! - [`simulation::bird`] - Bird physics
//! - [`simulation::pipe`] - Pipes and their gaps
//! - [`simulation::collision`] - Exact-shape collision detection
//! - [`simulation::evolution`] - Generation-over-generation driver

/// Core simulation logic and data structures.
pub mod simulation {
    /// Bird physics.
    pub mod bird;
    /// Neural network controllers.
    pub mod brain;
    /// Bird versus pipe collision.
    pub mod collision;
    /// One bird, its controller and its fitness.
    pub mod contestant;
    /// Decision-making interface.
    pub mod controller;
    /// Error type.
    pub mod error;
    /// Deferred per-tick events.
    pub mod events;
    /// Evolution driver.
    pub mod evolution;
    /// Scrolling ground.
    pub mod floor;
    /// Per-generation simulation loop.
    pub mod game;
    /// Trait for entities that scroll or fall each tick.
    ///
    /// The [`locatable::Locatable`] trait is implemented by every moving
    /// entity (Bird, Pipe, Floor).
    pub mod locatable;
    /// Opaque-pixel masks.
    pub mod mask;
    /// Simulation parameters.
    pub mod params;
    /// Observations fed to controllers.
    pub mod perception;
    /// Pipes.
    pub mod pipe;
    /// JSON configuration for the driver.
    pub mod settings;
    /// Sprite dimensions and silhouettes.
    pub mod sprites;
}
