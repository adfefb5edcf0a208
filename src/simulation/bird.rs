//! Bird physics: tick-count driven falling, jump impulses and tilt.
//!
//! Displacement is a function of the number of ticks since the last jump,
//! not of elapsed time. Changing the tick rate therefore changes the game;
//! fitness values are only comparable between runs at the same rate.

use serde::{Deserialize, Serialize};

use super::locatable::Locatable;
use super::params::Params;

/// Lowest tilt a bird can reach, in degrees (straight down).
pub const MIN_TILT: f32 = -90.0;

/// Tilt at or below which the wings stop flapping.
const NOSEDIVE_TILT: f32 = -80.0;

/// Wing animation frame with the wings held level.
pub const LEVEL_WINGS_FRAME: usize = 1;

/// Physics constants copied into every bird.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdPhysics {
    /// Velocity set by a jump (negative is up).
    pub jump_velocity: f32,
    /// Quadratic term of the displacement model.
    pub gravity: f32,
    /// Maximum downward displacement per tick.
    pub max_fall: f32,
    /// Extra upward displacement while rising.
    pub rise_bias: f32,
    /// Maximum upward tilt in degrees.
    pub max_tilt: f32,
    /// Tilt decrease per tick while falling.
    pub tilt_velocity: f32,
    /// Distance below the jump height before nosediving starts.
    pub tilt_hold: f32,
}

impl From<&Params> for BirdPhysics {
    fn from(params: &Params) -> Self {
        Self {
            jump_velocity: params.jump_velocity,
            gravity: params.gravity,
            max_fall: params.max_fall,
            rise_bias: params.rise_bias,
            max_tilt: params.max_tilt,
            tilt_velocity: params.tilt_velocity,
            tilt_hold: params.tilt_hold,
        }
    }
}

impl Default for BirdPhysics {
    fn default() -> Self {
        Self::from(&Params::default())
    }
}

/// A bird controlled by a single jump decision per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Horizontal position (constant during a run).
    pub x: f32,
    /// Vertical position of the sprite's top edge; grows downwards.
    pub y: f32,
    /// Velocity set by the last jump.
    pub velocity: f32,
    /// Sprite rotation in degrees, counterclockwise.
    pub tilt: f32,
    /// Ticks since the last jump.
    pub tick_count: u32,
    /// Value of `y` at the last jump.
    pub height: f32,
    /// Wing animation counter, used only by renderers.
    pub animation_tick: u32,
    /// Physics constants.
    pub physics: BirdPhysics,
}

impl Bird {
    /// Creates a level, motionless bird.
    pub fn new(x: f32, y: f32, physics: BirdPhysics) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            tilt: 0.0,
            tick_count: 0,
            height: y,
            animation_tick: 0,
            physics,
        }
    }

    /// Creates a bird at the configured start position.
    pub fn at_start(params: &Params) -> Self {
        Self::new(params.bird_start_x, params.bird_start_y, BirdPhysics::from(params))
    }

    /// Applies the upward impulse and restarts the fall from the current height.
    pub fn jump(&mut self) {
        self.velocity = self.physics.jump_velocity;
        self.tick_count = 0;
        self.height = self.y;
    }

    /// Vertical displacement for the next tick, without applying it.
    pub fn next_displacement(&self) -> f32 {
        let t = (self.tick_count + 1) as f32;
        let mut displacement = self.velocity * t + self.physics.gravity * t * t;

        if displacement >= self.physics.max_fall {
            displacement = self.physics.max_fall;
        }
        if displacement < 0.0 {
            displacement -= self.physics.rise_bias;
        }
        displacement
    }

    /// Advances the wing animation and returns the frame to draw (0, 1 or 2).
    pub fn animate(&mut self, animation_ticks: u32) -> usize {
        self.animation_tick += 1;

        let frame = match self.animation_tick {
            t if t < animation_ticks => 0,
            t if t < animation_ticks * 2 => 1,
            t if t < animation_ticks * 3 => 2,
            t if t < animation_ticks * 4 => 1,
            _ => {
                self.animation_tick = 0;
                0
            }
        };

        if self.tilt <= NOSEDIVE_TILT {
            self.animation_tick = animation_ticks * 2;
            return LEVEL_WINGS_FRAME;
        }
        frame
    }
}

impl Locatable for Bird {
    fn x(&self) -> f32 {
        self.x
    }

    fn advance(&mut self) {
        let displacement = self.next_displacement();
        self.tick_count += 1;
        self.y += displacement;

        if displacement < 0.0 || self.y < self.height + self.physics.tilt_hold {
            // Snap straight to the climbing pose.
            if self.tilt < self.physics.max_tilt {
                self.tilt = self.physics.max_tilt;
            }
        } else if self.tilt > MIN_TILT {
            self.tilt = (self.tilt - self.physics.tilt_velocity).max(MIN_TILT);
        }
    }
}
