use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::SimulationError;

/// Simulation parameters that control world geometry, physics and rewards.
///
/// Defaults reproduce the classic game: a 500×800 field, sprites scaled ×2,
/// pipes and floor scrolling at 5 units per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Width of the visible field. Birds start inside it; pipes spawn at or
    /// beyond its right edge.
    pub window_width: f32,
    /// Height of the visible field.
    pub window_height: f32,

    /// Y coordinate of the ground; birds touching it die.
    pub floor_y: f32,
    /// Floor scroll speed per tick.
    pub floor_speed: f32,
    /// Length of one floor segment.
    pub floor_length: f32,

    /// X coordinate where new pipes appear.
    pub pipe_spawn_x: f32,
    /// Pipe scroll speed per tick.
    pub pipe_speed: f32,
    /// Vertical gap between the top and bottom barrier.
    pub pipe_gap: f32,
    /// Width of a barrier sprite.
    pub pipe_width: u32,
    /// Height of a barrier sprite.
    pub pipe_height: u32,
    /// Lowest gap-top height (inclusive).
    pub pipe_min_height: i32,
    /// Highest gap-top height (exclusive).
    pub pipe_max_height: i32,

    /// Fixed horizontal position of every bird.
    pub bird_start_x: f32,
    /// Initial vertical position of every bird.
    pub bird_start_y: f32,
    /// Width of the bird sprite.
    pub bird_width: u32,
    /// Height of the bird sprite.
    pub bird_height: u32,
    /// Velocity set by a jump (negative is up).
    pub jump_velocity: f32,
    /// Quadratic term of the displacement model.
    pub gravity: f32,
    /// Maximum downward displacement per tick.
    pub max_fall: f32,
    /// Extra upward displacement added while rising.
    pub rise_bias: f32,
    /// Maximum upward tilt in degrees.
    pub max_tilt: f32,
    /// Tilt decrease per tick while falling, in degrees.
    pub tilt_velocity: f32,
    /// Distance below the last jump height before the bird starts nosediving.
    pub tilt_hold: f32,
    /// Ticks per wing animation frame.
    pub animation_ticks: u32,

    /// Controller output above which the bird jumps.
    pub jump_threshold: f32,
    /// Fitness granted to every live bird each tick.
    pub survival_reward: f32,
    /// Fitness granted to every live bird when the cohort passes a pipe.
    pub pass_reward: f32,
    /// Fitness removed from a bird that hits a pipe.
    pub collision_penalty: f32,

    /// Whether birds above the top of the field are removed.
    pub ceiling_kills: bool,
    /// Optional hard cap on ticks per generation.
    pub max_ticks: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            window_width: 500.0,
            window_height: 800.0,
            floor_y: 730.0,
            floor_speed: 5.0,
            floor_length: 672.0,
            pipe_spawn_x: 700.0,
            pipe_speed: 5.0,
            pipe_gap: 200.0,
            pipe_width: 104,
            pipe_height: 640,
            pipe_min_height: 50,
            pipe_max_height: 450,
            bird_start_x: 230.0,
            bird_start_y: 350.0,
            bird_width: 68,
            bird_height: 48,
            jump_velocity: -10.5,
            gravity: 1.5,
            max_fall: 16.0,
            rise_bias: 2.0,
            max_tilt: 25.0,
            tilt_velocity: 20.0,
            tilt_hold: 50.0,
            animation_ticks: 5,
            jump_threshold: 0.5,
            survival_reward: 0.1,
            pass_reward: 5.0,
            collision_penalty: 1.0,
            ceiling_kills: true,
            max_ticks: None,
        }
    }
}

impl Params {
    /// Checks that every value describes a playable world.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let numbers = [
            self.window_width,
            self.window_height,
            self.floor_y,
            self.floor_speed,
            self.floor_length,
            self.pipe_spawn_x,
            self.pipe_speed,
            self.pipe_gap,
            self.bird_start_x,
            self.bird_start_y,
            self.jump_velocity,
            self.gravity,
            self.max_fall,
            self.rise_bias,
            self.max_tilt,
            self.tilt_velocity,
            self.tilt_hold,
            self.jump_threshold,
            self.survival_reward,
            self.pass_reward,
            self.collision_penalty,
        ];
        if numbers.iter().any(|value| !value.is_finite()) {
            return Err(SimulationError::InvalidConfig(
                "numeric parameters must be finite",
            ));
        }
        if !(self.window_width > 0.0 && self.window_height > 0.0) {
            return Err(SimulationError::InvalidConfig(
                "window dimensions must be positive",
            ));
        }
        if !(self.floor_y > 0.0 && self.floor_y <= self.window_height) {
            return Err(SimulationError::InvalidConfig(
                "floor_y must lie inside the window",
            ));
        }
        if !(self.floor_speed > 0.0 && self.pipe_speed > 0.0) {
            return Err(SimulationError::InvalidConfig(
                "scroll speeds must be positive",
            ));
        }
        if self.floor_length <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "floor_length must be positive",
            ));
        }
        if self.pipe_gap <= 0.0 {
            return Err(SimulationError::InvalidConfig("pipe_gap must be positive"));
        }
        if self.pipe_width == 0 || self.pipe_height == 0 {
            return Err(SimulationError::InvalidConfig(
                "pipe sprite dimensions must be positive",
            ));
        }
        if self.bird_width == 0 || self.bird_height == 0 {
            return Err(SimulationError::InvalidConfig(
                "bird sprite dimensions must be positive",
            ));
        }
        if self.bird_start_x < 0.0
            || self.bird_start_x + self.bird_width as f32 > self.window_width
        {
            return Err(SimulationError::InvalidConfig(
                "the bird must start inside the field",
            ));
        }
        // New pipes enter from off-field, right of every bird.
        if self.pipe_spawn_x < self.window_width {
            return Err(SimulationError::InvalidConfig(
                "pipe_spawn_x must be at or beyond the right edge of the field",
            ));
        }
        if self.pipe_min_height >= self.pipe_max_height {
            return Err(SimulationError::InvalidConfig(
                "pipe_min_height must be below pipe_max_height",
            ));
        }
        if self.max_fall <= 0.0 {
            return Err(SimulationError::InvalidConfig("max_fall must be positive"));
        }
        if !(-90.0..=90.0).contains(&self.max_tilt) {
            return Err(SimulationError::InvalidConfig(
                "max_tilt must be within [-90, 90] degrees",
            ));
        }
        if self.animation_ticks == 0 {
            return Err(SimulationError::InvalidConfig(
                "animation_ticks must be positive",
            ));
        }
        if self.max_ticks == Some(0) {
            return Err(SimulationError::InvalidConfig(
                "max_ticks must be positive when set",
            ));
        }
        Ok(())
    }

    /// Loads parameters from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
