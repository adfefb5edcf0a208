//! Pipes: paired barriers with a fixed gap, scrolling left at constant speed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::locatable::Locatable;
use super::params::Params;

/// A top and bottom barrier sharing one x position.
///
/// The top barrier hangs down to `height`; the bottom barrier starts at
/// `bottom = height + gap`. Both barriers are `width` wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge of both barriers.
    pub x: f32,
    /// Upper edge of the gap (lower edge of the top barrier).
    pub height: i32,
    /// Upper edge of the top barrier sprite.
    pub top: f32,
    /// Upper edge of the bottom barrier (lower edge of the gap).
    pub bottom: f32,
    /// Set once a live bird has flown past this pipe.
    pub passed: bool,
    /// Horizontal speed per tick.
    pub speed: f32,
    /// Barrier width.
    pub width: f32,
}

impl Pipe {
    /// Creates a pipe at `x` whose gap starts at `height`.
    pub fn new(x: f32, height: i32, params: &Params) -> Self {
        let height_f = height as f32;
        Self {
            x,
            height,
            top: height_f - params.pipe_height as f32,
            bottom: height_f + params.pipe_gap,
            passed: false,
            speed: params.pipe_speed,
            width: params.pipe_width as f32,
        }
    }

    /// Spawns a pipe at the configured spawn x with a random gap height.
    pub fn spawn<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Self {
        let height = rng.random_range(params.pipe_min_height..params.pipe_max_height);
        Self::new(params.pipe_spawn_x, height, params)
    }

    /// Vertical size of the opening between the two barriers.
    pub fn gap(&self) -> f32 {
        self.bottom - self.height as f32
    }

    /// Right edge of both barriers.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// True once the pipe has fully left the field on the left side.
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }
}

impl Locatable for Pipe {
    fn x(&self) -> f32 {
        self.x
    }

    fn advance(&mut self) {
        self.x -= self.speed;
    }
}
