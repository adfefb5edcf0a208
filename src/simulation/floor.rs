//! Scrolling ground made of two tiled segments.

use serde::{Deserialize, Serialize};

use super::locatable::Locatable;
use super::params::Params;

/// Ground strip drawn as two segments that leapfrog each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    /// Top of the ground; the lower bound for birds.
    pub y: f32,
    /// Left edge of the first segment.
    pub x1: f32,
    /// Left edge of the second segment.
    pub x2: f32,
    /// Scroll speed per tick.
    pub speed: f32,
    /// Length of one segment.
    pub length: f32,
}

impl Floor {
    /// Creates a floor with the two segments laid end to end from x = 0.
    pub fn new(params: &Params) -> Self {
        Self {
            y: params.floor_y,
            x1: 0.0,
            x2: params.floor_length,
            speed: params.floor_speed,
            length: params.floor_length,
        }
    }
}

impl Locatable for Floor {
    fn x(&self) -> f32 {
        self.x1.min(self.x2)
    }

    fn advance(&mut self) {
        self.x1 -= self.speed;
        self.x2 -= self.speed;

        if self.x1 + self.length < 0.0 {
            self.x1 = self.x2 + self.length;
        }
        if self.x2 + self.length < 0.0 {
            self.x2 = self.x1 + self.length;
        }
    }
}
