//! Sprite dimensions and silhouettes used by the collision detector.
//!
//! The simulation never touches image data. A renderer may draw whatever it
//! likes as long as the sizes here match its sprites.

use super::bird::MIN_TILT;
use super::mask::Mask;
use super::params::Params;

/// Silhouettes for every sprite that takes part in collisions.
#[derive(Debug, Clone)]
pub struct Sprites {
    /// Bird sprite width before rotation.
    pub bird_width: u32,
    /// Bird sprite height before rotation.
    pub bird_height: u32,
    /// Barrier sprite width.
    pub pipe_width: u32,
    /// Barrier sprite height.
    pub pipe_height: u32,
    /// Bird silhouettes pre-rotated for each whole degree from `MIN_TILT` up.
    bird_masks: Vec<Mask>,
    pipe_top: Mask,
    pipe_bottom: Mask,
}

impl Sprites {
    /// Builds the procedural silhouettes: an ellipse for the bird and solid
    /// rectangles for the barriers.
    pub fn new(params: &Params) -> Self {
        let bird = Mask::ellipse(params.bird_width as usize, params.bird_height as usize);
        let pipe = Mask::filled(params.pipe_width as usize, params.pipe_height as usize);
        Self::from_masks(params, &bird, pipe)
    }

    /// Builds sprites from caller-supplied silhouettes, e.g. masks extracted
    /// from real artwork.
    pub fn from_masks(params: &Params, bird: &Mask, pipe: Mask) -> Self {
        let lowest = MIN_TILT as i32;
        let highest = params.max_tilt.ceil().max(0.0) as i32;
        let bird_masks = (lowest..=highest)
            .map(|degrees| bird.rotated(degrees as f32))
            .collect();

        Self {
            bird_width: bird.width() as u32,
            bird_height: bird.height() as u32,
            pipe_width: pipe.width() as u32,
            pipe_height: pipe.height() as u32,
            bird_masks,
            pipe_top: pipe.flipped_vertically(),
            pipe_bottom: pipe,
        }
    }

    /// True when every sprite has the size `params` describes.
    pub fn matches(&self, params: &Params) -> bool {
        self.bird_width == params.bird_width
            && self.bird_height == params.bird_height
            && self.pipe_width == params.pipe_width
            && self.pipe_height == params.pipe_height
    }

    /// Bird silhouette at the given tilt, rounded to the nearest degree.
    pub fn bird_mask(&self, tilt: f32) -> &Mask {
        let last = self.bird_masks.len() as i32 - 1;
        let index = (tilt.round() as i32 - MIN_TILT as i32).clamp(0, last);
        &self.bird_masks[index as usize]
    }

    /// Silhouette of the upper, upside-down barrier.
    pub fn pipe_top(&self) -> &Mask {
        &self.pipe_top
    }

    /// Silhouette of the lower barrier.
    pub fn pipe_bottom(&self) -> &Mask {
        &self.pipe_bottom
    }
}
