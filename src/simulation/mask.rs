//! Opaque-pixel masks for exact-shape collision.
//!
//! A mask is a boolean grid indexed `[[row, column]]`, i.e. `[[y, x]]`, with the
//! origin at the sprite's top-left corner.

use ndarray::{Array2, s};

/// Per-pixel silhouette of a sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    bits: Array2<bool>,
}

impl Mask {
    /// Wraps an existing boolean grid (`height × width`).
    pub fn new(bits: Array2<bool>) -> Self {
        Self { bits }
    }

    /// A fully opaque rectangle.
    pub fn filled(width: usize, height: usize) -> Self {
        Self::new(Array2::from_elem((height, width), true))
    }

    /// A fully transparent rectangle.
    pub fn empty(width: usize, height: usize) -> Self {
        Self::new(Array2::from_elem((height, width), false))
    }

    /// An ellipse inscribed in a `width × height` box.
    ///
    /// A pixel is opaque when its center lies inside the ellipse.
    pub fn ellipse(width: usize, height: usize) -> Self {
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        Self::new(Array2::from_shape_fn((height, width), |(row, col)| {
            let dx = (col as f32 + 0.5 - rx) / rx;
            let dy = (row as f32 + 0.5 - ry) / ry;
            dx * dx + dy * dy <= 1.0
        }))
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.bits.ncols()
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.bits.nrows()
    }

    /// Returns whether the pixel at `(x, y)` is opaque. Out of range is transparent.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bits.get((y, x)).copied().unwrap_or(false)
    }

    /// Sets the pixel at `(x, y)`. Out of range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, opaque: bool) {
        if let Some(bit) = self.bits.get_mut((y, x)) {
            *bit = opaque;
        }
    }

    /// Number of opaque pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Mirror image top to bottom.
    pub fn flipped_vertically(&self) -> Self {
        Self::new(self.bits.slice(s![..;-1, ..]).to_owned())
    }

    /// Rotates counterclockwise by `degrees` about the center.
    ///
    /// The result grows to the bounding box of the rotated sprite, so the
    /// rotated mask must be re-centered on the original sprite's center.
    pub fn rotated(&self, degrees: f32) -> Self {
        if degrees == 0.0 {
            return self.clone();
        }

        let (sin, cos) = degrees.to_radians().sin_cos();
        let w = self.width() as f32;
        let h = self.height() as f32;
        // Shave float noise so that e.g. 90° maps 68×48 to exactly 48×68.
        let new_w = (w * cos.abs() + h * sin.abs() - 1e-3).ceil().max(1.0);
        let new_h = (w * sin.abs() + h * cos.abs() - 1e-3).ceil().max(1.0);

        let bits = Array2::from_shape_fn((new_h as usize, new_w as usize), |(row, col)| {
            let px = col as f32 + 0.5 - new_w / 2.0;
            let py = row as f32 + 0.5 - new_h / 2.0;
            let sx = px * cos - py * sin + w / 2.0;
            let sy = px * sin + py * cos + h / 2.0;
            sx >= 0.0 && sy >= 0.0 && self.get(sx as usize, sy as usize)
        });
        Self::new(bits)
    }

    /// Finds the first pixel where `other`, placed with its top-left corner at
    /// `offset` in this mask's coordinates, overlaps this mask.
    ///
    /// Returns the point in this mask's coordinates, scanning row by row.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(usize, usize)> {
        let (ox, oy) = offset;
        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + other.width() as i32).min(self.width() as i32);
        let y1 = (oy + other.height() as i32).min(self.height() as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        let mine = self
            .bits
            .slice(s![y0 as usize..y1 as usize, x0 as usize..x1 as usize]);
        let theirs = other.bits.slice(s![
            (y0 - oy) as usize..(y1 - oy) as usize,
            (x0 - ox) as usize..(x1 - ox) as usize
        ]);

        mine.indexed_iter()
            .find(|&((row, col), &bit)| bit && theirs[[row, col]])
            .map(|((row, col), _)| (x0 as usize + col, y0 as usize + row))
    }
}
