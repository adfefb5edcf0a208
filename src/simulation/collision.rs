//! Pixel-exact collision between birds and pipes.

use super::bird::Bird;
use super::mask::Mask;
use super::pipe::Pipe;
use super::sprites::Sprites;

/// Top-left corner of a bird's rotated silhouette in world coordinates.
///
/// The rotated mask is centered on the center of the unrotated sprite.
pub fn bird_origin(bird: &Bird, mask: &Mask, sprites: &Sprites) -> (i32, i32) {
    let center_x = bird.x + sprites.bird_width as f32 / 2.0;
    let center_y = bird.y.round() + sprites.bird_height as f32 / 2.0;
    (
        (center_x - mask.width() as f32 / 2.0).round() as i32,
        (center_y - mask.height() as f32 / 2.0).round() as i32,
    )
}

/// Returns true when the bird's silhouette touches either barrier of the pipe.
pub fn collides(bird: &Bird, pipe: &Pipe, sprites: &Sprites) -> bool {
    let mask = sprites.bird_mask(bird.tilt);
    let (left, top) = bird_origin(bird, mask, sprites);

    let dx = pipe.x.round() as i32 - left;
    let top_offset = (dx, pipe.top.round() as i32 - top);
    let bottom_offset = (dx, pipe.bottom.round() as i32 - top);

    mask.overlap(sprites.pipe_bottom(), bottom_offset).is_some()
        || mask.overlap(sprites.pipe_top(), top_offset).is_some()
}
