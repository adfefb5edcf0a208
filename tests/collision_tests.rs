#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::bird::Bird;
use flappy_evo::simulation::collision::{bird_origin, collides};
use flappy_evo::simulation::mask::Mask;
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::pipe::Pipe;
use flappy_evo::simulation::sprites::Sprites;

fn level_bird(y: f32) -> Bird {
    Bird::new(230.0, y, Default::default())
}

#[test]
fn test_overlap_reports_first_point() {
    let a = Mask::filled(4, 4);
    let b = Mask::filled(4, 4);

    assert_eq!(a.overlap(&b, (2, 3)), Some((2, 3)));
    assert_eq!(a.overlap(&b, (-3, -3)), Some((0, 0)));
    assert_eq!(a.overlap(&b, (4, 0)), None);
    assert_eq!(a.overlap(&b, (0, -4)), None);
}

#[test]
fn test_overlap_is_symmetric() {
    let bird = Mask::ellipse(68, 48);
    let rotated = bird.rotated(25.0);
    let block = Mask::filled(20, 30);

    for dx in (-90..90).step_by(7) {
        for dy in (-70..70).step_by(5) {
            assert_eq!(
                bird.overlap(&block, (dx, dy)).is_some(),
                block.overlap(&bird, (-dx, -dy)).is_some(),
                "offset ({dx}, {dy})"
            );
            assert_eq!(
                rotated.overlap(&bird, (dx, dy)).is_some(),
                bird.overlap(&rotated, (-dx, -dy)).is_some(),
                "rotated offset ({dx}, {dy})"
            );
        }
    }
}

#[test]
fn test_transparent_pixels_never_collide() {
    let empty = Mask::empty(10, 10);
    let full = Mask::filled(10, 10);

    assert_eq!(empty.overlap(&full, (0, 0)), None);
    assert_eq!(full.overlap(&empty, (3, 3)), None);
}

#[test]
fn test_ellipse_corners_are_transparent() {
    let mask = Mask::ellipse(68, 48);

    assert!(!mask.get(0, 0));
    assert!(!mask.get(67, 47));
    assert!(mask.get(34, 24));
    assert!(mask.get(0, 24));
    // Touching bounding boxes but not silhouettes.
    assert_eq!(mask.overlap(&Mask::filled(3, 3), (-2, -2)), None);
}

#[test]
fn test_rotation_swaps_dimensions_at_right_angle() {
    let mask = Mask::ellipse(68, 48);
    let rotated = mask.rotated(90.0);

    assert_eq!(rotated.width(), 48);
    assert_eq!(rotated.height(), 68);

    let before = mask.count() as f32;
    let after = rotated.count() as f32;
    assert!((before - after).abs() / before < 0.05);
}

#[test]
fn test_rotation_grows_bounding_box() {
    let mask = Mask::filled(68, 48);
    let rotated = mask.rotated(25.0);

    assert!(rotated.width() > 68);
    assert!(rotated.height() > 48);
    assert_eq!(mask.rotated(0.0), mask);
}

#[test]
fn test_flip_mirrors_rows() {
    let mut mask = Mask::empty(3, 4);
    mask.set(1, 0, true);

    let flipped = mask.flipped_vertically();

    assert!(flipped.get(1, 3));
    assert!(!flipped.get(1, 0));
    assert_eq!(flipped.count(), 1);
}

#[test]
fn test_bird_in_gap_does_not_collide() {
    let params = Params::default();
    let sprites = Sprites::new(&params);
    let pipe = Pipe::new(230.0, 300, &params);

    assert!(!collides(&level_bird(380.0), &pipe, &sprites));
}

#[test]
fn test_top_and_bottom_barriers_collide_symmetrically() {
    let params = Params::default();
    let sprites = Sprites::new(&params);
    let bird = level_bird(380.0);

    // Bird spans rows 380..428.
    let into_top = Pipe::new(230.0, 390, &params);
    let into_bottom = Pipe::new(230.0, 418 - 200, &params);
    assert_eq!(into_bottom.bottom, 418.0);

    assert!(collides(&bird, &into_top, &sprites));
    assert!(collides(&bird, &into_bottom, &sprites));

    let clear_top = Pipe::new(230.0, 370, &params);
    let clear_bottom = Pipe::new(230.0, 438 - 200, &params);
    assert!(!collides(&bird, &clear_top, &sprites));
    assert!(!collides(&bird, &clear_bottom, &sprites));
}

#[test]
fn test_pipe_to_the_right_does_not_collide() {
    let params = Params::default();
    let sprites = Sprites::new(&params);
    let bird = level_bird(100.0);
    let pipe = Pipe::new(400.0, 300, &params);

    assert!(!collides(&bird, &pipe, &sprites));
}

#[test]
fn test_rotated_mask_stays_centered() {
    let params = Params::default();
    let sprites = Sprites::new(&params);
    let mut bird = level_bird(300.0);

    let level = sprites.bird_mask(0.0);
    assert_eq!(bird_origin(&bird, level, &sprites), (230, 300));

    bird.tilt = -90.0;
    let diving = sprites.bird_mask(bird.tilt);
    let (left, top) = bird_origin(&bird, diving, &sprites);
    assert_eq!(diving.width(), 48);
    assert_eq!(diving.height(), 68);
    assert_eq!((left, top), (230 + 10, 300 - 10));
}
