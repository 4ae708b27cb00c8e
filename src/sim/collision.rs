//! Collision detection for circular bodies
//!
//! Every gameplay body is a circle, so all contact tests reduce to comparing
//! the distance between centers with the sum of the radii.

use glam::Vec2;

/// Anything with a circular collision footprint
pub trait Circle {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// Check whether two circles overlap
///
/// Strict: circles that exactly touch do not overlap. Compares squared
/// distances so no square root is taken.
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_pos.distance_squared(b_pos) < reach * reach
}

/// Overlap test between two circular bodies
#[inline]
pub fn overlaps(a: &impl Circle, b: &impl Circle) -> bool {
    circles_overlap(a.center(), a.radius(), b.center(), b.radius())
}

/// Check whether a circle has fully left the playfield through the bottom edge
#[inline]
pub fn below_bottom(pos: Vec2, radius: f32, frame_height: f32) -> bool {
    pos.y > frame_height + radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_player_enemy_overlap() {
        // Distance 30 < 25 + 10
        assert!(circles_overlap(
            Vec2::new(100.0, 100.0),
            25.0,
            Vec2::new(100.0, 130.0),
            10.0
        ));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(30.0, 0.0),
            20.0
        ));
        assert!(circles_overlap(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(29.9, 0.0),
            20.0
        ));
    }

    #[test]
    fn test_below_bottom() {
        assert!(!below_bottom(Vec2::new(0.0, 490.0), 20.0, 480.0));
        // Exactly one radius past the edge still counts as on screen
        assert!(!below_bottom(Vec2::new(0.0, 500.0), 20.0, 480.0));
        assert!(below_bottom(Vec2::new(0.0, 500.5), 20.0, 480.0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0, ar in 0.0f32..100.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0, br in 0.0f32..100.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, ar, b, br), circles_overlap(b, br, a, ar));
        }
    }
}
