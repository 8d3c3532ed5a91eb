//! Collision detection and response for the ball
//!
//! The ball is a circle, but paddle contact is tested against its enclosing
//! square, which keeps the overlap test a plain box-vs-box check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Result of a wall check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Corrected ball center (touching the surface, never past it)
    pub position: Vec2,
    /// Reflected velocity
    pub velocity: Vec2,
}

impl CollisionResult {
    pub fn miss(position: Vec2, velocity: Vec2) -> Self {
        Self {
            hit: false,
            position,
            velocity,
        }
    }
}

/// Strict overlap between `rect` and the square of half-size `radius`
/// centered on `center`. Touching edges do not count.
pub fn circle_box_overlaps(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.x - radius < rect.right
        && center.x + radius > rect.left
        && center.y - radius < rect.bottom
        && center.y + radius > rect.top
}

/// Check the ball against the top (y = 0) and bottom (y = `field_height`) walls
///
/// On contact the ball is placed exactly against the wall and its vertical
/// velocity is negated.
pub fn ball_wall_collision(
    position: Vec2,
    velocity: Vec2,
    radius: f32,
    field_height: f32,
) -> CollisionResult {
    if position.y - radius <= 0.0 {
        return CollisionResult {
            hit: true,
            position: Vec2::new(position.x, radius),
            velocity: Vec2::new(velocity.x, -velocity.y),
        };
    }
    if position.y + radius >= field_height {
        return CollisionResult {
            hit: true,
            position: Vec2::new(position.x, field_height - radius),
            velocity: Vec2::new(velocity.x, -velocity.y),
        };
    }
    CollisionResult::miss(position, velocity)
}

/// Deflection angle for a paddle hit
///
/// `offset` is how far from the paddle center the ball struck, in units of
/// the paddle half-height. The center maps to 0 and either edge to
/// `±max_angle`; hits on the ball's overhang past an edge are clamped.
#[inline]
pub fn bounce_angle(offset: f32, max_angle: f32) -> f32 {
    offset.clamp(-1.0, 1.0) * max_angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_3;

    fn paddle_rect() -> Rect {
        Rect {
            left: 30.0,
            right: 45.0,
            top: 250.0,
            bottom: 350.0,
        }
    }

    #[test]
    fn test_overlap() {
        let rect = paddle_rect();
        assert!(circle_box_overlaps(Vec2::new(50.0, 300.0), 10.0, &rect));
        // Square corner reaches the paddle corner even though the circle would not
        assert!(circle_box_overlaps(Vec2::new(53.0, 242.0), 10.0, &rect));
        assert!(!circle_box_overlaps(Vec2::new(60.0, 300.0), 10.0, &rect));
        assert!(!circle_box_overlaps(Vec2::new(50.0, 200.0), 10.0, &rect));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let rect = paddle_rect();
        assert!(!circle_box_overlaps(Vec2::new(55.0, 300.0), 10.0, &rect));
        assert!(!circle_box_overlaps(Vec2::new(40.0, 240.0), 10.0, &rect));
    }

    #[test]
    fn test_wall_bounce_top() {
        let result = ball_wall_collision(Vec2::new(100.0, 4.0), Vec2::new(3.0, -5.0), 10.0, 600.0);
        assert!(result.hit);
        assert_eq!(result.position, Vec2::new(100.0, 10.0));
        assert_eq!(result.velocity, Vec2::new(3.0, 5.0));
    }

    #[test]
    fn test_wall_bounce_bottom() {
        let result =
            ball_wall_collision(Vec2::new(100.0, 597.0), Vec2::new(-3.0, 5.0), 10.0, 600.0);
        assert!(result.hit);
        assert_eq!(result.position.y, 590.0);
        assert_eq!(result.velocity, Vec2::new(-3.0, -5.0));
    }

    #[test]
    fn test_wall_miss() {
        let result = ball_wall_collision(Vec2::new(100.0, 300.0), Vec2::new(3.0, 5.0), 10.0, 600.0);
        assert!(!result.hit);
        assert_eq!(result.position, Vec2::new(100.0, 300.0));
    }

    #[test]
    fn test_bounce_angle_range() {
        assert_eq!(bounce_angle(0.0, FRAC_PI_3), 0.0);
        assert_eq!(bounce_angle(1.0, FRAC_PI_3), FRAC_PI_3);
        assert_eq!(bounce_angle(-1.0, FRAC_PI_3), -FRAC_PI_3);
        assert_eq!(bounce_angle(1.2, FRAC_PI_3), FRAC_PI_3);
        assert!((bounce_angle(0.5, FRAC_PI_3) - FRAC_PI_3 / 2.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_wall_bounce_flips_vy(
            x in 20.0f32..780.0,
            y in -20.0f32..620.0,
            vx in -15.0f32..15.0,
            vy in -15.0f32..15.0,
        ) {
            let radius = 10.0;
            let result = ball_wall_collision(Vec2::new(x, y), Vec2::new(vx, vy), radius, 600.0);
            if result.hit {
                prop_assert_eq!(result.velocity.y, -vy);
                prop_assert_eq!(result.velocity.x, vx);
                prop_assert!(result.position.y == radius || result.position.y == 600.0 - radius);
            } else {
                prop_assert!(y - radius > 0.0 && y + radius < 600.0);
            }
        }
    }
}
