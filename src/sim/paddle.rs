//! Player paddles
//!
//! Motion is integrated once per frame: the stored velocity is a per-frame
//! displacement, not a rate, so `update` ignores elapsed time.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::config::PaddleTuning;

/// Which player a paddle (or a point) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal direction pointing away from this side's paddle
    pub fn away_sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    /// Player label for display
    pub fn player_name(self) -> &'static str {
        match self {
            Side::Left => "Player 1",
            Side::Right => "Player 2",
        }
    }
}

/// A player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Left edge (fixed for the whole match)
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Signed vertical velocity (positive = down)
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    acceleration: f32,
    max_speed: f32,
    friction: f32,
    /// Lowest allowed `y` value (largest is `max_y`)
    min_y: f32,
    max_y: f32,
}

impl Paddle {
    /// Create a paddle on its side of a `field_width` x `field_height` field,
    /// vertically centered
    pub fn new(side: Side, tuning: &PaddleTuning, field_width: f32, field_height: f32) -> Self {
        let x = match side {
            Side::Left => tuning.offset,
            Side::Right => field_width - tuning.offset - tuning.width,
        };
        let max_y = (field_height - tuning.height).max(0.0);
        let mut paddle = Self {
            side,
            x,
            y: 0.0,
            velocity: 0.0,
            width: tuning.width,
            height: tuning.height,
            acceleration: tuning.acceleration,
            max_speed: tuning.max_speed,
            friction: tuning.friction,
            min_y: 0.0,
            max_y,
        };
        paddle.reset();
        paddle
    }

    pub fn move_up(&mut self) {
        self.velocity = (self.velocity - self.acceleration).max(-self.max_speed);
    }

    pub fn move_down(&mut self) {
        self.velocity = (self.velocity + self.acceleration).min(self.max_speed);
    }

    /// Advance one frame: move, damp, then keep inside the field
    pub fn update(&mut self, _dt: f32) {
        self.y += self.velocity;
        self.velocity *= self.friction;

        if self.y < self.min_y {
            self.y = self.min_y;
            self.velocity = 0.0;
        }
        if self.y > self.max_y {
            self.y = self.max_y;
            self.velocity = 0.0;
        }
    }

    /// Recenter and stop
    pub fn reset(&mut self) {
        self.y = (self.min_y + self.max_y) / 2.0;
        self.velocity = 0.0;
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            left: self.x,
            right: self.x + self.width,
            top: self.y,
            bottom: self.y + self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn paddle(side: Side) -> Paddle {
        Paddle::new(side, &PaddleTuning::default(), FIELD_WIDTH, FIELD_HEIGHT)
    }

    #[test]
    fn test_placement() {
        let left = paddle(Side::Left);
        let right = paddle(Side::Right);
        assert_eq!(left.x, PADDLE_OFFSET);
        assert_eq!(right.x, FIELD_WIDTH - PADDLE_OFFSET - PADDLE_WIDTH);
        assert_eq!(left.y, (FIELD_HEIGHT - PADDLE_HEIGHT) / 2.0);
        assert_eq!(left.center_y(), FIELD_HEIGHT / 2.0);
    }

    #[test]
    fn test_acceleration_is_capped() {
        let mut p = paddle(Side::Left);
        for _ in 0..100 {
            p.move_down();
        }
        assert_eq!(p.velocity, PADDLE_MAX_SPEED);
        for _ in 0..100 {
            p.move_up();
        }
        assert_eq!(p.velocity, -PADDLE_MAX_SPEED);
    }

    #[test]
    fn test_opposing_inputs_cancel() {
        let mut p = paddle(Side::Right);
        p.move_up();
        p.move_down();
        assert!(p.velocity.abs() < 1e-6);
    }

    #[test]
    fn test_friction_brings_paddle_to_rest() {
        let mut p = paddle(Side::Left);
        p.move_down();
        let start = p.y;
        for _ in 0..200 {
            p.update(FRAME_MS);
        }
        assert!(p.velocity.abs() < 1e-6);
        // Geometric series: 0.8 / (1 - 0.85)
        assert!((p.y - start - PADDLE_ACCELERATION / (1.0 - PADDLE_FRICTION)).abs() < 0.01);
    }

    #[test]
    fn test_wall_clamp_zeroes_velocity() {
        let mut p = paddle(Side::Left);
        p.y = 2.0;
        p.velocity = -PADDLE_MAX_SPEED;
        p.update(FRAME_MS);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.velocity, 0.0);

        p.y = FIELD_HEIGHT - PADDLE_HEIGHT - 1.0;
        p.velocity = PADDLE_MAX_SPEED;
        p.update(FRAME_MS);
        assert_eq!(p.y, FIELD_HEIGHT - PADDLE_HEIGHT);
        assert_eq!(p.velocity, 0.0);
    }

    #[test]
    fn test_reset() {
        let mut p = paddle(Side::Right);
        p.velocity = 5.0;
        p.y = 12.0;
        p.reset();
        assert_eq!(p.velocity, 0.0);
        assert_eq!(p.center_y(), FIELD_HEIGHT / 2.0);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_field(moves in prop::collection::vec(0u8..4, 1..400)) {
            let mut p = paddle(Side::Left);
            let max_y = FIELD_HEIGHT - PADDLE_HEIGHT;
            for m in moves {
                match m {
                    0 => p.move_up(),
                    1 => p.move_down(),
                    2 => {
                        p.move_up();
                        p.move_down();
                    }
                    _ => {}
                }
                p.update(FRAME_MS);
                prop_assert!(p.y >= 0.0 && p.y <= max_y);
                prop_assert!(p.velocity.abs() <= PADDLE_MAX_SPEED);
            }
        }
    }
}
