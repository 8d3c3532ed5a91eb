//! The ball
//!
//! Like paddles, the ball moves by its full velocity once per frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_4, PI};

use super::collision::{ball_wall_collision, bounce_angle, circle_box_overlaps};
use super::config::BallTuning;
use super::paddle::{Paddle, Side};

/// What happened to the ball during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallStep {
    /// Player awarded a point because the ball left the field
    pub scored: Option<Side>,
    /// Ball bounced off the top or bottom wall
    pub wall_hit: bool,
    /// Paddle the ball bounced off
    pub paddle_hit: Option<Side>,
}

/// The ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Current rally speed; equals `vel.length()` apart from paddle spin
    pub speed: f32,
    pub radius: f32,
    /// Paddle that touched the ball last this rally
    pub last_hit_by: Option<Side>,
    base_speed: f32,
    max_speed: f32,
    speed_increment: f32,
    max_bounce_angle: f32,
    spin_factor: f32,
    field_width: f32,
    field_height: f32,
}

impl Ball {
    /// Create a ball at rest in the middle of the field; call [`Ball::reset`]
    /// to launch it
    pub fn new(tuning: &BallTuning, field_width: f32, field_height: f32) -> Self {
        Self {
            pos: Vec2::new(field_width / 2.0, field_height / 2.0),
            vel: Vec2::ZERO,
            speed: tuning.base_speed,
            radius: tuning.radius,
            last_hit_by: None,
            base_speed: tuning.base_speed,
            max_speed: tuning.max_speed,
            speed_increment: tuning.speed_increment,
            max_bounce_angle: tuning.max_bounce_angle,
            spin_factor: tuning.spin_factor,
            field_width,
            field_height,
        }
    }

    /// Recenter at base speed heading toward a random side
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.pos = Vec2::new(self.field_width / 2.0, self.field_height / 2.0);
        self.speed = self.base_speed;
        self.last_hit_by = None;

        let theta = launch_angle(rng);
        self.vel = Vec2::new(theta.cos(), theta.sin()) * self.speed;
    }

    /// Advance one frame against both paddles
    pub fn update(&mut self, _dt: f32, left: &Paddle, right: &Paddle) -> BallStep {
        let mut step = BallStep::default();

        self.pos += self.vel;

        let wall = ball_wall_collision(self.pos, self.vel, self.radius, self.field_height);
        if wall.hit {
            self.pos = wall.position;
            self.vel = wall.velocity;
            step.wall_hit = true;
        }

        for paddle in [left, right] {
            if self.check_paddle_collision(paddle) {
                step.paddle_hit = Some(paddle.side);
            }
        }

        if self.pos.x + self.radius < 0.0 {
            step.scored = Some(Side::Right);
        } else if self.pos.x - self.radius > self.field_width {
            step.scored = Some(Side::Left);
        }

        step
    }

    /// Bounce off `paddle` if touching it. Returns true on contact.
    fn check_paddle_collision(&mut self, paddle: &Paddle) -> bool {
        let bounds = paddle.bounds();
        if !circle_box_overlaps(self.pos, self.radius, &bounds) {
            return false;
        }

        // Flush against the inner face
        self.pos.x = match paddle.side {
            Side::Left => bounds.right + self.radius,
            Side::Right => bounds.left - self.radius,
        };

        let offset = (self.pos.y - paddle.center_y()) / paddle.half_height();
        let angle = bounce_angle(offset, self.max_bounce_angle);

        self.speed = (self.speed + self.speed_increment).min(self.max_speed);

        let direction = paddle.side.away_sign();
        self.vel = Vec2::new(direction * angle.cos(), angle.sin()) * self.speed;

        // Spin is added on top of the capped speed and not renormalized
        self.vel.y += paddle.velocity * self.spin_factor;

        self.last_hit_by = Some(paddle.side);
        true
    }
}

/// Random launch heading within 45 degrees of horizontal, toward either side
fn launch_angle<R: Rng>(rng: &mut R) -> f32 {
    let side = if rng.random_bool(0.5) { 0.0 } else { PI };
    side + rng.random_range(-FRAC_PI_4..=FRAC_PI_4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::config::PaddleTuning;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Ball, Paddle, Paddle) {
        let paddle = PaddleTuning::default();
        (
            Ball::new(&BallTuning::default(), FIELD_WIDTH, FIELD_HEIGHT),
            Paddle::new(Side::Left, &paddle, FIELD_WIDTH, FIELD_HEIGHT),
            Paddle::new(Side::Right, &paddle, FIELD_WIDTH, FIELD_HEIGHT),
        )
    }

    #[test]
    fn test_reset_launch_direction() {
        let (mut ball, _, _) = setup();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut went_left = false;
        let mut went_right = false;

        for _ in 0..200 {
            ball.speed = 12.0;
            ball.last_hit_by = Some(Side::Left);
            ball.reset(&mut rng);

            assert_eq!(ball.pos, Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0));
            assert_eq!(ball.speed, BALL_BASE_SPEED);
            assert_eq!(ball.last_hit_by, None);
            assert!((ball.vel.length() - BALL_BASE_SPEED).abs() < 1e-4);
            // Never steeper than 45 degrees
            assert!(ball.vel.y.abs() <= ball.vel.x.abs() + 1e-4);

            went_left |= ball.vel.x < 0.0;
            went_right |= ball.vel.x > 0.0;
        }
        assert!(went_left && went_right);
    }

    #[test]
    fn test_center_hit_on_right_paddle() {
        let (mut ball, left, right) = setup();
        ball.speed = BALL_BASE_SPEED;
        // One frame away from touching the right paddle face at its center
        ball.pos = Vec2::new(right.x - ball.radius - 1.0, right.center_y());
        ball.vel = Vec2::new(BALL_BASE_SPEED, 0.0);

        let step = ball.update(FRAME_MS, &left, &right);

        assert_eq!(step.paddle_hit, Some(Side::Right));
        assert_eq!(step.scored, None);
        assert!(!step.wall_hit);
        assert_eq!(ball.vel.y, 0.0);
        assert!(ball.vel.x < 0.0);
        assert_eq!(ball.speed, BALL_BASE_SPEED + BALL_SPEED_INCREMENT);
        assert!((ball.vel.x + ball.speed).abs() < 1e-5);
        assert_eq!(ball.pos.x, right.x - ball.radius);
        assert_eq!(ball.last_hit_by, Some(Side::Right));
    }

    #[test]
    fn test_edge_hit_gives_max_angle() {
        let (mut ball, left, right) = setup();
        ball.pos = Vec2::new(left.x + left.width + ball.radius + 2.0, left.y + left.height);
        ball.vel = Vec2::new(-4.0, 0.0);

        let step = ball.update(FRAME_MS, &left, &right);
        assert_eq!(step.paddle_hit, Some(Side::Left));

        let angle = ball.vel.y.atan2(ball.vel.x);
        assert!((angle - MAX_BOUNCE_ANGLE).abs() < 1e-4);
        assert!(ball.vel.x > 0.0);

        // Top edge deflects upward
        ball.pos = Vec2::new(left.x + left.width + ball.radius + 2.0, left.y);
        ball.vel = Vec2::new(-4.0, 0.0);
        ball.update(FRAME_MS, &left, &right);
        let angle = ball.vel.y.atan2(ball.vel.x);
        assert!((angle + MAX_BOUNCE_ANGLE).abs() < 1e-4);
    }

    #[test]
    fn test_speed_is_capped() {
        let (mut ball, left, right) = setup();
        ball.speed = BALL_MAX_SPEED - 0.1;
        ball.pos = Vec2::new(right.x - ball.radius - 1.0, right.center_y());
        ball.vel = Vec2::new(2.0, 0.0);

        ball.update(FRAME_MS, &left, &right);
        assert_eq!(ball.speed, BALL_MAX_SPEED);
    }

    #[test]
    fn test_spin_overshoots_speed() {
        let (mut ball, left, mut right) = setup();
        right.velocity = 5.0;
        ball.pos = Vec2::new(right.x - ball.radius - 1.0, right.center_y());
        ball.vel = Vec2::new(BALL_BASE_SPEED, 0.0);

        ball.update(FRAME_MS, &left, &right);
        assert!((ball.vel.y - 5.0 * SPIN_FACTOR).abs() < 1e-5);
        assert!(ball.vel.length() > ball.speed);
    }

    #[test]
    fn test_wall_bounce_reported() {
        let (mut ball, left, right) = setup();
        ball.pos = Vec2::new(FIELD_WIDTH / 2.0, 12.0);
        ball.vel = Vec2::new(3.0, -4.0);

        let step = ball.update(FRAME_MS, &left, &right);
        assert!(step.wall_hit);
        assert_eq!(ball.pos.y, ball.radius);
        assert_eq!(ball.vel.y, 4.0);
    }

    #[test]
    fn test_scoring_sides() {
        let (mut ball, left, right) = setup();
        ball.pos = Vec2::new(-5.0, 40.0);
        ball.vel = Vec2::new(-6.0, 0.0);
        let step = ball.update(FRAME_MS, &left, &right);
        assert_eq!(step.scored, Some(Side::Right));
        // The ball does not reset itself
        assert!(ball.pos.x < 0.0);

        ball.pos = Vec2::new(FIELD_WIDTH + 5.0, 40.0);
        ball.vel = Vec2::new(6.0, 0.0);
        let step = ball.update(FRAME_MS, &left, &right);
        assert_eq!(step.scored, Some(Side::Left));
    }

    #[test]
    fn test_partially_out_is_not_a_score() {
        let (mut ball, left, right) = setup();
        ball.pos = Vec2::new(8.0, 40.0);
        ball.vel = Vec2::new(-6.0, 0.0);
        let step = ball.update(FRAME_MS, &left, &right);
        assert_eq!(ball.pos.x, 2.0);
        assert_eq!(step.scored, None);
    }

    proptest! {
        #[test]
        fn prop_paddle_hit_sends_ball_away(
            offset in -55.0f32..55.0,
            speed in 6.0f32..15.0,
            paddle_vel in -8.0f32..8.0,
            right_side in any::<bool>(),
        ) {
            let (mut ball, mut left, mut right) = setup();
            left.velocity = paddle_vel;
            right.velocity = paddle_vel;
            let target = if right_side { right.clone() } else { left.clone() };

            ball.speed = speed;
            let face_gap = ball.radius + 1.0;
            ball.pos = match target.side {
                Side::Left => Vec2::new(
                    target.x + target.width + face_gap,
                    target.center_y() + offset,
                ),
                Side::Right => Vec2::new(target.x - face_gap, target.center_y() + offset),
            };
            ball.vel = Vec2::new(-target.side.away_sign() * 2.0, 0.0);

            let step = ball.update(FRAME_MS, &left, &right);
            prop_assert_eq!(step.paddle_hit, Some(target.side));
            prop_assert!(ball.vel.x * target.side.away_sign() > 0.0);
            prop_assert_eq!(ball.speed, (speed + BALL_SPEED_INCREMENT).min(BALL_MAX_SPEED));
        }
    }
}
