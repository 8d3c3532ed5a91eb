//! Match tuning
//!
//! Everything the simulation needs to know about field size, paddle and ball
//! handling, and match rules. Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Paddle handling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleTuning {
    pub width: f32,
    pub height: f32,
    /// Distance from the paddle's outer edge to its side of the field
    pub offset: f32,
    pub acceleration: f32,
    pub max_speed: f32,
    pub friction: f32,
}

impl Default for PaddleTuning {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            offset: PADDLE_OFFSET,
            acceleration: PADDLE_ACCELERATION,
            max_speed: PADDLE_MAX_SPEED,
            friction: PADDLE_FRICTION,
        }
    }
}

/// Ball handling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallTuning {
    pub radius: f32,
    pub base_speed: f32,
    pub max_speed: f32,
    pub speed_increment: f32,
    /// Deflection (radians) for a hit on the very edge of a paddle
    pub max_bounce_angle: f32,
    pub spin_factor: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            base_speed: BALL_BASE_SPEED,
            max_speed: BALL_MAX_SPEED,
            speed_increment: BALL_SPEED_INCREMENT,
            max_bounce_angle: MAX_BOUNCE_ANGLE,
            spin_factor: SPIN_FACTOR,
        }
    }
}

/// Complete match configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle: PaddleTuning,
    pub ball: BallTuning,
    pub winning_score: u32,
    pub score_pause_ms: f32,
    pub flash_decay_ms: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle: PaddleTuning::default(),
            ball: BallTuning::default(),
            winning_score: WINNING_SCORE,
            score_pause_ms: SCORE_PAUSE_MS,
            flash_decay_ms: FLASH_DECAY_MS,
        }
    }
}

impl MatchConfig {
    /// Same config with a different winning threshold (at least 1)
    pub fn with_winning_score(mut self, winning_score: u32) -> Self {
        self.winning_score = winning_score.max(1);
        self
    }
}
