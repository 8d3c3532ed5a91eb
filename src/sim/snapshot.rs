//! Render snapshot
//!
//! A plain copy of everything a renderer or HUD may draw. Nothing here feeds
//! back into the simulation.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::{Paddle, Side};
use super::state::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
}

impl From<&Paddle> for PaddleView {
    fn from(paddle: &Paddle) -> Self {
        Self {
            side: paddle.side,
            x: paddle.x,
            y: paddle.y,
            width: paddle.width,
            height: paddle.height,
            velocity: paddle.velocity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub vx: f32,
    pub vy: f32,
    pub speed: f32,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            x: ball.pos.x,
            y: ball.pos.y,
            radius: ball.radius,
            vx: ball.vel.x,
            vy: ball.vel.y,
            speed: ball.speed,
        }
    }
}

/// One frame's worth of drawable state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub field_width: f32,
    pub field_height: f32,
    pub left: PaddleView,
    pub right: PaddleView,
    pub ball: BallView,
    pub left_score: u32,
    pub right_score: u32,
    pub winning_score: u32,
    pub winner: Option<Side>,
    pub last_scorer: Option<Side>,
    pub phase: GamePhase,
    pub countdown_ms: f32,
    pub flash_intensity: f32,
    pub show_debug: bool,
    pub frame: u64,
}

impl Snapshot {
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }
}
