//! Particle effects
//!
//! Bursts spawned from [`GameEvent`]s. Purely cosmetic: particles never touch
//! the simulation and use their own RNG so they cannot disturb replays.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::renderer::colors;
use crate::sim::{EventSink, GameEvent, Side};

/// Maximum live particles
pub const MAX_PARTICLES: usize = 512;

const PADDLE_BURST: usize = 12;
const SCORE_BURST: usize = 20;
const WIN_BURST: usize = 30;
/// Height of the score digits the win burst is centered on
const SCORE_Y: f32 = 80.0;

const GRAVITY: f32 = 0.1;
const FRICTION: f32 = 0.99;

/// A single spark
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    /// Remaining life (ms)
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    /// Fades linearly with remaining life
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    fn update(&mut self, dt_ms: f32) {
        self.pos += self.vel;
        self.life -= dt_ms;
        self.vel.y += GRAVITY;
        self.vel.x *= FRICTION;
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    field_width: f32,
    enabled: bool,
}

impl ParticleSystem {
    pub fn new(field_width: f32, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            field_width,
            enabled: true,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Disabling also drops whatever is on screen
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear();
        }
    }

    /// Spawn `count` particles radiating from `pos`
    pub fn burst(&mut self, pos: Vec2, count: usize, color: [f32; 4]) {
        if !self.enabled || count == 0 {
            return;
        }
        let step = std::f32::consts::TAU / count as f32;
        for i in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = step * i as f32 + self.rng.random_range(0.0..0.5);
            let speed = self.rng.random_range(2.0..6.0);
            let life = self.rng.random_range(300.0..700.0);
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                color,
                life,
                max_life: life,
                size: self.rng.random_range(3.0..7.0),
            });
        }
    }

    /// Advance every particle one frame and drop the expired ones
    pub fn update(&mut self, dt_ms: f32) {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        for particle in &mut self.particles {
            particle.update(dt_ms);
        }
        self.particles.retain(|p| !p.is_dead());
    }

    fn side_color(side: Side) -> [f32; 4] {
        match side {
            Side::Left => colors::LEFT_ACCENT,
            Side::Right => colors::RIGHT_ACCENT,
        }
    }

    /// Where a side's score is drawn
    fn score_anchor(&self, side: Side) -> Vec2 {
        let x = match side {
            Side::Left => self.field_width / 4.0,
            Side::Right => self.field_width * 0.75,
        };
        Vec2::new(x, SCORE_Y)
    }
}

impl EventSink for ParticleSystem {
    fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::PaddleHit { side, pos } => {
                self.burst(pos, PADDLE_BURST, Self::side_color(side));
            }
            GameEvent::Score { side, pos } => {
                self.burst(pos, SCORE_BURST, Self::side_color(side));
            }
            GameEvent::Win { side } => {
                let anchor = self.score_anchor(side);
                self.burst(anchor, WIN_BURST, colors::GOLD);
            }
            GameEvent::Reset => self.clear(),
            GameEvent::WallHit { .. }
            | GameEvent::Started
            | GameEvent::SessionStarted
            | GameEvent::Paused => {}
        }
    }
}
