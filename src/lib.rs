//! Duel Pong - two-player keyboard Pong
//!
//! Core modules:
//! - `sim`: Simulation core (paddles, ball, scoring, match state machine)
//! - `input`: Keyboard state and key bindings feeding the simulation
//! - `renderer`: WebGPU rendering of simulation snapshots
//! - `effects`: Particle feedback driven by simulation events
//! - `audio`: Web Audio beeps (wasm only)
//! - `hud`: Score, status, and debug text
//! - `settings`: Persisted player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod effects;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{EventSink, GameEvent, GamePhase, MatchConfig, MatchController, Side, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Nominal frame time (ms) the per-frame motion is tuned for
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Largest elapsed time fed to the simulation in one frame
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Playfield dimensions (origin top-left, y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between a paddle and its side of the field
    pub const PADDLE_OFFSET: f32 = 30.0;
    /// Velocity change per frame while a direction is held
    pub const PADDLE_ACCELERATION: f32 = 0.8;
    pub const PADDLE_MAX_SPEED: f32 = 8.0;
    /// Multiplicative velocity damping applied every frame
    pub const PADDLE_FRICTION: f32 = 0.85;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 6.0;
    pub const BALL_MAX_SPEED: f32 = 15.0;
    /// Speed gained on every paddle hit
    pub const BALL_SPEED_INCREMENT: f32 = 0.5;
    /// Steepest deflection off a paddle edge (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
    /// Share of paddle velocity transferred to the ball on contact
    pub const SPIN_FACTOR: f32 = 0.3;

    /// Match rules
    pub const WINNING_SCORE: u32 = 11;
    /// Pause after each point before play resumes (ms)
    pub const SCORE_PAUSE_MS: f32 = 1000.0;
    /// Time for a full flash to fade out during play (ms)
    pub const FLASH_DECAY_MS: f32 = 500.0;
}
