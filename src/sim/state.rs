//! Match state and core simulation types
//!
//! [`MatchController`] owns every simulated entity. The per-frame update lives
//! in `tick.rs`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::config::MatchConfig;
use super::paddle::{Paddle, Side};
use super::score::ScoreManager;
use super::snapshot::{BallView, PaddleView, Snapshot};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start/resume; nothing moves
    Paused,
    /// Active rally
    Playing,
    /// Short break after a point; paddles move, the ball waits at center
    ScorePause,
    /// A player reached the winning score
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Paused => "paused",
            GamePhase::Playing => "playing",
            GamePhase::ScorePause => "score_pause",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Something that happened during an update, in emission order
///
/// Consumed by audio, particles, and anything else that wants feedback. The
/// simulation never reads these back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall at `pos`
    WallHit { pos: Vec2 },
    /// Ball bounced off a paddle
    PaddleHit { side: Side, pos: Vec2 },
    /// `side` won a point; `pos` is where the ball left the field
    Score { side: Side, pos: Vec2 },
    /// `side` won the match
    Win { side: Side },
    /// Play started or resumed
    Started,
    /// First start of this controller (one-time setup such as audio unlock)
    SessionStarted,
    Paused,
    /// Match reset to its initial state
    Reset,
}

/// Listener for [`GameEvent`]s
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Feed `events` to every sink, in order
pub fn dispatch(events: &[GameEvent], sinks: &mut [&mut dyn EventSink]) {
    for event in events {
        for sink in sinks.iter_mut() {
            sink.on_event(event);
        }
    }
}

/// Owner of the paddles, ball, score, and phase of one match
#[derive(Debug, Clone)]
pub struct MatchController {
    pub config: MatchConfig,
    pub phase: GamePhase,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: ScoreManager,
    /// Time left in the current score pause (ms)
    pub countdown_ms: f32,
    /// Scoring flash, 1.0 right after a point fading to 0.0
    pub flash_intensity: f32,
    /// Debug overlay requested
    pub show_debug: bool,
    /// Simulated frames (zero-length updates are not counted)
    pub frame: u64,
    pub(super) session_started: bool,
    pub(super) rng: Pcg32,
}

impl MatchController {
    /// Create a paused match. `seed` drives ball launch directions.
    pub fn new(config: MatchConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ball = Ball::new(&config.ball, config.field_width, config.field_height);
        ball.reset(&mut rng);

        Self {
            left: Paddle::new(
                Side::Left,
                &config.paddle,
                config.field_width,
                config.field_height,
            ),
            right: Paddle::new(
                Side::Right,
                &config.paddle,
                config.field_width,
                config.field_height,
            ),
            ball,
            score: ScoreManager::new(config.winning_score),
            config,
            phase: GamePhase::Paused,
            countdown_ms: 0.0,
            flash_intensity: 0.0,
            show_debug: false,
            frame: 0,
            session_started: false,
            rng,
        }
    }

    /// Put everything back to the start of a match and pause
    pub fn reset_match(&mut self) {
        self.left.reset();
        self.right.reset();
        self.ball.reset(&mut self.rng);
        self.score.reset();
        self.phase = GamePhase::Paused;
        self.countdown_ms = 0.0;
        self.flash_intensity = 0.0;
        log::info!("Match reset");
    }

    /// Whether the first start has happened
    pub fn session_started(&self) -> bool {
        self.session_started
    }

    /// Read-only view handed to the renderer and HUD
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            field_width: self.config.field_width,
            field_height: self.config.field_height,
            left: PaddleView::from(&self.left),
            right: PaddleView::from(&self.right),
            ball: BallView::from(&self.ball),
            left_score: self.score.score(Side::Left),
            right_score: self.score.score(Side::Right),
            winning_score: self.score.winning_score(),
            winner: self.score.winner(),
            last_scorer: self.score.last_scorer(),
            phase: self.phase,
            countdown_ms: self.countdown_ms,
            flash_intensity: self.flash_intensity,
            show_debug: self.show_debug,
            frame: self.frame,
        }
    }
}
