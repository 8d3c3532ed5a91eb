//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per display frame, driven by the caller's elapsed time
//! - Seeded RNG only
//! - Results reported as returned events, never by calling out
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod config;
pub mod paddle;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallStep};
pub use collision::{CollisionResult, Rect, ball_wall_collision, bounce_angle, circle_box_overlaps};
pub use config::{BallTuning, MatchConfig, PaddleTuning};
pub use paddle::{Paddle, Side};
pub use score::ScoreManager;
pub use snapshot::{BallView, PaddleView, Snapshot};
pub use state::{EventSink, GameEvent, GamePhase, MatchController, dispatch};
pub use tick::{InputSource, TickInput};
