//! Per-frame simulation step
//!
//! Advances a [`MatchController`] by one display frame: lifecycle triggers
//! first, then paddles, ball, scoring, and timers.

use super::paddle::Side;
use super::state::{GameEvent, GamePhase, MatchController};

/// Held-direction queries, sampled once per frame (level-triggered)
pub trait InputSource {
    fn left_up(&self) -> bool;
    fn left_down(&self) -> bool;
    fn right_up(&self) -> bool;
    fn right_down(&self) -> bool;
}

/// Input for a single frame
///
/// Directions are held-key state. The remaining flags are one-shot triggers
/// and must be cleared by the caller once the frame has been processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
    /// Start or resume from Paused
    pub start: bool,
    /// Pause a running rally
    pub pause: bool,
    /// Pause when playing, start when paused
    pub toggle_pause: bool,
    /// Back to a fresh, paused match
    pub reset: bool,
    pub toggle_debug: bool,
}

impl TickInput {
    /// Directions from `source`, no triggers
    pub fn sample<S: InputSource + ?Sized>(source: &S) -> Self {
        Self {
            left_up: source.left_up(),
            left_down: source.left_down(),
            right_up: source.right_up(),
            right_down: source.right_down(),
            ..Default::default()
        }
    }
}

impl InputSource for TickInput {
    fn left_up(&self) -> bool {
        self.left_up
    }

    fn left_down(&self) -> bool {
        self.left_down
    }

    fn right_up(&self) -> bool {
        self.right_up
    }

    fn right_down(&self) -> bool {
        self.right_down
    }
}

/// Elapsed time usable by the simulation; anything but a finite positive
/// value counts as no time at all
#[inline]
fn sanitize_elapsed(elapsed_ms: f32) -> f32 {
    if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        elapsed_ms
    } else {
        0.0
    }
}

impl MatchController {
    /// Advance the match by `elapsed_ms` and return what happened
    ///
    /// A zero-length frame moves nothing and changes no timer, but triggers
    /// in `input` are still honored.
    pub fn update(&mut self, elapsed_ms: f32, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.apply_triggers(input, &mut events);

        let dt = sanitize_elapsed(elapsed_ms);
        if dt == 0.0 {
            return events;
        }

        match self.phase {
            GamePhase::Playing => {
                self.frame += 1;
                self.step_playing(dt, input, &mut events);
            }
            GamePhase::ScorePause => {
                self.frame += 1;
                self.step_score_pause(dt, input);
            }
            GamePhase::Paused | GamePhase::GameOver => {}
        }

        events
    }

    /// Start or resume play. Only valid while paused.
    pub fn start(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::Paused {
            return;
        }
        if !self.session_started {
            self.session_started = true;
            log::info!("Session started");
            events.push(GameEvent::SessionStarted);
        }
        self.phase = GamePhase::Playing;
        log::debug!("Paused -> Playing");
        events.push(GameEvent::Started);
    }

    /// Pause a running rally. Ignored in every other phase.
    pub fn pause(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Paused;
        log::debug!("Playing -> Paused");
        events.push(GameEvent::Paused);
    }

    fn apply_triggers(&mut self, input: &TickInput, events: &mut Vec<GameEvent>) {
        if input.reset {
            self.reset_match();
            events.push(GameEvent::Reset);
        }
        if input.pause {
            self.pause(events);
        }
        if input.toggle_pause {
            match self.phase {
                GamePhase::Playing => self.pause(events),
                GamePhase::Paused => self.start(events),
                GamePhase::ScorePause | GamePhase::GameOver => {}
            }
        }
        if input.start {
            self.start(events);
        }
        if input.toggle_debug {
            self.show_debug = !self.show_debug;
            log::debug!("Debug overlay: {}", self.show_debug);
        }
    }

    fn apply_paddle_input(&mut self, input: &TickInput) {
        if input.left_up() {
            self.left.move_up();
        }
        if input.left_down() {
            self.left.move_down();
        }
        if input.right_up() {
            self.right.move_up();
        }
        if input.right_down() {
            self.right.move_down();
        }
    }

    fn step_playing(&mut self, dt: f32, input: &TickInput, events: &mut Vec<GameEvent>) {
        self.apply_paddle_input(input);
        self.left.update(dt);
        self.right.update(dt);

        let step = self.ball.update(dt, &self.left, &self.right);
        if step.wall_hit {
            events.push(GameEvent::WallHit { pos: self.ball.pos });
        }
        if let Some(side) = step.paddle_hit {
            events.push(GameEvent::PaddleHit {
                side,
                pos: self.ball.pos,
            });
        }

        match step.scored {
            Some(side) => self.handle_score(side, events),
            None => {
                self.flash_intensity =
                    (self.flash_intensity - dt / self.config.flash_decay_ms).max(0.0);
            }
        }
    }

    fn step_score_pause(&mut self, dt: f32, input: &TickInput) {
        self.countdown_ms -= dt;
        self.flash_intensity = (self.countdown_ms / self.config.score_pause_ms).clamp(0.0, 1.0);

        self.apply_paddle_input(input);
        self.left.update(dt);
        self.right.update(dt);

        if self.countdown_ms <= 0.0 {
            self.countdown_ms = 0.0;
            self.phase = GamePhase::Playing;
            log::debug!("ScorePause -> Playing");
        }
    }

    fn handle_score(&mut self, side: Side, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::Score {
            side,
            pos: self.ball.pos,
        });

        let game_over = self.score.add_point(side);
        self.ball.reset(&mut self.rng);
        self.left.reset();
        self.right.reset();

        log::info!(
            "Point to {} ({})",
            side.player_name(),
            self.score.score_string()
        );

        if game_over {
            self.phase = GamePhase::GameOver;
            log::info!("{} wins {}", side.player_name(), self.score.score_string());
            events.push(GameEvent::Win { side });
        } else {
            self.phase = GamePhase::ScorePause;
            self.countdown_ms = self.config.score_pause_ms;
            self.flash_intensity = 1.0;
        }
    }
}
