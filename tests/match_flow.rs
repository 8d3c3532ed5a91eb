//! Whole-match scenarios through the public API

use duel_pong::consts::*;
use duel_pong::effects::ParticleSystem;
use duel_pong::input::{KeyBindings, KeyboardState};
use duel_pong::sim::{
    EventSink, GameEvent, GamePhase, MatchConfig, MatchController, Side, TickInput, dispatch,
};
use duel_pong::{Settings, hud};
use glam::Vec2;

#[derive(Default)]
struct Recorder(Vec<GameEvent>);

impl EventSink for Recorder {
    fn on_event(&mut self, event: &GameEvent) {
        self.0.push(*event);
    }
}

fn started(config: MatchConfig, seed: u64) -> MatchController {
    let mut game = MatchController::new(config, seed);
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    game.update(FRAME_MS, &start);
    assert_eq!(game.phase, GamePhase::Playing);
    game
}

/// Wait out any score pause, then send the ball out past `side`'s opponent
fn score_point(game: &mut MatchController, side: Side) -> Vec<GameEvent> {
    let mut waited = 0;
    while game.phase == GamePhase::ScorePause {
        game.update(FRAME_MS, &TickInput::default());
        waited += 1;
        assert!(waited < 1000, "score pause never ended");
    }

    let y = game.config.field_height / 2.0;
    let speed = game.ball.speed;
    match side {
        Side::Left => {
            game.ball.pos = Vec2::new(game.config.field_width + 5.0, y);
            game.ball.vel = Vec2::new(speed, 0.0);
        }
        Side::Right => {
            game.ball.pos = Vec2::new(-5.0, y);
            game.ball.vel = Vec2::new(-speed, 0.0);
        }
    }
    game.update(FRAME_MS, &TickInput::default())
}

#[test]
fn test_shutout_to_eleven() {
    let mut game = started(MatchConfig::default(), 21);
    let mut particles = ParticleSystem::new(FIELD_WIDTH, 21);
    let mut recorder = Recorder::default();

    for point in 1..=WINNING_SCORE {
        let events = score_point(&mut game, Side::Left);
        dispatch(&events, &mut [&mut particles, &mut recorder]);
        assert!(matches!(
            events.first(),
            Some(GameEvent::Score {
                side: Side::Left,
                ..
            })
        ));
        if point < WINNING_SCORE {
            assert_eq!(game.phase, GamePhase::ScorePause);
            assert_eq!(game.flash_intensity, 1.0);
        }
    }

    assert_eq!(game.phase, GamePhase::GameOver);
    assert_eq!(game.score.score_string(), "11 - 0");
    assert_eq!(game.score.winner(), Some(Side::Left));
    assert_eq!(
        recorder.0.last(),
        Some(&GameEvent::Win { side: Side::Left })
    );
    let scores = recorder
        .0
        .iter()
        .filter(|e| matches!(e, GameEvent::Score { .. }))
        .count();
    assert_eq!(scores as u32, WINNING_SCORE);
    assert!(!particles.is_empty());

    let snap = game.snapshot();
    assert_eq!(hud::status_text(&snap), "Player 1 Wins!");
    assert_eq!(hud::score_text(&snap), "11 - 0");

    // Frozen until reset
    let toggle = TickInput {
        toggle_pause: true,
        ..Default::default()
    };
    assert!(game.update(FRAME_MS, &toggle).is_empty());
    assert_eq!(game.snapshot().ball, snap.ball);
}

#[test]
fn test_reset_after_game_over() {
    let mut game = started(MatchConfig::default().with_winning_score(2), 4);
    score_point(&mut game, Side::Right);
    score_point(&mut game, Side::Right);
    assert_eq!(game.phase, GamePhase::GameOver);
    assert_eq!(game.score.score_string(), "0 - 2");

    let mut particles = ParticleSystem::new(FIELD_WIDTH, 4);
    particles.on_event(&GameEvent::Win { side: Side::Right });

    let reset = TickInput {
        reset: true,
        ..Default::default()
    };
    let events = game.update(FRAME_MS, &reset);
    dispatch(&events, &mut [&mut particles]);

    assert_eq!(events, vec![GameEvent::Reset]);
    assert!(particles.is_empty());
    assert_eq!(game.phase, GamePhase::Paused);
    assert_eq!(game.score.score_string(), "0 - 0");
    assert_eq!(game.score.winner(), None);

    // A restarted match is not a new session
    let events = game.update(
        FRAME_MS,
        &TickInput {
            toggle_pause: true,
            ..Default::default()
        },
    );
    assert_eq!(events.first(), Some(&GameEvent::Started));
    assert!(!events.contains(&GameEvent::SessionStarted));
}

#[test]
fn test_rally_off_left_paddle_center() {
    let mut game = started(MatchConfig::default(), 8);
    let face = game.left.x + game.left.width;
    game.ball.pos = Vec2::new(face + game.ball.radius + 1.0, game.left.center_y());
    game.ball.vel = Vec2::new(-BALL_BASE_SPEED, 0.0);

    let events = game.update(FRAME_MS, &TickInput::default());

    assert!(matches!(
        events.as_slice(),
        [GameEvent::PaddleHit {
            side: Side::Left,
            ..
        }]
    ));
    assert_eq!(game.ball.pos.x, face + game.ball.radius);
    assert!(game.ball.vel.x > 0.0);
    assert!(game.ball.vel.y.abs() < 1e-4);
    assert_eq!(game.ball.speed, BALL_BASE_SPEED + BALL_SPEED_INCREMENT);
    assert_eq!(game.ball.last_hit_by, Some(Side::Left));
}

#[test]
fn test_score_pause_resumes_play() {
    let mut game = started(MatchConfig::default(), 13);
    score_point(&mut game, Side::Right);
    assert_eq!(game.phase, GamePhase::ScorePause);
    let ball_at_pause = game.ball.pos;

    // Half the pause: ball waits, flash fades with the countdown
    for _ in 0..30 {
        game.update(FRAME_MS, &TickInput::default());
    }
    assert_eq!(game.phase, GamePhase::ScorePause);
    assert_eq!(game.ball.pos, ball_at_pause);
    assert!(game.flash_intensity > 0.4 && game.flash_intensity < 0.6);

    for _ in 0..31 {
        game.update(FRAME_MS, &TickInput::default());
    }
    assert_eq!(game.phase, GamePhase::Playing);
    assert_eq!(game.countdown_ms, 0.0);

    game.update(FRAME_MS, &TickInput::default());
    assert_ne!(game.ball.pos, ball_at_pause);
}

#[test]
fn test_zero_elapsed_frames_still_take_triggers() {
    let mut game = MatchController::new(MatchConfig::default(), 2);
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    let events = game.update(0.0, &start);
    assert_eq!(events, vec![GameEvent::SessionStarted, GameEvent::Started]);
    assert_eq!(game.phase, GamePhase::Playing);

    let before = game.snapshot();
    assert!(game.update(0.0, &TickInput::default()).is_empty());
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_keyboard_drives_match() {
    let mut game = MatchController::new(MatchConfig::default(), 3);
    let mut keys = KeyboardState::new(KeyBindings::default());

    keys.key_down("Space");
    let events = game.update(FRAME_MS, &keys.take_tick_input());
    assert_eq!(events[..2], [GameEvent::SessionStarted, GameEvent::Started]);
    keys.key_up("Space");

    let start_y = game.left.y;
    keys.key_down("KeyW");
    for _ in 0..10 {
        game.update(FRAME_MS, &keys.take_tick_input());
    }
    assert!(game.left.y < start_y);
    assert_eq!(game.right.y, start_y);

    keys.key_down("Space");
    let events = game.update(FRAME_MS, &keys.take_tick_input());
    assert_eq!(events, vec![GameEvent::Paused]);
}

#[test]
fn test_settings_shape_the_match() {
    let settings = Settings {
        winning_score: 3,
        ..Default::default()
    };
    let mut game = started(settings.match_config(), 17);
    for _ in 0..3 {
        score_point(&mut game, Side::Right);
    }
    assert_eq!(game.phase, GamePhase::GameOver);
    assert_eq!(game.score.winner(), Some(Side::Right));
    assert_eq!(hud::target_text(&game.snapshot()), "First to 3");
}

#[test]
fn test_snapshot_serializes() {
    let game = MatchController::new(MatchConfig::default(), 1);
    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["phase"], "Paused");
    assert_eq!(json["left_score"], 0);
    assert_eq!(json["winning_score"], WINNING_SCORE);
}
