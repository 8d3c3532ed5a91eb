//! HUD text
//!
//! Everything here is a pure function of a [`Snapshot`]; the browser entry
//! point writes the strings into DOM elements.

use crate::sim::{GamePhase, Side, Snapshot};

/// Control reminder shown under the playfield
pub const CONTROLS: &str = "P1: W/S | P2: \u{2191}/\u{2193} | SPACE: Pause | M: Sound | D: Debug | R: Reset";

/// Headline for the current phase, empty during a rally
pub fn status_text(snap: &Snapshot) -> String {
    match snap.phase {
        GamePhase::Paused => "PAUSED - press SPACE".to_string(),
        GamePhase::Playing => String::new(),
        GamePhase::ScorePause => match snap.last_scorer {
            Some(side) => format!("{} scores!", side.player_name()),
            None => String::new(),
        },
        GamePhase::GameOver => match snap.winner {
            Some(side) => format!("{} Wins!", side.player_name()),
            None => "Game Over".to_string(),
        },
    }
}

/// Secondary line under the headline
pub fn prompt_text(snap: &Snapshot) -> &'static str {
    match snap.phase {
        GamePhase::GameOver => "Press R to play again",
        GamePhase::Paused if snap.frame == 0 => "First to the winning score takes the match",
        _ => "",
    }
}

/// "left - right"
pub fn score_text(snap: &Snapshot) -> String {
    format!("{} - {}", snap.left_score, snap.right_score)
}

pub fn side_score_text(snap: &Snapshot, side: Side) -> String {
    snap.score(side).to_string()
}

pub fn target_text(snap: &Snapshot) -> String {
    format!("First to {}", snap.winning_score)
}

/// Debug overlay, one entry per line
pub fn debug_lines(snap: &Snapshot, fps: u32, particles: usize, sound: bool) -> Vec<String> {
    vec![
        format!("FPS: {fps}"),
        format!("State: {}", snap.phase.as_str()),
        format!("Frame: {}", snap.frame),
        format!("P1 Y: {:.0} V: {:.2}", snap.left.y, snap.left.velocity),
        format!("P2 Y: {:.0} V: {:.2}", snap.right.y, snap.right.velocity),
        format!(
            "Ball: ({:.0}, {:.0}) V: ({:.2}, {:.2})",
            snap.ball.x, snap.ball.y, snap.ball.vx, snap.ball.vy
        ),
        format!("Ball Speed: {:.2}", snap.ball.speed),
        format!("Particles: {particles}"),
        format!("Sound: {}", if sound { "ON" } else { "OFF" }),
    ]
}
