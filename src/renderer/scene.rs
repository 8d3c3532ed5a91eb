//! Scene assembly
//!
//! Turns a [`Snapshot`] plus live particles into one triangle list, back to
//! front.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::effects::Particle;
use crate::sim::{GamePhase, PaddleView, Side, Snapshot};

const BALL_SEGMENTS: u32 = 24;
const NET_WIDTH: f32 = 2.0;
const NET_DASH: f32 = 10.0;
/// Peak alpha of the score flash
const FLASH_ALPHA: f32 = 0.3;
const PAUSE_PANEL_SIZE: (f32, f32) = (300.0, 120.0);

pub fn build_scene(snap: &Snapshot, particles: &[Particle]) -> Vec<Vertex> {
    let (w, h) = (snap.field_width, snap.field_height);
    let mut vertices = shapes::rect(0.0, 0.0, w, h, colors::FIELD);

    // Particles behind everything else
    for p in particles {
        vertices.extend(shapes::square(
            p.pos,
            p.size,
            with_alpha(p.color, p.color[3] * p.alpha()),
        ));
    }

    vertices.extend(score_flash(snap));
    vertices.extend(shapes::dashed_vline(
        w / 2.0,
        0.0,
        h,
        NET_WIDTH,
        NET_DASH,
        NET_DASH,
        colors::NET,
    ));

    vertices.extend(paddle(&snap.left));
    vertices.extend(paddle(&snap.right));
    vertices.extend(shapes::circle(
        Vec2::new(snap.ball.x, snap.ball.y),
        snap.ball.radius,
        colors::BALL,
        BALL_SEGMENTS,
    ));

    match snap.phase {
        GamePhase::Paused => {
            let (pw, ph) = PAUSE_PANEL_SIZE;
            vertices.extend(shapes::rect(
                (w - pw) / 2.0,
                (h - ph) / 2.0,
                pw,
                ph,
                colors::PAUSE_PANEL,
            ));
        }
        GamePhase::GameOver => vertices.extend(shapes::rect(0.0, 0.0, w, h, colors::OVERLAY)),
        GamePhase::Playing | GamePhase::ScorePause => {}
    }

    vertices
}

fn paddle(view: &PaddleView) -> Vec<Vertex> {
    shapes::rect(view.x, view.y, view.width, view.height, colors::PADDLE)
}

/// Light up the half of the field belonging to whoever scored last
fn score_flash(snap: &Snapshot) -> Vec<Vertex> {
    let Some(side) = snap.last_scorer else {
        return Vec::new();
    };
    if snap.flash_intensity <= 0.0 {
        return Vec::new();
    }

    let half = snap.field_width / 2.0;
    let x = match side {
        Side::Left => 0.0,
        Side::Right => half,
    };
    let color = with_alpha(colors::FLASH, snap.flash_intensity.min(1.0) * FLASH_ALPHA);
    shapes::rect(x, 0.0, half, snap.field_height, color)
}
