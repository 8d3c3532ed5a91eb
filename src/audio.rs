//! Audio system using Web Audio API
//!
//! Short procedural beeps, no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::{EventSink, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top or bottom wall
    WallHit,
    /// Point scored
    Score,
    /// Match won
    Win,
    /// Play started or resumed
    Start,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit { .. } => Some(SoundEffect::PaddleHit),
            GameEvent::WallHit { .. } => Some(SoundEffect::WallHit),
            GameEvent::Score { .. } => Some(SoundEffect::Score),
            GameEvent::Win { .. } => Some(SoundEffect::Win),
            GameEvent::Started => Some(SoundEffect::Start),
            GameEvent::SessionStarted | GameEvent::Paused | GameEvent::Reset => None,
        }
    }
}

/// C5, E5, G5, C6
const WIN_NOTES: [f32; 4] = [523.0, 659.0, 784.0, 1047.0];
/// Gap between arpeggio notes (s)
const WIN_NOTE_SPACING: f64 = 0.15;

/// Audio manager for the game
///
/// Browsers only allow an `AudioContext` after a user gesture, so this is
/// created when the first match starts.
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// 0.0 when sound is off
    volume: f32,
}

impl AudioManager {
    /// `volume` is the settings' effective volume (0.0 - 1.0)
    pub fn new(volume: f32) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        } else {
            log::info!("Sound initialized");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::PaddleHit => {
                self.tone(ctx, 440.0, 0.1, OscillatorType::Square, vol * 0.2, 0.0)
            }
            SoundEffect::WallHit => {
                self.tone(ctx, 300.0, 0.05, OscillatorType::Square, vol * 0.15, 0.0)
            }
            SoundEffect::Score => {
                self.tone(ctx, 220.0, 0.3, OscillatorType::Sawtooth, vol * 0.3, 0.0)
            }
            SoundEffect::Win => {
                for (i, freq) in WIN_NOTES.iter().enumerate() {
                    let delay = i as f64 * WIN_NOTE_SPACING;
                    self.tone(ctx, *freq, 0.2, OscillatorType::Square, vol * 0.25, delay);
                }
            }
            SoundEffect::Start => {
                self.tone(ctx, 660.0, 0.1, OscillatorType::Square, vol * 0.2, 0.0)
            }
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// One decaying tone, `delay` seconds from now
    fn tone(
        &self,
        ctx: &AudioContext,
        freq: f32,
        duration: f64,
        osc_type: OscillatorType,
        vol: f32,
        delay: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration).ok();
    }
}

impl EventSink for AudioManager {
    fn on_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}
