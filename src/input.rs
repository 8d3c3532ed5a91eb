//! Keyboard handling
//!
//! Tracks which keys are held and turns presses into per-frame
//! [`TickInput`]s. Keys are identified by DOM `KeyboardEvent.code` strings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::{InputSource, TickInput};

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    TogglePause,
    Reset,
    ToggleDebug,
    /// Handled by the app, not the simulation
    ToggleSound,
}

/// Key codes for every action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left_up: String,
    pub left_down: String,
    pub right_up: String,
    pub right_down: String,
    pub toggle_pause: String,
    pub reset: String,
    pub toggle_debug: String,
    pub toggle_sound: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_up: "KeyW".into(),
            left_down: "KeyS".into(),
            right_up: "ArrowUp".into(),
            right_down: "ArrowDown".into(),
            toggle_pause: "Space".into(),
            reset: "KeyR".into(),
            toggle_debug: "KeyD".into(),
            toggle_sound: "KeyM".into(),
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, code: &str) -> Option<KeyAction> {
        let table = [
            (&self.left_up, KeyAction::LeftUp),
            (&self.left_down, KeyAction::LeftDown),
            (&self.right_up, KeyAction::RightUp),
            (&self.right_down, KeyAction::RightDown),
            (&self.toggle_pause, KeyAction::TogglePause),
            (&self.reset, KeyAction::Reset),
            (&self.toggle_debug, KeyAction::ToggleDebug),
            (&self.toggle_sound, KeyAction::ToggleSound),
        ];
        table
            .into_iter()
            .find(|(key, _)| key.as_str() == code)
            .map(|(_, action)| action)
    }

    /// Keys whose browser default (page scrolling) should be suppressed
    pub fn wants_prevent_default(&self, code: &str) -> bool {
        code == self.right_up || code == self.right_down || code == self.toggle_pause
    }
}

/// Held keys plus triggers waiting for the next frame
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    bindings: KeyBindings,
    held: HashSet<String>,
    pending: TickInput,
    toggle_sound: bool,
}

impl KeyboardState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Record a key press. Auto-repeat of an already held key is ignored,
    /// so triggers fire once per press.
    pub fn key_down(&mut self, code: &str) -> Option<KeyAction> {
        if !self.held.insert(code.to_string()) {
            return None;
        }
        let action = self.bindings.action_for(code)?;
        match action {
            KeyAction::TogglePause => self.pending.toggle_pause = true,
            KeyAction::Reset => self.pending.reset = true,
            KeyAction::ToggleDebug => self.pending.toggle_debug = true,
            KeyAction::ToggleSound => self.toggle_sound = true,
            _ => {}
        }
        Some(action)
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    /// Release everything (e.g. the window lost focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    /// Input for the coming frame; latched triggers are consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        let triggers = std::mem::take(&mut self.pending);
        TickInput {
            toggle_pause: triggers.toggle_pause,
            reset: triggers.reset,
            toggle_debug: triggers.toggle_debug,
            ..TickInput::sample(&*self)
        }
    }

    /// Whether a sound toggle was pressed since the last call
    pub fn take_toggle_sound(&mut self) -> bool {
        std::mem::take(&mut self.toggle_sound)
    }
}

impl InputSource for KeyboardState {
    fn left_up(&self) -> bool {
        self.is_held(&self.bindings.left_up)
    }

    fn left_down(&self) -> bool {
        self.is_held(&self.bindings.left_down)
    }

    fn right_up(&self) -> bool {
        self.is_held(&self.bindings.right_up)
    }

    fn right_down(&self) -> bool {
        self.is_held(&self.bindings.right_down)
    }
}
