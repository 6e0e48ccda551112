//! # Input Module
//!
//! The per-tick map of logical actions the simulation consumes, and the
//! keyboard adapter that fills it. The simulation never polls a device
//! itself, so a test, a replay or a network peer can drive it equally well.

use macroquad::prelude::*;
use serde::{Deserialize, Serialize};

/// Logical actions for a single tick.
///
/// Movement flags reflect held keys; the others are edge-triggered and only
/// set on the frame the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub attack: bool,
    pub special: bool,
    pub interact: bool,
    pub use_potion: bool,
    pub pause: bool,
}

impl InputState {
    /// No actions.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Horizontal intent: -1, 0 or 1. Opposing keys cancel out.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_heroes::InputState;
    ///
    /// let both = InputState { move_left: true, move_right: true, ..InputState::idle() };
    /// assert_eq!(both.horizontal(), 0.0);
    /// ```
    pub fn horizontal(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Menu-level commands outside the simulation tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    SelectHero(&'static str),
    Save,
    Load,
    Restart,
    Quit,
}

/// Keyboard adapter for macroquad.
pub struct InputHandler {
    /// Whether WASD works alongside the arrow keys
    pub wasd_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self { wasd_enabled: true }
    }

    /// Reads the keyboard into an [`InputState`] for this frame.
    pub fn poll(&self) -> InputState {
        let held = |primary: KeyCode, alternate: KeyCode| {
            is_key_down(primary) || (self.wasd_enabled && is_key_down(alternate))
        };
        InputState {
            move_left: held(KeyCode::Left, KeyCode::A),
            move_right: held(KeyCode::Right, KeyCode::D),
            jump: is_key_pressed(KeyCode::Space)
                || is_key_pressed(KeyCode::Up)
                || (self.wasd_enabled && is_key_pressed(KeyCode::W)),
            attack: is_key_pressed(KeyCode::J) || is_mouse_button_pressed(MouseButton::Left),
            special: is_key_pressed(KeyCode::K) || is_mouse_button_pressed(MouseButton::Right),
            interact: is_key_pressed(KeyCode::E),
            use_potion: is_key_pressed(KeyCode::Q),
            pause: is_key_pressed(KeyCode::P) || is_key_pressed(KeyCode::Escape),
        }
    }

    /// Reads menu keys that act outside the tick.
    pub fn poll_menu(&self) -> Option<MenuCommand> {
        if is_key_pressed(KeyCode::Key1) {
            return Some(MenuCommand::SelectHero("knight"));
        }
        if is_key_pressed(KeyCode::Key2) {
            return Some(MenuCommand::SelectHero("cleric"));
        }
        if is_key_pressed(KeyCode::Key3) {
            return Some(MenuCommand::SelectHero("archer"));
        }
        if is_key_pressed(KeyCode::F5) {
            return Some(MenuCommand::Save);
        }
        if is_key_pressed(KeyCode::F9) {
            return Some(MenuCommand::Load);
        }
        if is_key_pressed(KeyCode::R) {
            return Some(MenuCommand::Restart);
        }
        if is_key_pressed(KeyCode::F10) {
            return Some(MenuCommand::Quit);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_intent() {
        let input = InputState::idle();
        assert_eq!(input.horizontal(), 0.0);
        assert!(!input.attack && !input.pause);
    }

    #[test]
    fn test_horizontal() {
        let left = InputState {
            move_left: true,
            ..InputState::idle()
        };
        let right = InputState {
            move_right: true,
            ..InputState::idle()
        };
        assert_eq!(left.horizontal(), -1.0);
        assert_eq!(right.horizontal(), 1.0);
    }
}
