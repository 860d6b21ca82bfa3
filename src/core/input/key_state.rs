//=========================================================================
// Key State
//=========================================================================
//
// Continuous input state with per-frame deltas.
//
// Architecture:
//   InputEvent → apply() → HashSet (keys/buttons held) → query
//
// Frame lifecycle: begin_frame() → apply() per event → snapshot → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== KeyState ============================================================

/// Tracks held keys and buttons plus what changed during the current frame.
///
/// Scenes receive a read-only snapshot alongside the frame's events; the
/// platform side owns the live copy and updates it as events are collected.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Deltas (reset by begin_frame()) ---------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
}

impl KeyState {
    /// Creates an empty key state (nothing held).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state with the given keys held, mostly useful in tests.
    pub fn with_keys_down(keys: &[KeyCode]) -> Self {
        let mut state = Self::new();
        for &key in keys {
            state.apply(&InputEvent::key_down(key));
        }
        state
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears the pressed/released deltas of the previous frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Folds one event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.insert(*key) {
                    self.keys_pressed.insert(*key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released.insert(*key);
                }
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                self.buttons_down.insert(*button);
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                self.buttons_down.remove(button);
            }

            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
            }

            InputEvent::CloseRequested => {}
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` while the key is held.
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if any of the given keys is held.
    pub fn any_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.keys_down.contains(key))
    }

    /// Returns `true` if the key went UP → DOWN during the current frame.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns `true` if the key went DOWN → UP during the current frame.
    pub fn is_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Returns `true` while the mouse button is held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Last known cursor position.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Modifier state reported with the most recent key or button event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Number of keys currently held.
    pub fn held_count(&self) -> usize {
        self.keys_down.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
