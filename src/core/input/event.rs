//=========================================================================
// Input Event Types
//
// Portable representation of the discrete input a scene can receive.
//
// The platform layer (winit, or the headless feed used in tests) turns
// its native events into `InputEvent`s. The driver drains them once per
// frame, removes quit signals and hands the rest to the active scene in
// arrival order.
//
// Event Flow:
// ```text
// Platform Layer (winit / headless feed)
//         ↓
//    InputEvent (this module)
//         ↓
//    KeyState (held keys) + InputFilter (quit detection)
//         ↓
//    Scene::process_input()
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// Left and right modifier keys are distinct so that chords such as
/// "either Ctrl + Q" can be expressed against held-key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Modifier Keys ----------------------------------------------------

    ControlLeft,
    ControlRight,
    ShiftLeft,
    ShiftRight,
    AltLeft,
    AltRight,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt) at the time of an event.
///
/// The system does not distinguish between left/right variants here;
/// use [`KeyState`](super::KeyState) when the physical key matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift key held (either left or right).
    pub shift: bool,

    /// Ctrl key held (either left or right, Command on macOS).
    pub ctrl: bool,

    /// Alt key held (either left or right, Option on macOS).
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Alt only.
    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

//=== InputEvent ==========================================================

/// Low-level input event delivered to the driver once per frame.
///
/// # Event Types
///
/// - **KeyDown/KeyUp**: keyboard transitions with modifier state
/// - **MouseButtonDown/MouseButtonUp**: mouse button transitions
/// - **MouseMoved**: cursor position (coalesced per frame by the platform)
/// - **CloseRequested**: the window system asked the application to quit
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Key released.
    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Mouse button pressed.
    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Mouse button released.
    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Mouse cursor moved to a new position (screen space, top-left origin).
    MouseMoved { x: f32, y: f32 },

    /// Window close button, OS shutdown request, or a lost platform.
    CloseRequested,
}

impl InputEvent {
    /// Key-down event without modifiers.
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Key-up event without modifiers.
    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyUp {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Returns the key carried by a keyboard event.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown { key, .. } | Self::KeyUp { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// Returns `true` for a key-down event of the given key.
    pub fn is_key_down(&self, expected: KeyCode) -> bool {
        matches!(self, Self::KeyDown { key, .. } if *key == expected)
    }

    /// Returns `true` for continuous events (coalesced by the platform).
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_accessor_only_for_keyboard_events() {
        assert_eq!(InputEvent::key_down(KeyCode::Space).key(), Some(KeyCode::Space));
        assert_eq!(InputEvent::key_up(KeyCode::KeyQ).key(), Some(KeyCode::KeyQ));
        assert_eq!(InputEvent::MouseMoved { x: 1.0, y: 2.0 }.key(), None);
        assert_eq!(InputEvent::CloseRequested.key(), None);
    }

    #[test]
    fn is_key_down_matches_key_and_direction() {
        let event = InputEvent::key_down(KeyCode::ArrowRight);
        assert!(event.is_key_down(KeyCode::ArrowRight));
        assert!(!event.is_key_down(KeyCode::ArrowLeft));
        assert!(!InputEvent::key_up(KeyCode::ArrowRight).is_key_down(KeyCode::ArrowRight));
    }

    #[test]
    fn is_key_down_ignores_modifiers() {
        let event = InputEvent::KeyDown {
            key: KeyCode::KeyS,
            modifiers: Modifiers::CTRL,
        };
        assert!(event.is_key_down(KeyCode::KeyS));
    }

    #[test]
    fn only_mouse_motion_is_continuous() {
        assert!(InputEvent::MouseMoved { x: 0.0, y: 0.0 }.is_continuous());
        assert!(!InputEvent::CloseRequested.is_continuous());
        assert!(!InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        }
        .is_continuous());
    }

    #[test]
    fn modifiers_default_to_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
