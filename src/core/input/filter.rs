//=========================================================================
// Input Filter
//=========================================================================
//
// Separates termination intent from ordinary scene input.
//
// A quit signal is either a `CloseRequested` event or any event that
// arrives while the quit chord (default: either Ctrl + Q) is held. Quit
// signals are consumed here; scenes never see them.
//
// The chord counts as held if it is held after the pump, or at the moment
// an event arrives. The second check replays the frame's events over the
// keys held when the frame started, so a chord pressed and released within
// one frame still quits.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};
use super::key_state::KeyState;

//=== QuitChord ===========================================================

/// Key combination that turns any event into a quit signal while held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuitChord {
    /// At least one of these must be held (e.g. left or right Ctrl).
    pub modifier_keys: Vec<KeyCode>,

    /// This key must be held as well.
    pub key: KeyCode,
}

impl QuitChord {
    pub fn new(modifier_keys: Vec<KeyCode>, key: KeyCode) -> Self {
        Self { modifier_keys, key }
    }

    /// Returns `true` if the chord is fully held in `keys`.
    pub fn is_held(&self, keys: &KeyState) -> bool {
        keys.is_down(self.key) && keys.any_down(&self.modifier_keys)
    }

    /// Chord keys that were already held when the frame behind `keys` began.
    fn held_at_frame_start(&self, keys: &KeyState) -> KeyState {
        let held: Vec<KeyCode> = self
            .modifier_keys
            .iter()
            .chain(std::iter::once(&self.key))
            .copied()
            .filter(|&key| !keys.is_pressed(key) && (keys.is_down(key) || keys.is_released(key)))
            .collect();
        KeyState::with_keys_down(&held)
    }
}

impl Default for QuitChord {
    /// Either Ctrl key + Q.
    fn default() -> Self {
        Self::new(vec![KeyCode::ControlLeft, KeyCode::ControlRight], KeyCode::KeyQ)
    }
}

//=== FilteredInput =======================================================

/// Result of filtering one frame of input.
#[derive(Debug, Default)]
pub struct FilteredInput {
    /// Events to forward to the active scene, in arrival order.
    pub events: Vec<InputEvent>,

    /// Whether at least one quit signal was removed.
    pub quit_requested: bool,
}

//=== InputFilter =========================================================

/// Classifies raw events into "quit" and "forward to scene".
#[derive(Debug, Clone, Default)]
pub struct InputFilter {
    chord: Option<QuitChord>,
}

impl InputFilter {
    /// Filter with the default Ctrl+Q chord.
    pub fn new() -> Self {
        Self {
            chord: Some(QuitChord::default()),
        }
    }

    /// Filter with a custom chord, or only window-close detection for `None`.
    pub fn with_chord(chord: Option<QuitChord>) -> Self {
        Self { chord }
    }

    pub fn chord(&self) -> Option<&QuitChord> {
        self.chord.as_ref()
    }

    /// Returns `true` if `event` expresses termination intent given `keys`.
    pub fn is_quit(&self, event: &InputEvent, keys: &KeyState) -> bool {
        let close = matches!(event, InputEvent::CloseRequested);
        let chord = self.chord.as_ref().is_some_and(|chord| chord.is_held(keys));
        close || chord
    }

    /// Splits a frame's events, preserving the order of forwarded events.
    pub fn partition(&self, events: Vec<InputEvent>, keys: &KeyState) -> FilteredInput {
        let mut filtered = FilteredInput {
            events: Vec::with_capacity(events.len()),
            quit_requested: false,
        };

        let mut running = self.chord.as_ref().map(|chord| chord.held_at_frame_start(keys));

        for event in events {
            let held_on_arrival = match (&self.chord, running.as_mut()) {
                (Some(chord), Some(running)) => {
                    running.apply(&event);
                    chord.is_held(running)
                }
                _ => false,
            };

            if held_on_arrival || self.is_quit(&event, keys) {
                filtered.quit_requested = true;
            } else {
                filtered.events.push(event);
            }
        }

        filtered
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_requested_is_quit() {
        let filter = InputFilter::new();
        assert!(filter.is_quit(&InputEvent::CloseRequested, &KeyState::new()));
    }

    #[test]
    fn plain_key_is_not_quit() {
        let filter = InputFilter::new();
        let keys = KeyState::with_keys_down(&[KeyCode::KeyQ]);
        assert!(!filter.is_quit(&InputEvent::key_down(KeyCode::KeyQ), &keys));
    }

    #[test]
    fn ctrl_q_held_turns_any_event_into_quit() {
        let filter = InputFilter::new();

        let left = KeyState::with_keys_down(&[KeyCode::ControlLeft, KeyCode::KeyQ]);
        assert!(filter.is_quit(&InputEvent::key_down(KeyCode::KeyQ), &left));

        let right = KeyState::with_keys_down(&[KeyCode::ControlRight, KeyCode::KeyQ]);
        assert!(filter.is_quit(&InputEvent::MouseMoved { x: 0.0, y: 0.0 }, &right));
    }

    #[test]
    fn disabled_chord_only_detects_close() {
        let filter = InputFilter::with_chord(None);
        let keys = KeyState::with_keys_down(&[KeyCode::ControlLeft, KeyCode::KeyQ]);

        assert!(!filter.is_quit(&InputEvent::key_down(KeyCode::KeyQ), &keys));
        assert!(filter.is_quit(&InputEvent::CloseRequested, &keys));
    }

    #[test]
    fn custom_chord_is_honoured() {
        let chord = QuitChord::new(vec![KeyCode::AltLeft], KeyCode::KeyX);
        let filter = InputFilter::with_chord(Some(chord));
        let keys = KeyState::with_keys_down(&[KeyCode::AltLeft, KeyCode::KeyX]);

        assert!(filter.is_quit(&InputEvent::key_down(KeyCode::KeyX), &keys));
    }

    #[test]
    fn partition_removes_quit_and_keeps_order() {
        let filter = InputFilter::new();
        let events = vec![
            InputEvent::key_down(KeyCode::KeyA),
            InputEvent::CloseRequested,
            InputEvent::key_down(KeyCode::KeyB),
            InputEvent::key_up(KeyCode::KeyA),
        ];

        let filtered = filter.partition(events, &KeyState::new());

        assert!(filtered.quit_requested);
        assert_eq!(
            filtered.events,
            vec![
                InputEvent::key_down(KeyCode::KeyA),
                InputEvent::key_down(KeyCode::KeyB),
                InputEvent::key_up(KeyCode::KeyA),
            ]
        );
        assert!(!filtered.events.contains(&InputEvent::CloseRequested));
    }

    #[test]
    fn chord_pressed_and_released_within_one_frame_is_quit() {
        let filter = InputFilter::new();
        let events = vec![
            InputEvent::key_down(KeyCode::ControlLeft),
            InputEvent::key_down(KeyCode::KeyQ),
            InputEvent::key_up(KeyCode::KeyQ),
            InputEvent::key_up(KeyCode::ControlLeft),
        ];
        let mut keys = KeyState::new();
        for event in &events {
            keys.apply(event);
        }

        let filtered = filter.partition(events, &keys);

        assert!(filtered.quit_requested);
        assert!(!filtered.events.contains(&InputEvent::key_down(KeyCode::KeyQ)));
        assert_eq!(
            filtered.events,
            vec![
                InputEvent::key_down(KeyCode::ControlLeft),
                InputEvent::key_up(KeyCode::KeyQ),
                InputEvent::key_up(KeyCode::ControlLeft),
            ]
        );
    }

    #[test]
    fn ctrl_held_from_earlier_frame_then_q_tap_is_quit() {
        let filter = InputFilter::new();
        let mut keys = KeyState::with_keys_down(&[KeyCode::ControlRight]);
        keys.begin_frame();
        let events = vec![InputEvent::key_down(KeyCode::KeyQ), InputEvent::key_up(KeyCode::KeyQ)];
        for event in &events {
            keys.apply(event);
        }

        let filtered = filter.partition(events, &keys);

        assert!(filtered.quit_requested);
        assert!(!filtered.events.contains(&InputEvent::key_down(KeyCode::KeyQ)));
    }

    #[test]
    fn q_tap_without_ctrl_is_forwarded() {
        let filter = InputFilter::new();
        let events = vec![InputEvent::key_down(KeyCode::KeyQ), InputEvent::key_up(KeyCode::KeyQ)];
        let mut keys = KeyState::new();
        for event in &events {
            keys.apply(event);
        }

        let filtered = filter.partition(events, &keys);

        assert!(!filtered.quit_requested);
        assert_eq!(filtered.events.len(), 2);
    }

    #[test]
    fn partition_without_quit_forwards_everything() {
        let filter = InputFilter::new();
        let events = vec![InputEvent::key_down(KeyCode::Space)];

        let filtered = filter.partition(events, &KeyState::new());

        assert!(!filtered.quit_requested);
        assert_eq!(filtered.events.len(), 1);
    }
}
