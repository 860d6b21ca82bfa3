//=========================================================================
// Input
//=========================================================================
//
// Engine-side input model.
//
// Architecture:
//   InputEvent ──► KeyState (held keys, per-frame deltas)
//        │
//        └──────► InputFilter ──► FilteredInput ──► Scene::process_input()
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod filter;
mod key_state;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use filter::{FilteredInput, InputFilter, QuitChord};
pub use key_state::KeyState;
