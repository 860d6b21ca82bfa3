//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use stagehand::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Driver
pub use crate::driver::{Driver, DriverBuilder, ExitReason, TickControl};

// Errors
pub use crate::error::{AssetError, PlatformError, StageError};

// Scene system
pub use crate::core::scene::{
    Scene, SceneFactory, SceneKey, ScenePolicy, SceneRegistry, SceneStore, Transition,
};

// Input
pub use crate::core::input::{InputEvent, KeyCode, KeyState, Modifiers, MouseButton, QuitChord};

// Rendering and assets
pub use crate::core::assets::{AssetLoader, AssetStore, Font, FontSpec, Image};
pub use crate::core::clock::FrameTime;
pub use crate::core::render::{Anchor, Color, DisplayConfig, Rect, Surface};

// Platform contract
pub use crate::core::platform_bridge::Platform;
