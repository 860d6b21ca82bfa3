//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between the driver and the window/input/drawing collaborator.
//
// Enables platform backends (winit, headless) to be swapped without
// changing the driver or any scene.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetLoader;
use crate::core::input::{InputEvent, KeyState};
use crate::core::render::Surface;
use crate::error::PlatformError;

//=== InputBatch ==========================================================

/// Input gathered by the window side between two frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputBatch {
    /// Keyboard/mouse button/close events (order significant).
    pub discrete: Vec<InputEvent>,

    /// Mouse motion, coalesced to the latest position.
    pub continuous: Vec<InputEvent>,
}

impl InputBatch {
    pub fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }

    pub fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }
}

//=== Platform Trait ======================================================

/// Window, input, drawing and asset services used by the driver.
///
/// Per frame the driver calls, in order: `pump`, `key_state`,
/// `drain_events`, `surface` (during render), `assets` (during
/// transitions), `present`.
pub trait Platform {
    /// Gathers pending window-system events into the frame queue.
    fn pump(&mut self) -> Result<(), PlatformError>;

    /// Held-key state after the last `pump`.
    fn key_state(&self) -> &KeyState;

    /// Takes this frame's events in arrival order.
    fn drain_events(&mut self) -> Vec<InputEvent>;

    /// Drawing target for the active scene.
    fn surface(&mut self) -> &mut dyn Surface;

    /// Asset loader lent to scenes while they load.
    fn assets(&mut self) -> &mut dyn AssetLoader;

    /// Makes the frame drawn since the last call visible.
    fn present(&mut self) -> Result<(), PlatformError>;

    /// Releases window-system resources. Called once after the loop ends.
    fn shutdown(&mut self) {}
}
