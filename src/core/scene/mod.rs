//=========================================================================
// Scene System
//=========================================================================
//
// Scene contract, lifecycle bookkeeping and the two scene stores.
//
// Architecture:
//   SceneStore (trait)
//     ├─ SceneRegistry: one long-lived SceneSlot per key (persistent pool)
//     └─ SceneFactory:  a fresh SceneSlot per visit (transient construction)
//
//   SceneSlot
//     ├─ scene: Box<dyn Scene<S>>
//     └─ assets_loaded / terminated / pending transition / policy
//
// Flow:
//   process_input() → update() → render() → pending Transition → store.switch()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetLoader;
use crate::core::clock::FrameTime;
use crate::core::input::{InputEvent, KeyState};
use crate::core::render::Surface;
use crate::error::{AssetError, StageError};

//=== Module Declarations =================================================

mod factory;
mod lifecycle;
mod registry;

#[cfg(test)]
pub(crate) mod testing;

//=== Public API ==========================================================

pub use factory::{SceneFactory, SceneFactoryBuilder};
pub use lifecycle::{ScenePolicy, SceneSlot};
pub use registry::{SceneRegistry, SceneRegistryBuilder};

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Scene keys identify scenes in a store. They are used for lookup only;
/// the driver never branches on a concrete key.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== Transition ==========================================================

/// What the active scene wants to happen at the end of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<K: SceneKey> {
    /// Keep running this scene.
    Stay,

    /// Activate another scene; this one stays warm for re-entry.
    Switch(K),

    /// Activate another scene and mark this one terminated.
    Finish(K),

    /// Stop the application after this frame.
    Quit,
}

impl<K: SceneKey> Transition<K> {
    /// Scene a `Switch`/`Finish` points at.
    pub fn target(&self) -> Option<K> {
        match self {
            Self::Switch(key) | Self::Finish(key) => Some(*key),
            Self::Stay | Self::Quit => None,
        }
    }

    pub fn is_stay(&self) -> bool {
        matches!(self, Self::Stay)
    }
}

impl<K: SceneKey> Default for Transition<K> {
    fn default() -> Self {
        Self::Stay
    }
}

//=== Scene Trait =========================================================

/// A mutually exclusive unit of application state.
///
/// Only `process_input`, `update` and `render` are required. Asset and
/// lifecycle hooks default to doing nothing.
///
/// Lifecycle bookkeeping (whether assets are resident, whether the scene
/// terminated, which transition is pending) lives in [`SceneSlot`], so an
/// implementation only says *what* to load and *how* to behave.
///
/// ```rust
/// # use stagehand::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Key { Menu, Game }
/// # impl SceneKey for Key {}
/// struct Menu {
///     font: Option<Font>,
/// }
///
/// impl Scene<Key> for Menu {
///     fn load_assets(&mut self, assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
///         self.font = Some(assets.load_font(&FontSpec::builtin(32))?);
///         Ok(())
///     }
///
///     fn cleanup(&mut self) {
///         self.font = None;
///     }
///
///     fn process_input(&mut self, events: &[InputEvent], _keys: &KeyState) -> Transition<Key> {
///         if events.iter().any(|e| e.is_key_down(KeyCode::Enter)) {
///             Transition::Switch(Key::Game)
///         } else {
///             Transition::Stay
///         }
///     }
///
///     fn update(&mut self, _time: &FrameTime) -> Transition<Key> {
///         Transition::Stay
///     }
///
///     fn render(&self, surface: &mut dyn Surface) {
///         surface.fill(Color::BLACK);
///         if let Some(font) = &self.font {
///             let at = surface.center();
///             surface.draw_text(font, "Menu", Color::WHITE, Anchor::Center, at);
///         }
///     }
/// }
/// ```
pub trait Scene<K: SceneKey> {
    /// Acquires the scene's resources.
    ///
    /// Called once at construction for eager scenes, or on the first
    /// `enter` (and after every cleanup) for lazy ones.
    fn load_assets(&mut self, _assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
        Ok(())
    }

    /// Releases what `load_assets` acquired.
    fn cleanup(&mut self) {}

    /// Called each time the scene becomes active, after assets are resident.
    fn on_enter(&mut self) {}

    /// Called each time the scene loses activation. State is kept.
    fn on_exit(&mut self) {}

    /// Called when the scene finished for good, before any cleanup.
    fn on_terminate(&mut self) {}

    /// Consumes the frame's filtered events and the held-key snapshot.
    fn process_input(&mut self, events: &[InputEvent], keys: &KeyState) -> Transition<K>;

    /// Advances scene state by one frame.
    fn update(&mut self, time: &FrameTime) -> Transition<K>;

    /// Draws the scene. Cannot mutate scene state.
    fn render(&self, surface: &mut dyn Surface);
}

//=== SceneStore Trait ====================================================

/// Ownership policy for scenes: who holds them and what a transition does.
pub trait SceneStore<K: SceneKey> {
    /// Key of the active scene.
    fn active_key(&self) -> K;

    /// The active scene.
    fn active(&self) -> &SceneSlot<K>;

    /// The active scene, mutably.
    fn active_mut(&mut self) -> &mut SceneSlot<K>;

    /// Deactivates the current scene and activates `to`.
    ///
    /// `finish` marks the outgoing scene terminated. Naming an unknown
    /// scene is a configuration error and leaves the active scene as is.
    fn switch(
        &mut self,
        to: K,
        finish: bool,
        assets: &mut dyn AssetLoader,
    ) -> Result<(), StageError>;
}

//=========================================================================
// Unit Tests
//=========================================================================
