//=========================================================================
// Scene Lifecycle
//=========================================================================
//
// Bookkeeping shared by every scene, regardless of store.
//
// The three-way split keeps separate concerns apart:
// - exit:      losing activation, happens on every transition away
// - terminate: the scene declared itself finished (Transition::Finish)
// - cleanup:   releasing resources, only if the policy asks for it
//
// State machine per slot:
//   new ──(eager: load)──► idle ──enter──► active ──exit──► idle
//                                                   └─(finish)─► terminate ─(policy)─► cleanup
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneKey, Transition};
use crate::core::assets::AssetLoader;
use crate::core::clock::FrameTime;
use crate::core::input::{InputEvent, KeyState};
use crate::core::render::Surface;
use crate::error::StageError;

//=== ScenePolicy =========================================================

/// Resource policy fixed at construction.
///
/// Defaults: lazy loading (on first `enter`) and cleanup on termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenePolicy {
    /// Release assets when the scene terminates.
    pub cleanup_on_terminate: bool,

    /// Load assets on first `enter` instead of at construction.
    pub delay_asset_loading: bool,
}

impl ScenePolicy {
    pub const fn new() -> Self {
        Self {
            cleanup_on_terminate: true,
            delay_asset_loading: true,
        }
    }

    /// Load assets at construction.
    pub const fn eager(mut self) -> Self {
        self.delay_asset_loading = false;
        self
    }

    /// Keep assets resident even after termination.
    pub const fn keep_warm(mut self) -> Self {
        self.cleanup_on_terminate = false;
        self
    }
}

impl Default for ScenePolicy {
    fn default() -> Self {
        Self::new()
    }
}

//=== SceneSlot ===========================================================

/// A scene plus its lifecycle state.
pub struct SceneSlot<K: SceneKey> {
    key: K,
    scene: Box<dyn Scene<K>>,
    policy: ScenePolicy,
    assets_loaded: bool,
    terminated: bool,
    pending: Transition<K>,
}

impl<K: SceneKey> SceneSlot<K> {
    //--- Construction -----------------------------------------------------

    /// Wraps `scene`, loading its assets right away if the policy is eager.
    pub fn new(
        key: K,
        scene: Box<dyn Scene<K>>,
        policy: ScenePolicy,
        assets: &mut dyn AssetLoader,
    ) -> Result<Self, StageError> {
        let mut slot = Self {
            key,
            scene,
            policy,
            assets_loaded: false,
            terminated: false,
            pending: Transition::Stay,
        };

        if !policy.delay_asset_loading {
            debug!("Eagerly loading assets for scene {:?}", key);
            slot.load_assets(assets)?;
        }

        Ok(slot)
    }

    //--- Accessors --------------------------------------------------------

    pub fn key(&self) -> K {
        self.key
    }

    pub fn policy(&self) -> ScenePolicy {
        self.policy
    }

    pub fn assets_loaded(&self) -> bool {
        self.assets_loaded
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Transition requested during the current activation.
    pub fn pending(&self) -> Transition<K> {
        self.pending
    }

    //--- Lifecycle --------------------------------------------------------

    /// Activates the scene: clears any stale request and loads assets if absent.
    pub fn enter(&mut self, assets: &mut dyn AssetLoader) -> Result<(), StageError> {
        self.pending = Transition::Stay;
        self.terminated = false;

        if !self.assets_loaded {
            self.load_assets(assets)?;
        }

        debug!("Entering scene {:?}", self.key);
        self.scene.on_enter();
        Ok(())
    }

    /// Deactivates the scene. Resources stay resident.
    pub fn exit(&mut self) {
        debug!("Exiting scene {:?}", self.key);
        self.scene.on_exit();
    }

    /// Marks the scene finished and applies the cleanup policy.
    pub fn terminate(&mut self) {
        debug!(
            "Terminating scene {:?} (cleanup: {})",
            self.key, self.policy.cleanup_on_terminate
        );
        self.terminated = true;
        self.scene.on_terminate();

        if self.policy.cleanup_on_terminate {
            self.cleanup();
        }
    }

    /// Releases the scene's resources; the next `enter` reloads them.
    pub fn cleanup(&mut self) {
        debug!("Releasing assets of scene {:?}", self.key);
        self.scene.cleanup();
        self.assets_loaded = false;
    }

    //--- Per-Frame Calls --------------------------------------------------

    pub fn process_input(&mut self, events: &[InputEvent], keys: &KeyState) {
        let transition = self.scene.process_input(events, keys);
        self.request(transition);
    }

    pub fn update(&mut self, time: &FrameTime) {
        let transition = self.scene.update(time);
        self.request(transition);
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.scene.render(surface);
    }

    //--- Internal Helpers -------------------------------------------------

    fn load_assets(&mut self, assets: &mut dyn AssetLoader) -> Result<(), StageError> {
        self.scene
            .load_assets(assets)
            .map_err(|source| StageError::asset(self.key, source))?;
        self.assets_loaded = true;
        Ok(())
    }

    fn request(&mut self, transition: Transition<K>) {
        if transition.is_stay() {
            return;
        }

        // A request naming this scene is the same as staying.
        if transition.target() == Some(self.key) {
            trace!("Scene {:?} requested itself, ignoring", self.key);
            return;
        }

        trace!("Scene {:?} requested {:?}", self.key, transition);
        self.pending = transition;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
