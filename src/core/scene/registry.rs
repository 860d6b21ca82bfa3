//=========================================================================
// Scene Registry
//=========================================================================
//
// Persistent scene pool: one long-lived slot per key.
//
// Scenes are created once at startup and reused across visits, so their
// state survives a transition away. Whether their assets survive too is
// decided per scene by its `ScenePolicy`.
//
// The key set is closed once built. Unknown keys are configuration
// errors, never runtime conditions.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneKey, ScenePolicy, SceneSlot, SceneStore};
use crate::core::assets::AssetLoader;
use crate::error::StageError;

//=== SceneRegistryBuilder ================================================

/// Collects scene registrations before the registry is sealed.
pub struct SceneRegistryBuilder<K: SceneKey> {
    initial: K,
    entries: Vec<(K, Box<dyn Scene<K>>, ScenePolicy)>,
}

impl<K: SceneKey> SceneRegistryBuilder<K> {
    /// Registers `scene` under `key` with the given resource policy.
    pub fn register(mut self, key: K, scene: impl Scene<K> + 'static, policy: ScenePolicy) -> Self {
        self.entries.push((key, Box::new(scene), policy));
        self
    }

    /// Seals the registry, constructing every slot.
    ///
    /// Eager scenes load their assets here, in registration order.
    ///
    /// # Errors
    ///
    /// - [`StageError::DuplicateScene`] if a key was registered twice
    /// - [`StageError::UnknownScene`] if the initial scene is missing
    /// - [`StageError::Asset`] if an eager scene fails to load
    pub fn build(self, assets: &mut dyn AssetLoader) -> Result<SceneRegistry<K>, StageError> {
        let mut index = HashMap::with_capacity(self.entries.len());
        for (position, (key, _, _)) in self.entries.iter().enumerate() {
            if index.insert(*key, position).is_some() {
                return Err(StageError::DuplicateScene(format!("{:?}", key)));
            }
        }

        let active = *index
            .get(&self.initial)
            .ok_or_else(|| StageError::unknown(self.initial))?;

        let mut slots = Vec::with_capacity(self.entries.len());
        for (key, scene, policy) in self.entries {
            slots.push(SceneSlot::new(key, scene, policy, assets)?);
        }

        info!(
            "Scene registry built: {} scenes, initial {:?}",
            slots.len(),
            self.initial
        );

        Ok(SceneRegistry {
            slots,
            index,
            active,
        })
    }
}

//=== SceneRegistry =======================================================

/// Fixed mapping from scene key to a long-lived scene.
pub struct SceneRegistry<K: SceneKey> {
    slots: Vec<SceneSlot<K>>,
    index: HashMap<K, usize>,
    active: usize,
}

impl<K: SceneKey> SceneRegistry<K> {
    /// Starts a registry whose first active scene is `initial`.
    pub fn builder(initial: K) -> SceneRegistryBuilder<K> {
        SceneRegistryBuilder {
            initial,
            entries: Vec::new(),
        }
    }

    /// Looks up a scene by key.
    pub fn get(&self, key: K) -> Result<&SceneSlot<K>, StageError> {
        self.position(key).map(|position| &self.slots[position])
    }

    /// Registered keys, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.slots.iter().map(SceneSlot::key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn position(&self, key: K) -> Result<usize, StageError> {
        self.index
            .get(&key)
            .copied()
            .ok_or_else(|| StageError::unknown(key))
    }
}

impl<K: SceneKey> SceneStore<K> for SceneRegistry<K> {
    fn active_key(&self) -> K {
        self.slots[self.active].key()
    }

    fn active(&self) -> &SceneSlot<K> {
        &self.slots[self.active]
    }

    fn active_mut(&mut self) -> &mut SceneSlot<K> {
        &mut self.slots[self.active]
    }

    fn switch(
        &mut self,
        to: K,
        finish: bool,
        assets: &mut dyn AssetLoader,
    ) -> Result<(), StageError> {
        let target = self.position(to)?;
        let from = self.active_key();

        let outgoing = &mut self.slots[self.active];
        outgoing.exit();
        if finish {
            outgoing.terminate();
        }

        debug!("Scene transition {:?} -> {:?} (finished: {})", from, to, finish);
        // Active only once entered: a scene never runs without its assets.
        self.slots[target].enter(assets)?;
        self.active = target;
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
