//=========================================================================
// Scene Factory
//=========================================================================
//
// Transient scene construction: a brand-new scene per visit.
//
// Nothing survives a transition away. The outgoing scene gets its `exit`
// call and is then dropped, which releases everything it held; the
// incoming scene is constructed fresh and loads its assets on `enter`.
// There is no cleanup or keep-warm policy in this mode.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneKey, ScenePolicy, SceneSlot, SceneStore};
use crate::core::assets::AssetLoader;
use crate::error::StageError;

//=== Constructor =========================================================

type Constructor<K> = Box<dyn Fn() -> Box<dyn Scene<K>>>;

//=== SceneFactoryBuilder =================================================

/// Collects scene constructors before the factory is sealed.
pub struct SceneFactoryBuilder<K: SceneKey> {
    initial: K,
    constructors: HashMap<K, Constructor<K>>,
    duplicate: Option<K>,
}

impl<K: SceneKey> SceneFactoryBuilder<K> {
    /// Registers a constructor called every time `key` is visited.
    pub fn register<S, F>(mut self, key: K, constructor: F) -> Self
    where
        S: Scene<K> + 'static,
        F: Fn() -> S + 'static,
    {
        let boxed: Constructor<K> = Box::new(move || Box::new(constructor()));
        if self.constructors.insert(key, boxed).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(key);
        }
        self
    }

    /// Seals the factory and constructs the initial scene (not yet entered).
    pub fn build(self, assets: &mut dyn AssetLoader) -> Result<SceneFactory<K>, StageError> {
        if let Some(key) = self.duplicate {
            return Err(StageError::DuplicateScene(format!("{:?}", key)));
        }

        let constructor = self
            .constructors
            .get(&self.initial)
            .ok_or_else(|| StageError::unknown(self.initial))?;
        let active = SceneSlot::new(self.initial, constructor(), ScenePolicy::new(), assets)?;

        info!(
            "Scene factory built: {} constructors, initial {:?}",
            self.constructors.len(),
            self.initial
        );

        Ok(SceneFactory {
            constructors: self.constructors,
            active,
            constructed: 1,
        })
    }
}

//=== SceneFactory ========================================================

/// Scene store that builds a fresh scene on every transition.
pub struct SceneFactory<K: SceneKey> {
    constructors: HashMap<K, Constructor<K>>,
    active: SceneSlot<K>,
    constructed: u64,
}

impl<K: SceneKey> SceneFactory<K> {
    /// Starts a factory whose first active scene is `initial`.
    pub fn builder(initial: K) -> SceneFactoryBuilder<K> {
        SceneFactoryBuilder {
            initial,
            constructors: HashMap::new(),
            duplicate: None,
        }
    }

    /// Number of scene instances constructed so far.
    pub fn constructed(&self) -> u64 {
        self.constructed
    }

    pub fn contains(&self, key: K) -> bool {
        self.constructors.contains_key(&key)
    }
}

impl<K: SceneKey> SceneStore<K> for SceneFactory<K> {
    fn active_key(&self) -> K {
        self.active.key()
    }

    fn active(&self) -> &SceneSlot<K> {
        &self.active
    }

    fn active_mut(&mut self) -> &mut SceneSlot<K> {
        &mut self.active
    }

    fn switch(
        &mut self,
        to: K,
        finish: bool,
        assets: &mut dyn AssetLoader,
    ) -> Result<(), StageError> {
        let constructor = self
            .constructors
            .get(&to)
            .ok_or_else(|| StageError::unknown(to))?;

        self.active.exit();

        let mut incoming = SceneSlot::new(to, constructor(), ScenePolicy::new(), assets)?;
        self.constructed += 1;
        incoming.enter(assets)?;
        let outgoing = std::mem::replace(&mut self.active, incoming);

        debug!(
            "Scene transition {:?} -> {:?} (finished: {}), dropping outgoing instance",
            outgoing.key(),
            to,
            finish
        );
        drop(outgoing);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::AssetStore;
    use crate::core::scene::testing::{CallLog, Recorder, TestScene};

    fn factory(log: &CallLog, assets: &mut AssetStore) -> SceneFactory<TestScene> {
        let (a, b) = (log.clone(), log.clone());
        SceneFactory::builder(TestScene::A)
            .register(TestScene::A, move || Recorder::new("A", &a))
            .register(TestScene::B, move || Recorder::new("B", &b))
            .build(assets)
            .unwrap()
    }

    #[test]
    fn build_constructs_initial_without_loading() {
        let log = CallLog::new();
        let mut assets = AssetStore::new(".");
        let factory = factory(&log, &mut assets);

        assert_eq!(factory.active_key(), TestScene::A);
        assert_eq!(factory.constructed(), 1);
        assert!(!factory.active().assets_loaded());
        assert!(log.entries().is_empty());
    }

    #[test]
    fn every_visit_builds_and_loads_a_new_instance() {
        let log = CallLog::new();
        let mut assets = AssetStore::new(".");
        let mut factory = factory(&log, &mut assets);
        factory.active_mut().enter(&mut assets).unwrap();

        factory.switch(TestScene::B, false, &mut assets).unwrap();
        factory.switch(TestScene::A, false, &mut assets).unwrap();

        assert_eq!(factory.constructed(), 3);
        assert_eq!(log.count("A:load"), 2);
        assert_eq!(
            log.entries(),
            vec!["A:load", "A:enter", "A:exit", "B:load", "B:enter", "B:exit", "A:load", "A:enter"]
        );
    }

    #[test]
    fn outgoing_scene_is_never_cleaned_up_explicitly() {
        let log = CallLog::new();
        let mut assets = AssetStore::new(".");
        let mut factory = factory(&log, &mut assets);
        factory.active_mut().enter(&mut assets).unwrap();

        factory.switch(TestScene::B, true, &mut assets).unwrap();

        assert_eq!(log.count("A:cleanup"), 0);
        assert_eq!(log.count("A:terminate"), 0);
    }

    #[test]
    fn unknown_target_is_rejected_before_exit() {
        let log = CallLog::new();
        let mut assets = AssetStore::new(".");
        let mut factory = factory(&log, &mut assets);
        factory.active_mut().enter(&mut assets).unwrap();
        log.clear();

        let result = factory.switch(TestScene::C, false, &mut assets);

        assert!(matches!(result, Err(StageError::UnknownScene(_))));
        assert_eq!(factory.active_key(), TestScene::A);
        assert!(log.entries().is_empty());
        assert!(!factory.contains(TestScene::C));
    }

    #[test]
    fn failed_enter_keeps_outgoing_scene_active() {
        let log = CallLog::new();
        let mut assets = AssetStore::new(".");
        let (a, b) = (log.clone(), log.clone());
        let mut factory = SceneFactory::builder(TestScene::A)
            .register(TestScene::A, move || Recorder::new("A", &a))
            .register(TestScene::B, move || Recorder::new("B", &b).failing_load())
            .build(&mut assets)
            .unwrap();
        factory.active_mut().enter(&mut assets).unwrap();
        log.clear();

        let result = factory.switch(TestScene::B, false, &mut assets);

        assert!(matches!(result, Err(StageError::Asset { .. })));
        assert_eq!(factory.active_key(), TestScene::A);
        assert!(factory.active().assets_loaded());
        assert_eq!(log.entries(), vec!["A:exit", "B:load"]);
    }

    #[test]
    fn duplicate_constructor_is_rejected() {
        let log = CallLog::new();
        let mut assets = AssetStore::new(".");
        let (a, b) = (log.clone(), log.clone());
        let result = SceneFactory::builder(TestScene::A)
            .register(TestScene::A, move || Recorder::new("A", &a))
            .register(TestScene::A, move || Recorder::new("A", &b))
            .build(&mut assets);

        assert!(matches!(result, Err(StageError::DuplicateScene(_))));
    }
}
