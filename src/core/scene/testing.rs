//=========================================================================
// Scene Test Fixtures
//=========================================================================
//
// A scene that records every lifecycle call into a shared log, so tests
// can assert exact call orders across slots, stores and the driver.
//
//=========================================================================

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use super::{Scene, SceneKey, Transition};
use crate::core::assets::{AssetLoader, Font, FontSpec};
use crate::core::clock::FrameTime;
use crate::core::input::{InputEvent, KeyCode, KeyState};
use crate::core::render::{Anchor, Color, Surface};
use crate::error::AssetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TestScene {
    A,
    B,
    C,
}

impl SceneKey for TestScene {}

/// Shared, ordered record of calls such as `"A:enter"`.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(crate) fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Recording scene with key-driven routes.
pub(crate) struct Recorder {
    name: &'static str,
    log: CallLog,
    routes: Vec<(KeyCode, Transition<TestScene>)>,
    on_update: Transition<TestScene>,
    fail_load: bool,
    seen: Rc<RefCell<Vec<InputEvent>>>,
    font: Option<Font>,
}

impl Recorder {
    pub(crate) fn new(name: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            log: log.clone(),
            routes: Vec::new(),
            on_update: Transition::Stay,
            fail_load: false,
            seen: Rc::default(),
            font: None,
        }
    }

    /// Returns `transition` from `process_input` when `key` goes down.
    pub(crate) fn route(mut self, key: KeyCode, transition: Transition<TestScene>) -> Self {
        self.routes.push((key, transition));
        self
    }

    /// Returns `transition` from every `update`.
    pub(crate) fn on_update(mut self, transition: Transition<TestScene>) -> Self {
        self.on_update = transition;
        self
    }

    pub(crate) fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    /// Handle to every event this scene received.
    pub(crate) fn seen_events(&self) -> Rc<RefCell<Vec<InputEvent>>> {
        self.seen.clone()
    }

    fn record(&self, call: &str) {
        self.log.push(format!("{}:{}", self.name, call));
    }
}

impl Scene<TestScene> for Recorder {
    fn load_assets(&mut self, assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
        self.record("load");
        if self.fail_load {
            return Err(AssetError::Missing {
                path: PathBuf::from("missing.ttf"),
                source: io::Error::new(io::ErrorKind::NotFound, "missing asset"),
            });
        }
        self.font = Some(assets.load_font(&FontSpec::builtin(12))?);
        Ok(())
    }

    fn cleanup(&mut self) {
        self.record("cleanup");
        self.font = None;
    }

    fn on_enter(&mut self) {
        self.record("enter");
    }

    fn on_exit(&mut self) {
        self.record("exit");
    }

    fn on_terminate(&mut self) {
        self.record("terminate");
    }

    fn process_input(&mut self, events: &[InputEvent], _keys: &KeyState) -> Transition<TestScene> {
        self.record("input");
        self.seen.borrow_mut().extend(events.iter().cloned());

        events
            .iter()
            .find_map(|event| {
                self.routes
                    .iter()
                    .find(|(key, _)| event.is_key_down(*key))
                    .map(|(_, transition)| *transition)
            })
            .unwrap_or(Transition::Stay)
    }

    fn update(&mut self, _time: &FrameTime) -> Transition<TestScene> {
        self.record("update");
        self.on_update
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.record("render");
        surface.fill(Color::BLACK);
        if let Some(font) = &self.font {
            let at = surface.center();
            surface.draw_text(font, self.name, Color::WHITE, Anchor::Center, at);
        }
    }
}
