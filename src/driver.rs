//=========================================================================
// Driver
//
// Frame loop that runs the active scene of a scene store.
//
// Architecture:
// ```text
//     DriverBuilder  ──build(store, platform)──>  Driver  ──run()──>  ExitReason
//         │                                         │
//         ├─ with_fps()                             ├─ step() per frame
//         ├─ with_quit_chord()                      └─ platform.shutdown()
//         └─ without_quit_chord()
// ```
//
// Frame order (fixed):
//   pump → key snapshot → drain + filter → [quit? stop]
//   → process_input → update → render → resolve transition → present → tick
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use crate::core::clock::{frame_budget, FrameClock};
use crate::core::input::{InputFilter, QuitChord};
use crate::core::platform_bridge::Platform;
use crate::core::scene::{SceneKey, SceneStore, Transition};
use crate::error::StageError;

//=== TickControl =========================================================

/// Whether the loop continues after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit(ExitReason),
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Window close or the quit chord, seen before any scene call.
    QuitSignal,

    /// The active scene returned `Transition::Quit`.
    SceneQuit,
}

//=== DriverBuilder =======================================================

/// Builder for configuring and constructing a [`Driver`].
///
/// # Default Values
///
/// - **FPS**: 60.0
/// - **Quit chord**: either Ctrl + Q
///
/// # Examples
///
/// ```no_run
/// use stagehand::prelude::*;
/// use stagehand::platform::WinitPlatform;
/// use stagehand::scenes;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let display = DisplayConfig::default();
/// let mut platform = WinitPlatform::new(&display, AssetStore::new("assets"))?;
/// let registry = scenes::build_registry(&display, platform.assets())?;
///
/// DriverBuilder::new()
///     .with_fps(30.0)
///     .build(registry, platform)
///     .run()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DriverBuilder {
    fps: f64,
    quit_chord: Option<QuitChord>,
}

impl DriverBuilder {
    pub fn new() -> Self {
        Self {
            fps: 60.0,
            quit_chord: Some(QuitChord::default()),
        }
    }

    /// Sets the frame-rate cap.
    ///
    /// # Panics
    ///
    /// Panics if `fps <= 0.0`, or if `fps` is so small that one frame
    /// overflows `Duration`.
    pub fn with_fps(mut self, fps: f64) -> Self {
        frame_budget(fps);
        self.fps = fps;
        self
    }

    /// Replaces the chord that quits while held.
    pub fn with_quit_chord(mut self, chord: QuitChord) -> Self {
        self.quit_chord = Some(chord);
        self
    }

    /// Only window-close requests quit.
    pub fn without_quit_chord(mut self) -> Self {
        self.quit_chord = None;
        self
    }

    /// Builds the driver. The initial scene is entered on the first frame.
    pub fn build<K, St, P>(self, store: St, platform: P) -> Driver<K, St, P>
    where
        K: SceneKey,
        St: SceneStore<K>,
        P: Platform,
    {
        info!(
            "Building driver (FPS: {}, quit chord: {})",
            self.fps,
            self.quit_chord.is_some()
        );

        Driver {
            store,
            platform,
            filter: InputFilter::with_chord(self.quit_chord),
            clock: FrameClock::new(self.fps),
            started: false,
            halted: false,
            previous: None,
        }
    }
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Driver ==============================================================

/// Runs the active scene of `St` against platform `P`, one frame at a time.
pub struct Driver<K: SceneKey, St: SceneStore<K>, P: Platform> {
    store: St,
    platform: P,
    filter: InputFilter,
    clock: FrameClock,
    started: bool,
    halted: bool,
    previous: Option<K>,
}

impl<K: SceneKey, St: SceneStore<K>, P: Platform> Driver<K, St, P> {
    //--- Execution --------------------------------------------------------

    /// Enters the initial scene. Idempotent.
    pub fn start(&mut self) -> Result<(), StageError> {
        if self.started {
            return Ok(());
        }

        info!("Starting with scene {:?}", self.store.active_key());
        self.store.active_mut().enter(self.platform.assets())?;
        self.started = true;
        Ok(())
    }

    /// Runs one frame.
    ///
    /// # Errors
    ///
    /// After any error the driver is halted and every later call returns
    /// [`StageError::Halted`] without touching the scene or the platform.
    pub fn step(&mut self) -> Result<TickControl, StageError> {
        if self.halted {
            return Err(StageError::Halted);
        }

        let outcome = self.run_frame();
        if outcome.is_err() {
            self.halted = true;
        }
        outcome
    }

    /// Runs frames until a quit, then shuts the platform down.
    ///
    /// # Errors
    ///
    /// Any [`StageError`] is fatal: the loop stops and the platform is
    /// still shut down before the error is returned.
    pub fn run(&mut self) -> Result<ExitReason, StageError> {
        let outcome = self.run_frames();
        self.platform.shutdown();

        match &outcome {
            Ok(reason) => info!("Stopped after {} frames ({:?})", self.clock.frames(), reason),
            Err(e) => error!("Stopped on error after {} frames: {}", self.clock.frames(), e),
        }
        outcome
    }

    //--- Accessors --------------------------------------------------------

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn active_key(&self) -> K {
        self.store.active_key()
    }

    /// Scene that was active before the last transition.
    pub fn previous_key(&self) -> Option<K> {
        self.previous
    }

    /// Number of completed frames.
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// Whether an earlier frame failed.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    //--- Internal Helpers -------------------------------------------------

    fn run_frame(&mut self) -> Result<TickControl, StageError> {
        self.start()?;

        //--- Step 1: Pump and snapshot held keys -----------------------------
        self.platform.pump()?;
        let keys = self.platform.key_state().clone();

        //--- Step 2: Drain and filter ---------------------------------------
        let input = self.filter.partition(self.platform.drain_events(), &keys);
        if input.quit_requested {
            info!("Quit signal received");
            return Ok(TickControl::Exit(ExitReason::QuitSignal));
        }

        //--- Steps 3-5: Active scene ----------------------------------------
        let time = self.clock.frame_time();
        let scene = self.store.active_mut();
        scene.process_input(&input.events, &keys);
        scene.update(&time);
        scene.render(self.platform.surface());
        let pending = scene.pending();

        //--- Step 6: Resolve transition -------------------------------------
        let control = match pending {
            Transition::Stay => TickControl::Continue,
            Transition::Switch(to) => self.transition(to, false)?,
            Transition::Finish(to) => self.transition(to, true)?,
            Transition::Quit => {
                info!("Scene {:?} requested quit", self.store.active_key());
                TickControl::Exit(ExitReason::SceneQuit)
            }
        };

        //--- Step 7: Present and pace ---------------------------------------
        self.platform.present()?;
        self.clock.tick();

        Ok(control)
    }

    fn run_frames(&mut self) -> Result<ExitReason, StageError> {
        loop {
            if let TickControl::Exit(reason) = self.step()? {
                return Ok(reason);
            }
        }
    }

    fn transition(&mut self, to: K, finish: bool) -> Result<TickControl, StageError> {
        let from = self.store.active_key();
        debug!("Frame {}: {:?} -> {:?}", self.clock.frames(), from, to);

        self.store.switch(to, finish, self.platform.assets())?;
        self.previous = Some(from);
        Ok(TickControl::Continue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::AssetStore;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::render::DisplayConfig;
    use crate::core::scene::testing::{CallLog, Recorder, TestScene};
    use crate::core::scene::{SceneFactory, ScenePolicy, SceneRegistry};
    use crate::platform::{HeadlessPlatform, InputFeed};

    type TestDriver = Driver<TestScene, SceneRegistry<TestScene>, HeadlessPlatform>;

    fn headless() -> (HeadlessPlatform, InputFeed) {
        HeadlessPlatform::new(&DisplayConfig::default(), AssetStore::new("."))
    }

    /// A --Space/Finish--> B, A --KeyC/Finish--> C (keep warm),
    /// A --KeyB/Switch--> B, B --KeyA/Switch--> A, C --KeyA/Finish--> A.
    fn driver(log: &CallLog, builder: DriverBuilder) -> (TestDriver, InputFeed) {
        let (mut platform, feed) = headless();
        let registry = SceneRegistry::builder(TestScene::A)
            .register(
                TestScene::A,
                Recorder::new("A", log)
                    .route(KeyCode::Space, Transition::Finish(TestScene::B))
                    .route(KeyCode::KeyC, Transition::Finish(TestScene::C))
                    .route(KeyCode::KeyB, Transition::Switch(TestScene::B))
                    .route(KeyCode::Escape, Transition::Quit),
                ScenePolicy::new(),
            )
            .register(
                TestScene::B,
                Recorder::new("B", log).route(KeyCode::KeyA, Transition::Switch(TestScene::A)),
                ScenePolicy::new(),
            )
            .register(
                TestScene::C,
                Recorder::new("C", log).route(KeyCode::KeyA, Transition::Finish(TestScene::A)),
                ScenePolicy::new().eager().keep_warm(),
            )
            .build(platform.assets())
            .unwrap();

        (builder.with_fps(1000.0).build(registry, platform), feed)
    }

    #[test]
    #[should_panic(expected = "FPS must be positive")]
    fn builder_rejects_non_positive_fps() {
        let _ = DriverBuilder::new().with_fps(0.0);
    }

    #[test]
    #[should_panic(expected = "is too small")]
    fn builder_rejects_vanishing_fps() {
        let _ = DriverBuilder::new().with_fps(1e-20);
    }

    #[test]
    fn first_step_enters_initial_scene() {
        let log = CallLog::new();
        let (mut driver, _feed) = driver(&log, DriverBuilder::new());

        assert_eq!(driver.step().unwrap(), TickControl::Continue);

        assert_eq!(
            log.entries(),
            vec!["C:load", "A:load", "A:enter", "A:input", "A:update", "A:render"]
        );
        assert!(driver.store().active().assets_loaded());
        assert_eq!(driver.store().active().pending(), Transition::Stay);
    }

    #[test]
    fn stay_frames_never_exit_or_enter() {
        let log = CallLog::new();
        let (mut driver, _feed) = driver(&log, DriverBuilder::new());

        for _ in 0..3 {
            assert_eq!(driver.step().unwrap(), TickControl::Continue);
        }

        assert_eq!(log.count("A:enter"), 1);
        assert_eq!(log.count("A:exit"), 0);
        assert_eq!(log.count("A:render"), 3);
        assert_eq!(driver.frames(), 3);
        assert_eq!(driver.platform().display_list().frames_presented(), 3);
    }

    #[test]
    fn finish_runs_exit_terminate_cleanup_then_enter() {
        let log = CallLog::new();
        let (mut driver, feed) = driver(&log, DriverBuilder::new());
        driver.start().unwrap();
        log.clear();

        feed.push(InputEvent::key_down(KeyCode::Space));
        driver.step().unwrap();

        assert_eq!(
            log.entries(),
            vec![
                "A:input", "A:update", "A:render",
                "A:exit", "A:terminate", "A:cleanup",
                "B:load", "B:enter",
            ]
        );
        assert_eq!(driver.active_key(), TestScene::B);
        assert_eq!(driver.previous_key(), Some(TestScene::A));
        assert!(driver.store().active().assets_loaded());
    }

    #[test]
    fn keep_warm_scene_is_never_cleaned_up() {
        let log = CallLog::new();
        let (mut driver, feed) = driver(&log, DriverBuilder::new());

        feed.push(InputEvent::key_down(KeyCode::KeyC));
        driver.step().unwrap();
        feed.push(InputEvent::key_down(KeyCode::KeyA));
        driver.step().unwrap();
        feed.push(InputEvent::key_down(KeyCode::KeyC));
        driver.step().unwrap();

        assert_eq!(driver.active_key(), TestScene::C);
        assert_eq!(log.count("C:terminate"), 1);
        assert_eq!(log.count("C:cleanup"), 0);
        assert_eq!(log.count("C:load"), 1);
    }

    #[test]
    fn reentry_without_termination_does_not_reload() {
        let log = CallLog::new();
        let (mut driver, feed) = driver(&log, DriverBuilder::new());

        feed.push(InputEvent::key_down(KeyCode::KeyB));
        driver.step().unwrap();
        feed.push(InputEvent::key_down(KeyCode::KeyA));
        driver.step().unwrap();

        assert_eq!(driver.active_key(), TestScene::A);
        assert_eq!(log.count("A:load"), 1);
        assert_eq!(log.count("A:cleanup"), 0);
        assert_eq!(log.count("A:enter"), 2);
    }

    #[test]
    fn close_stops_the_frame_before_any_scene_call() {
        let log = CallLog::new();
        let (mut driver, feed) = driver(&log, DriverBuilder::new());
        driver.step().unwrap();
        log.clear();

        feed.push_all([InputEvent::key_down(KeyCode::Space), InputEvent::CloseRequested]);

        assert_eq!(driver.step().unwrap(), TickControl::Exit(ExitReason::QuitSignal));
        assert!(log.entries().is_empty());
        assert_eq!(driver.active_key(), TestScene::A);
        assert_eq!(driver.platform().display_list().frames_presented(), 1);
    }

    #[test]
    fn ctrl_q_never_reaches_the_scene() {
        let log = CallLog::new();
        let (mut platform, feed) = headless();
        let recorder = Recorder::new("A", &log);
        let seen = recorder.seen_events();
        let registry = SceneRegistry::builder(TestScene::A)
            .register(TestScene::A, recorder, ScenePolicy::new())
            .build(platform.assets())
            .unwrap();
        let mut driver = DriverBuilder::new().with_fps(1000.0).build(registry, platform);

        feed.push(InputEvent::key_down(KeyCode::Space));
        driver.step().unwrap();
        feed.push_all([
            InputEvent::key_down(KeyCode::ControlRight),
            InputEvent::key_down(KeyCode::KeyQ),
        ]);

        assert_eq!(driver.step().unwrap(), TickControl::Exit(ExitReason::QuitSignal));
        assert_eq!(*seen.borrow(), vec![InputEvent::key_down(KeyCode::Space)]);
        assert_eq!(log.count("A:input"), 1);
    }

    #[test]
    fn disabled_chord_forwards_ctrl_q() {
        let log = CallLog::new();
        let (mut driver, feed) = driver(&log, DriverBuilder::new().without_quit_chord());

        feed.push_all([
            InputEvent::key_down(KeyCode::ControlLeft),
            InputEvent::key_down(KeyCode::KeyQ),
        ]);

        assert_eq!(driver.step().unwrap(), TickControl::Continue);
    }

    #[test]
    fn custom_chord_replaces_ctrl_q() {
        let log = CallLog::new();
        let chord = QuitChord::new(vec![KeyCode::AltLeft], KeyCode::KeyX);
        let (mut driver, feed) = driver(&log, DriverBuilder::new().with_quit_chord(chord));

        feed.push_all([
            InputEvent::key_down(KeyCode::ControlLeft),
            InputEvent::key_down(KeyCode::KeyQ),
        ]);
        assert_eq!(driver.step().unwrap(), TickControl::Continue);

        feed.push_all([
            InputEvent::key_down(KeyCode::AltLeft),
            InputEvent::key_down(KeyCode::KeyX),
        ]);
        assert_eq!(driver.step().unwrap(), TickControl::Exit(ExitReason::QuitSignal));
    }

    #[test]
    fn scene_quit_finishes_the_frame() {
        let log = CallLog::new();
        let (mut driver, feed) = driver(&log, DriverBuilder::new());

        feed.push(InputEvent::key_down(KeyCode::Escape));

        assert_eq!(driver.step().unwrap(), TickControl::Exit(ExitReason::SceneQuit));
        assert_eq!(log.count("A:render"), 1);
        assert_eq!(log.count("A:exit"), 0);
        assert_eq!(driver.platform().display_list().frames_presented(), 1);
    }

    #[test]
    fn run_returns_reason_and_stops_on_dropped_feed() {
        let log = CallLog::new();
        let (mut driver, feed) = driver(&log, DriverBuilder::new());

        feed.push(InputEvent::key_down(KeyCode::KeyB));
        drop(feed);

        assert_eq!(driver.run().unwrap(), ExitReason::QuitSignal);
        assert_eq!(log.count("B:render"), 0);
    }

    #[test]
    fn run_until_scene_quit() {
        let log = CallLog::new();
        let (mut driver, feed) = driver(&log, DriverBuilder::new());

        feed.push(InputEvent::key_down(KeyCode::Escape));

        assert_eq!(driver.run().unwrap(), ExitReason::SceneQuit);
        assert_eq!(driver.frames(), 1);
    }

    #[test]
    fn unknown_target_is_fatal() {
        let log = CallLog::new();
        let (mut platform, feed) = headless();
        let registry = SceneRegistry::builder(TestScene::A)
            .register(
                TestScene::A,
                Recorder::new("A", &log).route(KeyCode::KeyC, Transition::Switch(TestScene::C)),
                ScenePolicy::new(),
            )
            .build(platform.assets())
            .unwrap();
        let mut driver = DriverBuilder::new().with_fps(1000.0).build(registry, platform);

        feed.push(InputEvent::key_down(KeyCode::KeyC));

        assert!(matches!(driver.run(), Err(StageError::UnknownScene(_))));
        assert_eq!(driver.active_key(), TestScene::A);
    }

    #[test]
    fn failed_initial_load_is_fatal() {
        let log = CallLog::new();
        let (mut platform, _feed) = headless();
        let registry = SceneRegistry::builder(TestScene::A)
            .register(TestScene::A, Recorder::new("A", &log).failing_load(), ScenePolicy::new())
            .build(platform.assets())
            .unwrap();
        let mut driver = DriverBuilder::new().build(registry, platform);

        assert!(matches!(driver.step(), Err(StageError::Asset { .. })));
        assert_eq!(log.count("A:update"), 0);
    }

    #[test]
    fn failed_transition_halts_the_driver() {
        let log = CallLog::new();
        let (mut platform, feed) = headless();
        let registry = SceneRegistry::builder(TestScene::A)
            .register(
                TestScene::A,
                Recorder::new("A", &log).route(KeyCode::Space, Transition::Switch(TestScene::B)),
                ScenePolicy::new(),
            )
            .register(TestScene::B, Recorder::new("B", &log).failing_load(), ScenePolicy::new())
            .build(platform.assets())
            .unwrap();
        let mut driver = DriverBuilder::new().with_fps(1000.0).build(registry, platform);

        feed.push(InputEvent::key_down(KeyCode::Space));
        assert!(matches!(driver.step(), Err(StageError::Asset { .. })));
        assert!(driver.is_halted());
        assert_eq!(driver.active_key(), TestScene::A);
        assert!(!driver.store().get(TestScene::B).unwrap().assets_loaded());

        log.clear();
        assert!(matches!(driver.step(), Err(StageError::Halted)));
        assert!(matches!(driver.step(), Err(StageError::Halted)));
        assert!(log.entries().is_empty());
        assert_eq!(driver.frames(), 0);
    }

    #[test]
    fn factory_store_builds_fresh_scene_per_visit() {
        let log = CallLog::new();
        let (mut platform, feed) = headless();
        let (a, b) = (log.clone(), log.clone());
        let factory = SceneFactory::builder(TestScene::A)
            .register(TestScene::A, move || {
                Recorder::new("A", &a).route(KeyCode::Space, Transition::Switch(TestScene::B))
            })
            .register(TestScene::B, move || {
                Recorder::new("B", &b).route(KeyCode::Space, Transition::Finish(TestScene::A))
            })
            .build(platform.assets())
            .unwrap();
        let mut driver = DriverBuilder::new().with_fps(1000.0).build(factory, platform);

        feed.push(InputEvent::key_down(KeyCode::Space));
        driver.step().unwrap();
        feed.push(InputEvent::key_down(KeyCode::Space));
        driver.step().unwrap();

        assert_eq!(driver.active_key(), TestScene::A);
        assert_eq!(driver.store().constructed(), 3);
        assert_eq!(log.count("A:load"), 2);
        assert_eq!(log.count("B:cleanup"), 0);
    }
}
