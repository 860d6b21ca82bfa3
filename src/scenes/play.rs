//=========================================================================
// Play Scenes
//=========================================================================
//
// The two gameplay stages share one implementation that differs only in
// label and successor. RIGHT finishes the stage, UP visits the special
// scene and leaves this one warm for a return.
//
//=========================================================================

use std::time::Duration;

use crate::core::assets::{AssetLoader, Font, FontSpec};
use crate::core::clock::FrameTime;
use crate::core::input::{InputEvent, KeyCode, KeyState};
use crate::core::render::{Anchor, Color, DisplayConfig, Surface};
use crate::core::scene::{Scene, Transition};
use crate::error::AssetError;

use super::DemoScene;

const LABEL_FONT_SIZE: u32 = 96;
const TIMER_FONT_SIZE: u32 = 24;

pub struct PlayScene {
    label: &'static str,
    successor: DemoScene,
    center: (i32, i32),
    label_font: Option<Font>,
    timer_font: Option<Font>,

    /// Time spent active, kept across visits until the stage is finished.
    elapsed: Duration,
}

impl PlayScene {
    pub fn new(display: &DisplayConfig, label: &'static str, successor: DemoScene) -> Self {
        Self {
            label,
            successor,
            center: display.center(),
            label_font: None,
            timer_font: None,
            elapsed: Duration::ZERO,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Scene<DemoScene> for PlayScene {
    fn load_assets(&mut self, assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
        self.label_font = Some(assets.load_font(&FontSpec::builtin(LABEL_FONT_SIZE))?);
        self.timer_font = Some(assets.load_font(&FontSpec::builtin(TIMER_FONT_SIZE))?);
        Ok(())
    }

    fn cleanup(&mut self) {
        self.label_font = None;
        self.timer_font = None;
    }

    fn on_terminate(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn process_input(&mut self, events: &[InputEvent], _keys: &KeyState) -> Transition<DemoScene> {
        for event in events {
            if event.is_key_down(KeyCode::ArrowRight) {
                return Transition::Finish(self.successor);
            }
            if event.is_key_down(KeyCode::ArrowUp) {
                return Transition::Switch(DemoScene::Special);
            }
        }
        Transition::Stay
    }

    fn update(&mut self, time: &FrameTime) -> Transition<DemoScene> {
        self.elapsed += time.delta;
        Transition::Stay
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill(Color::BLACK);

        if let Some(font) = &self.label_font {
            let rect = surface.draw_text(font, self.label, Color::WHITE, Anchor::Center, self.center);

            if let Some(timer) = &self.timer_font {
                let text = format!("{:.1}s", self.elapsed.as_secs_f32());
                surface.draw_text(timer, &text, Color::WHITE, Anchor::MidTop, (rect.center_x(), rect.bottom()));
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
