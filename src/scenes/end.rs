//=========================================================================
// End Scene
//=========================================================================

use crate::core::assets::{AssetLoader, Font, FontSpec};
use crate::core::clock::FrameTime;
use crate::core::input::{InputEvent, KeyCode, KeyState};
use crate::core::render::{Anchor, Color, DisplayConfig, Surface};
use crate::core::scene::{Scene, Transition};
use crate::error::AssetError;

use super::DemoScene;

const LABEL_FONT_SIZE: u32 = 96;

/// Closing screen. RIGHT finishes it and restarts from the title.
pub struct EndScene {
    center: (i32, i32),
    font: Option<Font>,
}

impl EndScene {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            center: display.center(),
            font: None,
        }
    }
}

impl Scene<DemoScene> for EndScene {
    fn load_assets(&mut self, assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
        self.font = Some(assets.load_font(&FontSpec::builtin(LABEL_FONT_SIZE))?);
        Ok(())
    }

    fn cleanup(&mut self) {
        self.font = None;
    }

    fn process_input(&mut self, events: &[InputEvent], _keys: &KeyState) -> Transition<DemoScene> {
        if events.iter().any(|event| event.is_key_down(KeyCode::ArrowRight)) {
            Transition::Finish(DemoScene::Title)
        } else {
            Transition::Stay
        }
    }

    fn update(&mut self, _time: &FrameTime) -> Transition<DemoScene> {
        Transition::Stay
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill(Color::BLACK);
        if let Some(font) = &self.font {
            surface.draw_text(font, "End Scene", Color::WHITE, Anchor::Center, self.center);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
