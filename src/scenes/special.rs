//=========================================================================
// Special Scene
//=========================================================================
//
// Side room reachable from either play stage. WASD moves a marker while
// held; DOWN returns to the first stage. Loaded eagerly and kept warm, so
// the marker and its assets survive between visits.
//
//=========================================================================

use crate::core::assets::{AssetLoader, Font, FontSpec};
use crate::core::clock::FrameTime;
use crate::core::input::{InputEvent, KeyCode, KeyState};
use crate::core::render::{Anchor, Color, DisplayConfig, Surface};
use crate::core::scene::{Scene, Transition};
use crate::error::AssetError;

use super::DemoScene;

const LABEL_FONT_SIZE: u32 = 96;
const MARKER_FONT_SIZE: u32 = 32;

/// Pixels per frame while a movement key is held.
const MARKER_SPEED: i32 = 4;

pub struct SpecialScene {
    bounds: (i32, i32),
    center: (i32, i32),
    marker: (i32, i32),
    heading: (i32, i32),
    label_font: Option<Font>,
    marker_font: Option<Font>,
}

impl SpecialScene {
    pub fn new(display: &DisplayConfig) -> Self {
        let center = display.center();
        Self {
            bounds: (display.width as i32, display.height as i32),
            center,
            marker: (center.0, center.1 + 100),
            heading: (0, 0),
            label_font: None,
            marker_font: None,
        }
    }

    pub fn marker(&self) -> (i32, i32) {
        self.marker
    }
}

impl Scene<DemoScene> for SpecialScene {
    fn load_assets(&mut self, assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
        self.label_font = Some(assets.load_font(&FontSpec::builtin(LABEL_FONT_SIZE))?);
        self.marker_font = Some(assets.load_font(&FontSpec::builtin(MARKER_FONT_SIZE))?);
        Ok(())
    }

    fn cleanup(&mut self) {
        self.label_font = None;
        self.marker_font = None;
    }

    fn on_exit(&mut self) {
        self.heading = (0, 0);
    }

    fn process_input(&mut self, events: &[InputEvent], keys: &KeyState) -> Transition<DemoScene> {
        let axis = |negative: KeyCode, positive: KeyCode| {
            i32::from(keys.is_down(positive)) - i32::from(keys.is_down(negative))
        };
        self.heading = (axis(KeyCode::KeyA, KeyCode::KeyD), axis(KeyCode::KeyW, KeyCode::KeyS));

        if events.iter().any(|event| event.is_key_down(KeyCode::ArrowDown)) {
            return Transition::Switch(DemoScene::Play1);
        }
        Transition::Stay
    }

    fn update(&mut self, _time: &FrameTime) -> Transition<DemoScene> {
        let (x, y) = self.marker;
        self.marker = (
            (x + self.heading.0 * MARKER_SPEED).clamp(0, self.bounds.0),
            (y + self.heading.1 * MARKER_SPEED).clamp(0, self.bounds.1),
        );
        Transition::Stay
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill(Color::BLACK);

        if let Some(font) = &self.label_font {
            surface.draw_text(font, "Special Scene", Color::WHITE, Anchor::Center, self.center);
        }
        if let Some(font) = &self.marker_font {
            surface.draw_text(font, "*", Color::rgb(255, 215, 0), Anchor::Center, self.marker);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
