//=========================================================================
// Title Scene
//=========================================================================
//
// Game title above the centre line. SPACE starts play, ESC quits.
//
//=========================================================================

use crate::core::assets::{AssetLoader, Font, FontSpec};
use crate::core::clock::FrameTime;
use crate::core::input::{InputEvent, KeyCode, KeyState};
use crate::core::render::{Anchor, Color, DisplayConfig, Surface};
use crate::core::scene::{Scene, Transition};
use crate::error::AssetError;

use super::DemoScene;

const TITLE_FONT_SIZE: u32 = 64;
const HINT_FONT_SIZE: u32 = 24;

pub struct TitleScene {
    title: String,
    center: (i32, i32),
    title_font: Option<Font>,
    hint_font: Option<Font>,
}

impl TitleScene {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            title: display.title.clone(),
            center: display.center(),
            title_font: None,
            hint_font: None,
        }
    }
}

impl Scene<DemoScene> for TitleScene {
    fn load_assets(&mut self, assets: &mut dyn AssetLoader) -> Result<(), AssetError> {
        self.title_font = Some(assets.load_font(&FontSpec::builtin(TITLE_FONT_SIZE))?);
        self.hint_font = Some(assets.load_font(&FontSpec::builtin(HINT_FONT_SIZE))?);
        Ok(())
    }

    fn cleanup(&mut self) {
        self.title_font = None;
        self.hint_font = None;
    }

    fn process_input(&mut self, events: &[InputEvent], _keys: &KeyState) -> Transition<DemoScene> {
        for event in events {
            if event.is_key_down(KeyCode::Space) {
                return Transition::Switch(DemoScene::Play1);
            }
            if event.is_key_down(KeyCode::Escape) {
                return Transition::Quit;
            }
        }
        Transition::Stay
    }

    fn update(&mut self, _time: &FrameTime) -> Transition<DemoScene> {
        Transition::Stay
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill(Color::BLACK);

        if let Some(font) = &self.title_font {
            surface.draw_text(font, &self.title, Color::WHITE, Anchor::MidBottom, self.center);
        }
        if let Some(font) = &self.hint_font {
            surface.draw_text(font, "Press SPACE", Color::WHITE, Anchor::MidTop, self.center);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::AssetStore;
    use crate::core::render::{DisplayList, DrawCommand};

    #[test]
    fn space_starts_play_and_escape_quits() {
        let mut scene = TitleScene::new(&DisplayConfig::default());
        let keys = KeyState::new();

        assert_eq!(
            scene.process_input(&[InputEvent::key_down(KeyCode::Space)], &keys),
            Transition::Switch(DemoScene::Play1)
        );
        assert_eq!(
            scene.process_input(&[InputEvent::key_down(KeyCode::Escape)], &keys),
            Transition::Quit
        );
        assert_eq!(
            scene.process_input(&[InputEvent::key_up(KeyCode::Space)], &keys),
            Transition::Stay
        );
    }

    #[test]
    fn title_sits_on_the_centre_line() {
        let mut assets = AssetStore::new(".");
        let mut scene = TitleScene::new(&DisplayConfig::default());
        scene.load_assets(&mut assets).unwrap();

        let mut display = DisplayList::new(800, 600);
        scene.render(&mut display);
        display.present();

        match &display.presented()[1] {
            DrawCommand::Text { text, rect, font_size, .. } => {
                assert_eq!(text, "Name of Game");
                assert_eq!(*font_size, 64);
                assert_eq!(rect.center_x(), 400);
                assert_eq!(rect.bottom(), 300);
            }
            other => panic!("Expected title text, found {:?}", other),
        }
    }

    #[test]
    fn render_without_assets_only_clears() {
        let scene = TitleScene::new(&DisplayConfig::default());
        let mut display = DisplayList::new(800, 600);

        scene.render(&mut display);

        assert_eq!(display.pending(), &[DrawCommand::Fill(Color::BLACK)]);
    }
}
