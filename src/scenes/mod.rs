//=========================================================================
// Demo Scenes
//=========================================================================
//
// A five-scene game shell wired for both scene stores.
//
// Routes:
// ```text
//   title ──SPACE──► play1 ──RIGHT (finish)──► play2 ──RIGHT (finish)──► end
//     │                │  ▲                      │                        │
//    ESC              UP  DOWN                   UP                 RIGHT (finish)
//     ▼                ▼  │                      ▼                        ▼
//   quit             special ◄──────────────────┘                      title
// ```
//
// Policies (registry): title eager; play1/play2 lazy with cleanup;
// special eager and kept warm; end defaults.
//
//=========================================================================

//=== Module Declarations =================================================

mod end;
mod play;
mod special;
mod title;

//=== Public API ==========================================================

pub use end::EndScene;
pub use play::PlayScene;
pub use special::SpecialScene;
pub use title::TitleScene;

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetLoader;
use crate::core::render::DisplayConfig;
use crate::core::scene::{SceneFactory, SceneKey, ScenePolicy, SceneRegistry};
use crate::error::StageError;

//=== DemoScene ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoScene {
    Title,
    Play1,
    Play2,
    Special,
    End,
}

impl SceneKey for DemoScene {}

//=== Store Assembly ======================================================

/// Persistent pool: every scene lives for the whole run.
///
/// Eager scenes (title, special) load their assets here.
pub fn build_registry(
    display: &DisplayConfig,
    assets: &mut dyn AssetLoader,
) -> Result<SceneRegistry<DemoScene>, StageError> {
    SceneRegistry::builder(DemoScene::Title)
        .register(DemoScene::Title, TitleScene::new(display), ScenePolicy::new().eager())
        .register(
            DemoScene::Play1,
            PlayScene::new(display, "Play Scene 1", DemoScene::Play2),
            ScenePolicy::new(),
        )
        .register(
            DemoScene::Play2,
            PlayScene::new(display, "Play Scene 2", DemoScene::End),
            ScenePolicy::new(),
        )
        .register(
            DemoScene::Special,
            SpecialScene::new(display),
            ScenePolicy::new().eager().keep_warm(),
        )
        .register(DemoScene::End, EndScene::new(display), ScenePolicy::new())
        .build(assets)
}

/// Transient construction: a fresh scene on every visit.
pub fn build_factory(
    display: &DisplayConfig,
    assets: &mut dyn AssetLoader,
) -> Result<SceneFactory<DemoScene>, StageError> {
    let (title, play1, play2, special, end) = (
        display.clone(),
        display.clone(),
        display.clone(),
        display.clone(),
        display.clone(),
    );

    SceneFactory::builder(DemoScene::Title)
        .register(DemoScene::Title, move || TitleScene::new(&title))
        .register(DemoScene::Play1, move || {
            PlayScene::new(&play1, "Play Scene 1", DemoScene::Play2)
        })
        .register(DemoScene::Play2, move || {
            PlayScene::new(&play2, "Play Scene 2", DemoScene::End)
        })
        .register(DemoScene::Special, move || SpecialScene::new(&special))
        .register(DemoScene::End, move || EndScene::new(&end))
        .build(assets)
}

//=========================================================================
// Unit Tests
//=========================================================================
