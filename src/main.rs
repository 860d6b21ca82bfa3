//=========================================================================
// Stagehand Demo
//
// Opens the window, builds the demo scene registry and runs it at 60 FPS
// until the window is closed, Ctrl+Q is pressed, or ESC on the title.
//
// Logging defaults to `info`; override with RUST_LOG.
//
//=========================================================================

use log::info;

use stagehand::platform::WinitPlatform;
use stagehand::prelude::*;
use stagehand::scenes;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let display = DisplayConfig::default();
    let mut platform = WinitPlatform::new(&display, AssetStore::new("assets"))?;
    let registry = scenes::build_registry(&display, platform.assets())?;

    let reason = DriverBuilder::new()
        .with_fps(60.0)
        .build(registry, platform)
        .run()?;

    info!("Exited: {:?}", reason);
    Ok(())
}
