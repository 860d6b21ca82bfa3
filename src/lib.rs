//=========================================================================
// Stagehand - Library Root
//
// Scene lifecycle engine: runs one active scene at a time through a fixed
// input → update → render loop and manages transitions between scenes.
//
// Responsibilities:
// - Define the scene contract and its lifecycle (`core::scene`)
// - Run the frame loop and resolve transitions (`DriverBuilder` / `Driver`)
// - Separate quit signals from scene input (`core::input`)
// - Provide window (winit) and headless platform backends (`platform`)
//
// Typical usage:
// ```no_run
// use stagehand::prelude::*;
// use stagehand::{platform::WinitPlatform, scenes};
//
// fn main() -> anyhow::Result<()> {
//     let display = DisplayConfig::default();
//     let mut platform = WinitPlatform::new(&display, AssetStore::new("assets"))?;
//     let registry = scenes::build_registry(&display, platform.assets())?;
//     DriverBuilder::new().build(registry, platform).run()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scene system and everything it is built on (input,
// rendering surface, assets, clock, platform contract).
//
// `platform` holds the concrete backends; `scenes` the demo game shell.
//
pub mod core;
pub mod error;
pub mod platform;
pub mod prelude;
pub mod scenes;

//--- Internal Modules ----------------------------------------------------

mod driver;

//--- Public Exports ------------------------------------------------------

pub use driver::{Driver, DriverBuilder, ExitReason, TickControl};
pub use error::{AssetError, PlatformError, StageError};
