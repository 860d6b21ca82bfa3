//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges platform backends (winit, headless) with the driver.
//
// Components:
// - `interface`: the `Platform` trait and the `InputBatch` message
// - `event_collector`: core-side draining of input batches
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::EventCollector;
pub use interface::{InputBatch, Platform};
