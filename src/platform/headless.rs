//=========================================================================
// Headless Platform
//=========================================================================
//
// Window-less backend: input is fed through a channel, frames are
// recorded into a `DisplayList`.
//
// Architecture:
//   InputFeed ──Sender<InputBatch>──► EventCollector ──► driver
//                                     DisplayList ◄──── render()
//
// Dropping the `InputFeed` is seen as the window going away: the next
// pump reports a `CloseRequested`.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Sender};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetLoader, AssetStore};
use crate::core::input::{InputEvent, KeyState};
use crate::core::platform_bridge::{EventCollector, InputBatch, Platform};
use crate::core::render::{DisplayConfig, DisplayList, Surface};
use crate::error::PlatformError;

//=== InputFeed ===========================================================

/// Sending half of a headless platform's input channel.
#[derive(Clone)]
pub struct InputFeed {
    sender: Sender<InputBatch>,
}

impl InputFeed {
    /// Queues one event for the next pump.
    pub fn push(&self, event: InputEvent) {
        self.send(std::iter::once(event));
    }

    /// Queues several events, delivered in order within one pump.
    pub fn push_all(&self, events: impl IntoIterator<Item = InputEvent>) {
        self.send(events);
    }

    /// Queues a window-close request.
    pub fn close(&self) {
        self.push(InputEvent::CloseRequested);
    }

    fn send(&self, events: impl IntoIterator<Item = InputEvent>) {
        let mut batch = InputBatch::default();
        for event in events {
            if event.is_continuous() {
                batch.continuous.push(event);
            } else {
                batch.discrete.push(event);
            }
        }

        if batch.is_empty() {
            return;
        }

        if self.sender.send(batch).is_err() {
            warn!(target: "platform::input", "Headless platform dropped, discarding input");
        }
    }
}

//=== HeadlessPlatform ====================================================

/// Platform backend without a window.
pub struct HeadlessPlatform {
    collector: EventCollector,
    display: DisplayList,
    assets: AssetStore,
}

impl HeadlessPlatform {
    /// Creates the platform and the feed that drives its input.
    pub fn new(display: &DisplayConfig, assets: AssetStore) -> (Self, InputFeed) {
        let (sender, receiver) = unbounded();
        debug!(
            target: "platform",
            "Headless platform initialized ({}x{})", display.width, display.height
        );

        let platform = Self {
            collector: EventCollector::new(receiver),
            display: DisplayList::new(display.width, display.height),
            assets,
        };
        (platform, InputFeed { sender })
    }

    /// Recorded frames.
    pub fn display_list(&self) -> &DisplayList {
        &self.display
    }

    pub fn asset_store(&self) -> &AssetStore {
        &self.assets
    }
}

impl Platform for HeadlessPlatform {
    fn pump(&mut self) -> Result<(), PlatformError> {
        self.collector.collect_frame();
        Ok(())
    }

    fn key_state(&self) -> &KeyState {
        self.collector.key_state()
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        self.collector.take_events()
    }

    fn surface(&mut self) -> &mut dyn Surface {
        &mut self.display
    }

    fn assets(&mut self) -> &mut dyn AssetLoader {
        &mut self.assets
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.display.present();
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
