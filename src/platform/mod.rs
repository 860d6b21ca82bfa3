//=========================================================================
// Platform Subsystem
//
// Backends implementing the driver's `Platform` contract.
//
// Architecture (winit backend):
// ```text
//  WinitPlatform::pump()
//  ┌──────────────────────────────┐
//  │  pump_app_events(0)          │
//  │   ↓                          │
//  │  WindowApp (handler)         │
//  │   ├─ InputProcessor          │
//  │   │   └─ winit → InputEvent  │
//  │   └─ InputBuffer             │
//  │       ├─ discrete: Vec<>     │
//  │       └─ latest motion       │
//  │   ↓ (flush)                  │
//  │  Sender<InputBatch> ─────────┼──► EventCollector ──► driver
//  └──────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Pumped, not run**: the driver owns the loop and calls `pump()` once
//   per frame, so the event loop is polled with a zero timeout instead of
//   taking over the thread
// - **Close is an input event**: window close and event-loop exit become
//   `InputEvent::CloseRequested`, handled by the driver's quit filter
// - **Main thread requirement**: winit mandates the main thread on
//   macOS/iOS, so `WinitPlatform` must be built and pumped there
//
// Backends:
// - `WinitPlatform`: real window, frames presented through the title bar
// - `HeadlessPlatform`: channel-fed input, recorded frames (tests, tools)
//
//=========================================================================

//=== Submodules ==========================================================

mod headless;
mod input_buffer;
mod input_processor;

pub use headless::{HeadlessPlatform, InputFeed};

//=== External Crates =====================================================

use std::time::Duration;

use crossbeam_channel::{unbounded, Sender};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::assets::{AssetLoader, AssetStore};
use crate::core::input::{InputEvent, KeyState};
use crate::core::platform_bridge::{EventCollector, InputBatch, Platform};
use crate::core::render::{DisplayConfig, DisplayList, Surface};
use crate::error::PlatformError;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowApp ===========================================================

/// Winit application handler: owns the window and buffers its input.
struct WindowApp {
    config: DisplayConfig,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    buffer: InputBuffer,
    event_sender: Sender<InputBatch>,
    input_processor: InputProcessor,

    /// Set once a close has been queued, so exit is reported only once.
    close_queued: bool,

    /// Window creation failure, surfaced by the next `pump()`.
    creation_error: Option<String>,
}

impl WindowApp {
    fn new(config: DisplayConfig, event_sender: Sender<InputBatch>) -> Self {
        Self {
            config,
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            close_queued: false,
            creation_error: None,
        }
    }

    fn queue_close(&mut self) {
        if !self.close_queued {
            self.close_queued = true;
            self.buffer.push_discrete(InputEvent::CloseRequested);
        }
    }

    /// Sends everything buffered during the last pump as one batch.
    fn flush_input_buffer(&mut self) {
        let Some(batch) = self.buffer.drain() else {
            return;
        };

        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            batch.discrete.len(),
            batch.continuous.len()
        );

        let total = batch.len();
        if self.event_sender.send(batch).is_err() {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events", total
            );
        }
    }
}

impl ApplicationHandler for WindowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.creation_error = Some(e.to_string());
                self.queue_close();
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.queue_close();
                event_loop.exit();
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_mouse_move(position.x, position.y);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Repeat or unmapped key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            _ => {
                // Resized, Focused, RedrawRequested, etc.: not scene input
            }
        }
    }
}

//=== WinitPlatform =======================================================

/// Desktop backend built on a pumped winit event loop.
///
/// Frames are recorded into a [`DisplayList`]; the first text of each
/// presented frame is mirrored into the window title.
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    app: WindowApp,
    collector: EventCollector,
    display: DisplayList,
    assets: AssetStore,
    shown_title: String,
}

impl WinitPlatform {
    /// Creates the event loop. The window itself opens on the first pump.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::EventLoopCreation`] if the OS refuses an
    /// event loop (or one already exists in this process).
    pub fn new(display: &DisplayConfig, assets: AssetStore) -> Result<Self, PlatformError> {
        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;
        let (sender, receiver) = unbounded();

        info!(target: "platform", "Platform subsystem initialized");
        Ok(Self {
            event_loop,
            app: WindowApp::new(display.clone(), sender),
            collector: EventCollector::new(receiver),
            display: DisplayList::new(display.width, display.height),
            assets,
            shown_title: display.title.clone(),
        })
    }
}

impl Platform for WinitPlatform {
    fn pump(&mut self) -> Result<(), PlatformError> {
        let status = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.app);

        if let PumpStatus::Exit(code) = status {
            debug!(target: "platform", "Event loop exited with code {}", code);
            self.app.queue_close();
        }

        self.app.flush_input_buffer();
        self.collector.collect_frame();

        match self.app.creation_error.take() {
            Some(message) => Err(PlatformError::WindowCreation(message)),
            None => Ok(()),
        }
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

        let title = frame_title(&self.app.config.title, &self.display);
        if let Some(window) = &self.app.window {
            if title != self.shown_title {
                window.set_title(&title);
                self.shown_title = title;
            }
            window.request_redraw();
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.app.window.take().is_some() {
            info!(target: "platform", "Window closed");
        }
    }
}

//--- Helpers -------------------------------------------------------------

/// Window title for a presented frame: base title plus the frame's first text.
fn frame_title(base: &str, display: &DisplayList) -> String {
    match display.presented_texts().next() {
        Some(text) => format!("{} | {}", base, text),
        None => base.to_owned(),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
