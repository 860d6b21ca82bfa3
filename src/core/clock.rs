//=========================================================================
// Frame Clock
//=========================================================================
//
// Fixed-rate pacing for the driver loop.
//
// `tick()` is the loop's only suspension point: it sleeps for whatever is
// left of the frame budget and reports how long the frame actually took.
// Pacing never changes the order of scene calls, only their spacing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

//=== FrameTime ===========================================================

/// Timing information handed to `Scene::update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Zero-based index of the current frame.
    pub frame: u64,

    /// Duration of the previous frame (zero on the first frame).
    pub delta: Duration,
}

//=== FrameClock ==========================================================

/// Caps a loop at a target number of frames per second.
#[derive(Debug)]
pub struct FrameClock {
    frame_duration: Duration,
    last_tick: Instant,
    last_delta: Duration,
    frames: u64,
}

/// Frame budget for `fps` frames per second.
///
/// # Panics
///
/// Panics if `fps` is not positive, or so small that one frame does not fit
/// in a `Duration`.
pub(crate) fn frame_budget(fps: f64) -> Duration {
    assert!(fps > 0.0, "FPS must be positive, got {}", fps);
    match Duration::try_from_secs_f64(fps.recip()) {
        Ok(budget) => budget,
        Err(_) => panic!("FPS {} is too small: one frame would not fit in a Duration", fps),
    }
}

impl FrameClock {
    /// Creates a clock targeting `fps` frames per second.
    ///
    /// # Panics
    ///
    /// Panics if `fps <= 0.0` or if the frame budget overflows `Duration`.
    pub fn new(fps: f64) -> Self {
        Self {
            frame_duration: frame_budget(fps),
            last_tick: Instant::now(),
            last_delta: Duration::ZERO,
            frames: 0,
        }
    }

    /// Target duration of one frame.
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Sleeps out the rest of the frame budget and returns the frame's length.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.frame_duration {
            thread::sleep(self.frame_duration - elapsed);
        }

        let now = Instant::now();
        self.last_delta = now - self.last_tick;
        self.last_tick = now;
        self.frames += 1;
        self.last_delta
    }

    /// Timing of the frame about to run.
    pub fn frame_time(&self) -> FrameTime {
        FrameTime {
            frame: self.frames,
            delta: self.last_delta,
        }
    }

    /// Number of completed ticks.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
