//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side end of the platform channel.
//
// Architecture:
//   Receiver<InputBatch> → collect_frame() → KeyState + frame queue
//
// Bounded polling prevents starvation. A disconnected sender means the
// window side is gone; that is reported once as `CloseRequested` so the
// driver's quit detection handles it like any other close.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::InputBatch;
use crate::core::input::{InputEvent, KeyState};

//=== EventCollector ======================================================

/// Drains input batches into a per-frame queue and tracks held keys.
pub struct EventCollector {
    receiver: Receiver<InputBatch>,
    key_state: KeyState,
    queue: Vec<InputEvent>,
    disconnected: bool,
}

impl EventCollector {
    const MAX_BATCHES_PER_FRAME: usize = 100;

    pub fn new(receiver: Receiver<InputBatch>) -> Self {
        Self {
            receiver,
            key_state: KeyState::new(),
            queue: Vec::with_capacity(16),
            disconnected: false,
        }
    }

    /// Collects pending batches (bounded). Returns the number of events queued.
    pub fn collect_frame(&mut self) -> usize {
        self.key_state.begin_frame();
        let before = self.queue.len();
        let mut drained = 0;

        while drained < Self::MAX_BATCHES_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(batch) => {
                    self.absorb(batch);
                    drained += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        warn!("Input channel disconnected, treating as close request");
                        self.disconnected = true;
                        self.queue.push(InputEvent::CloseRequested);
                    }
                    break;
                }
            }
        }

        if drained >= Self::MAX_BATCHES_PER_FRAME {
            warn!("Input backlog: drained {} batches this frame", drained);
        }

        let collected = self.queue.len() - before;
        if collected > 0 {
            trace!("Collected {} input events", collected);
        }
        collected
    }

    /// Held-key state including everything collected so far.
    pub fn key_state(&self) -> &KeyState {
        &self.key_state
    }

    /// Takes the queued events, leaving the queue empty.
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    fn absorb(&mut self, batch: InputBatch) {
        for event in batch.discrete.into_iter().chain(batch.continuous) {
            self.key_state.apply(&event);
            self.queue.push(event);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
