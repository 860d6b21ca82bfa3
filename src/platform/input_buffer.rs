//=========================================================================
// Input Buffer
//
// Window-side accumulator for the input of one pump.
//
// Responsibilities:
// - Keep discrete events (keys, buttons, close) in arrival order
// - Drop back-to-back duplicates (auto-repeat that slipped through)
// - Coalesce mouse motion to the latest position
// - Hand everything over as one `InputBatch` via `drain()`
//
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::input::InputEvent;
use crate::core::platform_bridge::InputBatch;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    latest_motion: Option<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            latest_motion: None,
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // The latest motion always replaces any earlier one.
    //
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.latest_motion = Some(event);
    }

    //--- Discrete Event Handling -----------------------------------------

    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes the buffered input, or `None` if nothing arrived.
    pub(crate) fn drain(&mut self) -> Option<InputBatch> {
        if self.is_empty() {
            return None;
        }

        Some(InputBatch {
            discrete: std::mem::take(&mut self.discrete),
            continuous: self.latest_motion.take().into_iter().collect(),
        })
    }

    //--- Utilities --------------------------------------------------------

    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + usize::from(self.latest_motion.is_some())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.latest_motion.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
