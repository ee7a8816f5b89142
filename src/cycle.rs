//! Periodic cycle controller.
//!
//! A single atomic flag shared between the periodic timer callback
//! (producer) and the main loop (consumer).
//!
//! ```text
//!            timer callback (every period)
//!   ┌──────┐ ─────────────────────────────▶ ┌─────┐
//!   │ Idle │                                │ Due │
//!   └──────┘ ◀───────────────────────────── └─────┘
//!            orchestrator, after one full pipeline run
//! ```
//!
//! The callback only stores `true`; it never touches sensor or actuator
//! state.  A tick that lands while the pipeline is running is absorbed by
//! the flag, so at worst one cycle is delayed by one loop pass.

use core::sync::atomic::{AtomicBool, Ordering};

/// Observable state of a [`CycleFlag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// Nothing to do until the next timer tick.
    Idle,
    /// The pipeline should run on the next loop pass.
    Due,
}

/// Single-producer / single-consumer "cycle due" flag.
pub struct CycleFlag {
    due: AtomicBool,
}

impl CycleFlag {
    /// A new flag in the **Due** state, so the first loop pass runs the
    /// pipeline immediately instead of waiting a full period.
    pub const fn new() -> Self {
        Self {
            due: AtomicBool::new(true),
        }
    }

    /// Idle → Due.  Lock-free; safe from timer/ISR context.
    pub fn mark_due(&self) {
        self.due.store(true, Ordering::Release);
    }

    /// Whether a cycle is pending, without consuming it.
    pub fn is_due(&self) -> bool {
        self.due.load(Ordering::Acquire)
    }

    /// Due → Idle.  Called by the orchestrator after the pipeline finished.
    pub fn complete(&self) {
        self.due.store(false, Ordering::Release);
    }

    pub fn state(&self) -> CycleState {
        if self.is_due() {
            CycleState::Due
        } else {
            CycleState::Idle
        }
    }
}

impl Default for CycleFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide flag the hardware cycle timer writes to.
pub static CYCLE_FLAG: CycleFlag = CycleFlag::new();

/// Zero-argument callback handed to [`crate::drivers::hw_timer::every`].
pub fn on_cycle_timer() {
    CYCLE_FLAG.mark_due();
}
