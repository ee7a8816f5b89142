//! Polled, debounced push-button driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch (button A on the StickC, external pull-up).
//! The main loop samples the level every pass; a press is reported once,
//! after the level has stayed low for the debounce time.
//!
//! ```text
//!  Released ──low──▶ Debounce ──low ≥ 50ms──▶ Held ──high──▶ Released
//!                       │                       (emits Pressed once)
//!                       └──high──▶ Released
//! ```

use crate::drivers::hw_init;

const DEBOUNCE_MS: u64 = 50;

/// Button events emitted after debouncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Released,
    Debounce { since_ms: u64 },
    Held,
}

pub struct ButtonDriver {
    gpio: i32,
    state: DebounceState,
}

impl ButtonDriver {
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            state: DebounceState::Released,
        }
    }

    /// GPIO pin this button is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Sample the pin and advance the debouncer.
    pub fn tick(&mut self, now_ms: u64) -> Option<ButtonEvent> {
        let pressed = !hw_init::gpio_read(self.gpio);
        self.step(pressed, now_ms)
    }

    fn step(&mut self, pressed: bool, now_ms: u64) -> Option<ButtonEvent> {
        match (self.state, pressed) {
            (DebounceState::Released, true) => {
                self.state = DebounceState::Debounce { since_ms: now_ms };
                None
            }
            (DebounceState::Debounce { since_ms }, true) => {
                if now_ms.saturating_sub(since_ms) >= DEBOUNCE_MS {
                    self.state = DebounceState::Held;
                    Some(ButtonEvent::Pressed)
                } else {
                    None
                }
            }
            (_, false) => {
                self.state = DebounceState::Released;
                None
            }
            (DebounceState::Held, true) => None,
        }
    }
}
