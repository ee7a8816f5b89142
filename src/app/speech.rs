//! Speech-bubble text rotation.
//!
//! The avatar cycles through the latest readings and the discomfort index,
//! holding each message for a fixed dwell time.  Rotation is driven by a
//! monotonic millisecond clock passed in by the caller, so the main loop
//! never blocks on it and the sensing cadence stays independent.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::comfort::DiscomfortIndex;

use super::events::SensorSample;
use super::ports::{Capabilities, SPEECH_TEXT_MAX};

/// Formatted speech text, bounded to what the avatar accepts.
pub type SpeechText = String<SPEECH_TEXT_MAX>;

/// The fixed message set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Temperature,
    Humidity,
    Pressure,
    Co2,
    DiscomfortIndex,
}

/// Messages shown for a set of fitted sensors, in display order.
pub fn messages_for(capabilities: Capabilities) -> Vec<Message, 5> {
    let mut out = Vec::new();
    let _ = out.push(Message::Temperature);
    let _ = out.push(Message::Humidity);
    if capabilities.pressure {
        let _ = out.push(Message::Pressure);
    }
    if capabilities.gas {
        let _ = out.push(Message::Co2);
    }
    let _ = out.push(Message::DiscomfortIndex);
    out
}

/// Render one message from the current readings.
pub fn format_message(message: Message, sample: &SensorSample, index: DiscomfortIndex) -> SpeechText {
    let mut text = SpeechText::new();
    // Every message fits comfortably in 100 bytes; on overflow the text is
    // cut short rather than dropped.
    let _ = match message {
        Message::Temperature => write!(text, "気温 : {:2.1} 'C", sample.temperature),
        Message::Humidity => write!(text, "湿度 : {:2.1} % ", sample.humidity),
        Message::Pressure => write!(text, "気圧 : {:4.1} hPa", sample.pressure),
        Message::Co2 => write!(text, "CO2 : {} ppm", sample.co2),
        Message::DiscomfortIndex => write!(text, "不快指数 : {}", index),
    };
    text
}

/// Round-robin over [`messages_for`] with a fixed dwell.
pub struct SpeechRotator {
    messages: Vec<Message, 5>,
    next: usize,
    shown_at_ms: Option<u64>,
    dwell_ms: u32,
}

impl SpeechRotator {
    pub fn new(capabilities: Capabilities, dwell_ms: u32) -> Self {
        Self {
            messages: messages_for(capabilities),
            next: 0,
            shown_at_ms: None,
            dwell_ms,
        }
    }

    fn dwell_elapsed(&self, now_ms: u64) -> bool {
        match self.shown_at_ms {
            None => true,
            Some(at) => now_ms.saturating_sub(at) >= u64::from(self.dwell_ms),
        }
    }

    /// `true` when the next [`poll`](Self::poll) will start a new rotation
    /// with the first message.
    pub fn rotation_due(&self, now_ms: u64) -> bool {
        self.next == 0 && self.dwell_elapsed(now_ms)
    }

    /// The message to show now, or `None` while the current one is still
    /// within its dwell.
    pub fn poll(&mut self, now_ms: u64) -> Option<Message> {
        if !self.dwell_elapsed(now_ms) {
            return None;
        }
        let message = *self.messages.get(self.next)?;
        self.next = (self.next + 1) % self.messages.len();
        self.shown_at_ms = Some(now_ms);
        Some(message)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
