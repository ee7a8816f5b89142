//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! Cycle reports are rendered as one JSON object per line so a serial
//! capture can be post-processed directly.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(caps) => {
                info!("START | pressure={} gas={}", caps.pressure, caps.gas);
            }
            AppEvent::CycleCompleted(report) => match serde_json::to_string(report) {
                Ok(json) => info!("CYCLE | {}", json),
                Err(e) => warn!("CYCLE | #{} (report not serialisable: {})", report.cycle, e),
            },
            AppEvent::ReadingRetained(e) => {
                warn!("RETAIN | {}", e);
            }
            AppEvent::CycleSkipped(e) => {
                warn!("SKIP | {}", e);
            }
            AppEvent::FatalSensorFault(e) => {
                error!("FAULT | {}", e);
            }
        }
    }
}
