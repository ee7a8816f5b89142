//! Outbound application events.
//!
//! The [`ComfortService`](super::service::ComfortService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use serde::Serialize;

use crate::comfort::{ActuationState, DiscomfortIndex};
use crate::error::SensorError;

use super::ports::Capabilities;

/// One set of readings, produced once per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorSample {
    /// °C
    pub temperature: f32,
    /// %RH
    pub humidity: f32,
    /// hPa
    pub pressure: f32,
    /// ppm
    pub co2: u16,
}

impl Default for SensorSample {
    /// Power-on values shown until the first successful read.
    fn default() -> Self {
        Self {
            temperature: 0.0,
            humidity: 0.0,
            pressure: 1000.0,
            co2: 400,
        }
    }
}

/// Result of one completed pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleReport {
    pub cycle: u32,
    pub sample: SensorSample,
    /// Index before clamping.
    pub raw_index: i32,
    pub index: DiscomfortIndex,
    /// Value fed to the gas sensor for its next reading.
    pub absolute_humidity_mg_m3: u32,
    pub actuation: ActuationState,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started with these sensors fitted.
    Started(Capabilities),

    /// A pipeline run finished and the actuators were updated.
    CycleCompleted(CycleReport),

    /// A non-fatal read failure; previous values were kept.
    ReadingRetained(SensorError),

    /// A read failure aborted the cycle; it will be retried next period.
    CycleSkipped(SensorError),

    /// A read failure that halts the device.
    FatalSensorFault(SensorError),
}
