//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ComfortService (domain)
//! ```
//!
//! Driven adapters (sensors, servo, avatar, event sinks) implement these
//! traits.  The [`ComfortService`](super::service::ComfortService) consumes
//! them via generics, so the domain core never touches hardware directly.

use crate::comfort::{Expression, Palette};
use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Optional sensors fitted on this unit, queried once at startup.
/// Temperature / humidity is always required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Capabilities {
    /// A barometer is fitted.
    pub pressure: bool,
    /// A gas (eCO2) sensor is fitted.
    pub gas: bool,
}

impl Capabilities {
    pub const ALL: Self = Self {
        pressure: true,
        gas: true,
    };
}

/// Read-side port: the domain calls this to obtain sensor data.
///
/// Methods for a capability that [`capabilities`](Self::capabilities)
/// reports absent are never called by the service.
pub trait SensorPort {
    fn capabilities(&self) -> Capabilities;

    /// Temperature (°C) and relative humidity (%).
    fn read_temperature_humidity(&mut self) -> Result<(f32, f32), SensorError>;

    /// Barometric pressure (hPa).
    fn read_pressure(&mut self) -> Result<f32, SensorError>;

    /// Equivalent CO2 (ppm), compensated with the last value passed to
    /// [`set_humidity_compensation`](Self::set_humidity_compensation).
    fn read_co2(&mut self) -> Result<u16, SensorError>;

    /// Absolute humidity (mg/m³) applied to the next gas measurement.
    fn set_humidity_compensation(&mut self, absolute_humidity_mg_m3: u32) -> Result<(), SensorError>;

    /// Restore the gas sensor's IAQ baseline.
    fn set_co2_baseline(&mut self, eco2: u16, tvoc: u16) -> Result<(), SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (driven adapters: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Maximum speech text length accepted by the avatar, in bytes.
pub const SPEECH_TEXT_MAX: usize = 100;

/// The on-screen avatar.
pub trait AvatarPort {
    fn set_expression(&mut self, expression: Expression);

    fn set_palette(&mut self, palette: Palette);

    /// Speech-bubble text, at most [`SPEECH_TEXT_MAX`] bytes.
    fn set_speech_text(&mut self, text: &str);
}

/// The servo arm.
pub trait ServoPort {
    /// Move to `degrees` (0–180).
    fn set_angle(&mut self, degrees: i32);
}

/// Front-panel inputs, polled once per loop pass.
pub trait InputPort {
    /// `true` when the user asked for an immediate re-measurement.
    ///
    /// `now_ms` is the same monotonic timestamp the speech rotation sees.
    fn poll_refresh_request(&mut self, now_ms: u64) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
