//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and every actuator/input driver, exposing them
//! through [`SensorPort`], [`ServoPort`], [`AvatarPort`] and
//! [`InputPort`].  This is the only module in the system that touches
//! actual hardware.  On non-espidf targets, the underlying drivers use
//! cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::app::ports::{AvatarPort, Capabilities, InputPort, SensorPort, ServoPort};
use crate::comfort::{Expression, Palette};
use crate::drivers::avatar::AvatarFace;
use crate::drivers::button::{ButtonDriver, ButtonEvent};
use crate::drivers::servo::ServoDriver;
use crate::error::SensorError;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I, D> {
    sensor_hub: SensorHub<I, D>,
    servo: ServoDriver,
    avatar: AvatarFace,
    button: ButtonDriver,
}

impl<I: I2c, D: DelayNs> HardwareAdapter<I, D> {
    pub fn new(
        sensor_hub: SensorHub<I, D>,
        servo: ServoDriver,
        avatar: AvatarFace,
        button: ButtonDriver,
    ) -> Self {
        Self {
            sensor_hub,
            servo,
            avatar,
            button,
        }
    }

    pub fn avatar(&self) -> &AvatarFace {
        &self.avatar
    }

    pub fn servo(&self) -> &ServoDriver {
        &self.servo
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I: I2c, D: DelayNs> SensorPort for HardwareAdapter<I, D> {
    fn capabilities(&self) -> Capabilities {
        self.sensor_hub.capabilities()
    }

    fn read_temperature_humidity(&mut self) -> Result<(f32, f32), SensorError> {
        self.sensor_hub.read_temperature_humidity()
    }

    fn read_pressure(&mut self) -> Result<f32, SensorError> {
        self.sensor_hub.read_pressure()
    }

    fn read_co2(&mut self) -> Result<u16, SensorError> {
        self.sensor_hub.read_co2()
    }

    fn set_humidity_compensation(&mut self, absolute_humidity_mg_m3: u32) -> Result<(), SensorError> {
        self.sensor_hub.set_humidity_compensation(absolute_humidity_mg_m3)
    }

    fn set_co2_baseline(&mut self, eco2: u16, tvoc: u16) -> Result<(), SensorError> {
        self.sensor_hub.set_co2_baseline(eco2, tvoc)
    }
}

// ── Actuator port implementations ─────────────────────────────

impl<I, D> ServoPort for HardwareAdapter<I, D> {
    fn set_angle(&mut self, degrees: i32) {
        self.servo.set_angle(degrees);
    }
}

impl<I, D> AvatarPort for HardwareAdapter<I, D> {
    fn set_expression(&mut self, expression: Expression) {
        self.avatar.set_expression(expression);
    }

    fn set_palette(&mut self, palette: Palette) {
        self.avatar.set_palette(palette);
    }

    fn set_speech_text(&mut self, text: &str) {
        self.avatar.set_speech_text(text);
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<I, D> InputPort for HardwareAdapter<I, D> {
    fn poll_refresh_request(&mut self, now_ms: u64) -> bool {
        matches!(self.button.tick(now_ms), Some(ButtonEvent::Pressed))
    }
}
