//! SHT3x temperature / relative humidity sensor (I2C, address 0x44).
//!
//! Single-shot, high-repeatability measurements with clock stretching.
//! Each measurement returns two CRC-protected words: temperature then
//! humidity.
//!
//! The driver borrows the bus per call so it can share one I2C peripheral
//! with the other sensors on the unit.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::error::{SensorError, SensorKind};

use super::crc::checked_word;

const KIND: SensorKind = SensorKind::TemperatureHumidity;

const CMD_MEASURE_HIGH_CLOCK_STRETCH: [u8; 2] = [0x2C, 0x06];
const CMD_READ_STATUS: [u8; 2] = [0xF3, 0x2D];

/// Worst-case high-repeatability conversion time.
const MEASURE_DELAY_MS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sht3xReading {
    /// °C
    pub temperature: f32,
    /// %RH
    pub humidity: f32,
}

/// Raw temperature word to °C.
pub fn temperature_from_raw(raw: u16) -> f32 {
    -45.0 + 175.0 * f32::from(raw) / 65535.0
}

/// Raw humidity word to %RH.
pub fn humidity_from_raw(raw: u16) -> f32 {
    100.0 * f32::from(raw) / 65535.0
}

pub struct Sht3x {
    address: u8,
}

impl Sht3x {
    pub const fn new(address: u8) -> Self {
        Self { address }
    }

    /// Confirm the sensor answers by reading its status register.
    pub fn probe<I: I2c>(&self, i2c: &mut I) -> Result<(), SensorError> {
        let mut buf = [0u8; 3];
        i2c.write_read(self.address, &CMD_READ_STATUS, &mut buf)
            .map_err(|_| SensorError::NotPresent(KIND))?;
        checked_word(&buf).ok_or(SensorError::Crc(KIND))?;
        Ok(())
    }

    /// Trigger one measurement and read it back.
    pub fn measure<I: I2c, D: DelayNs>(
        &self,
        i2c: &mut I,
        delay: &mut D,
    ) -> Result<Sht3xReading, SensorError> {
        i2c.write(self.address, &CMD_MEASURE_HIGH_CLOCK_STRETCH)
            .map_err(|_| SensorError::Bus(KIND))?;
        delay.delay_ms(MEASURE_DELAY_MS);

        let mut buf = [0u8; 6];
        i2c.read(self.address, &mut buf)
            .map_err(|_| SensorError::Bus(KIND))?;

        let t_raw = checked_word(&buf[0..3]).ok_or(SensorError::Crc(KIND))?;
        let rh_raw = checked_word(&buf[3..6]).ok_or(SensorError::Crc(KIND))?;

        Ok(Sht3xReading {
            temperature: temperature_from_raw(t_raw),
            humidity: humidity_from_raw(rh_raw),
        })
    }
}
