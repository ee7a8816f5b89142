//! Sensor subsystem — individual I2C drivers and the aggregating [`SensorHub`].
//!
//! All three sensors hang off one I2C bus.  The drivers hold only their
//! address and calibration and borrow the bus per call; the hub owns the
//! bus and the delay provider and implements [`SensorPort`] for the
//! application core.

pub mod crc;
pub mod qmp6988;
pub mod sgp30;
pub mod sht3x;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::info;

use crate::app::ports::{Capabilities, SensorPort};
use crate::error::{InitError, SensorError, SensorKind};
use crate::pins;

use qmp6988::Qmp6988;
use sgp30::Sgp30;
use sht3x::Sht3x;

/// Owns the shared bus and every fitted sensor driver.
pub struct SensorHub<I, D> {
    i2c: I,
    delay: D,
    sht: Sht3x,
    qmp: Option<Qmp6988>,
    sgp: Option<Sgp30>,
}

impl<I: I2c, D: DelayNs> SensorHub<I, D> {
    /// Probe and initialise the sensors named in `fitted`.
    ///
    /// Order is barometer, thermo-hygrometer, gas sensor.  A sensor that
    /// is expected but does not answer is a boot failure.
    pub fn bring_up(mut i2c: I, mut delay: D, fitted: Capabilities) -> Result<Self, InitError> {
        let qmp = if fitted.pressure {
            let mut qmp = Qmp6988::new(pins::QMP6988_ADDR);
            qmp.init(&mut i2c, &mut delay)
                .map_err(|_| InitError::SensorNotFound(SensorKind::Pressure))?;
            info!("QMP6988 ready");
            Some(qmp)
        } else {
            None
        };

        let sht = Sht3x::new(pins::SHT3X_ADDR);
        sht.probe(&mut i2c)
            .map_err(|_| InitError::SensorNotFound(SensorKind::TemperatureHumidity))?;
        info!("SHT3X ready");

        let sgp = if fitted.gas {
            let sgp = Sgp30::new(pins::SGP30_ADDR);
            let serial = sgp
                .serial(&mut i2c, &mut delay)
                .map_err(|_| InitError::SensorNotFound(SensorKind::Gas))?;
            info!("Found SGP30 serial #{:012X}", serial);
            sgp.soft_reset(&mut i2c, &mut delay)
                .and_then(|()| sgp.iaq_init(&mut i2c, &mut delay))
                .map_err(|_| InitError::SensorNotFound(SensorKind::Gas))?;
            Some(sgp)
        } else {
            None
        };

        Ok(Self {
            i2c,
            delay,
            sht,
            qmp,
            sgp,
        })
    }

    /// Give back the bus and delay provider.
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }
}

impl<I: I2c, D: DelayNs> SensorPort for SensorHub<I, D> {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            pressure: self.qmp.is_some(),
            gas: self.sgp.is_some(),
        }
    }

    fn read_temperature_humidity(&mut self) -> Result<(f32, f32), SensorError> {
        let r = self.sht.measure(&mut self.i2c, &mut self.delay)?;
        Ok((r.temperature, r.humidity))
    }

    fn read_pressure(&mut self) -> Result<f32, SensorError> {
        let qmp = self
            .qmp
            .as_ref()
            .ok_or(SensorError::NotPresent(SensorKind::Pressure))?;
        Ok(qmp.measure(&mut self.i2c)?.pressure_pa / 100.0)
    }

    fn read_co2(&mut self) -> Result<u16, SensorError> {
        let sgp = self.sgp.as_ref().ok_or(SensorError::NotPresent(SensorKind::Gas))?;
        Ok(sgp.measure_iaq(&mut self.i2c, &mut self.delay)?.eco2)
    }

    fn set_humidity_compensation(&mut self, absolute_humidity_mg_m3: u32) -> Result<(), SensorError> {
        let sgp = self.sgp.as_ref().ok_or(SensorError::NotPresent(SensorKind::Gas))?;
        sgp.set_absolute_humidity(&mut self.i2c, &mut self.delay, absolute_humidity_mg_m3)
    }

    fn set_co2_baseline(&mut self, eco2: u16, tvoc: u16) -> Result<(), SensorError> {
        let sgp = self.sgp.as_ref().ok_or(SensorError::NotPresent(SensorKind::Gas))?;
        sgp.set_iaq_baseline(&mut self.i2c, &mut self.delay, eco2, tvoc)
    }
}
