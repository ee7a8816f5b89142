//! SGP30 gas sensor (I2C, address 0x58): equivalent CO2 and TVOC.
//!
//! Commands are 16-bit words; replies and arguments are Sensirion words
//! with a CRC byte each.  The on-chip IAQ algorithm expects one
//! `measure_iaq` per second once started, and benefits from an absolute
//! humidity hint and a restored baseline.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::error::{SensorError, SensorKind};

use super::crc::{checked_word, word_with_crc};

const KIND: SensorKind = SensorKind::Gas;

const CMD_IAQ_INIT: [u8; 2] = [0x20, 0x03];
const CMD_MEASURE_IAQ: [u8; 2] = [0x20, 0x08];
const CMD_SET_IAQ_BASELINE: [u8; 2] = [0x20, 0x1E];
const CMD_SET_ABSOLUTE_HUMIDITY: [u8; 2] = [0x20, 0x61];
const CMD_GET_SERIAL_ID: [u8; 2] = [0x36, 0x82];

/// I2C general-call address and its soft-reset byte.
const GENERAL_CALL_ADDR: u8 = 0x00;
const GENERAL_CALL_RESET: u8 = 0x06;

/// Largest absolute humidity the sensor accepts (mg/m³).
pub const MAX_ABSOLUTE_HUMIDITY_MG_M3: u32 = 256_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IaqReading {
    /// ppm
    pub eco2: u16,
    /// ppb
    pub tvoc: u16,
}

/// Absolute humidity (mg/m³) to the sensor's 8.8 fixed-point g/m³ word.
///
/// Returns `None` above [`MAX_ABSOLUTE_HUMIDITY_MG_M3`].
pub fn humidity_word(absolute_humidity_mg_m3: u32) -> Option<u16> {
    if absolute_humidity_mg_m3 > MAX_ABSOLUTE_HUMIDITY_MG_M3 {
        return None;
    }
    let scaled = (u64::from(absolute_humidity_mg_m3) * 256 * 16777) >> 24;
    u16::try_from(scaled).ok()
}

pub struct Sgp30 {
    address: u8,
}

impl Sgp30 {
    pub const fn new(address: u8) -> Self {
        Self { address }
    }

    fn command<I: I2c>(&self, i2c: &mut I, cmd: [u8; 2]) -> Result<(), SensorError> {
        i2c.write(self.address, &cmd)
            .map_err(|_| SensorError::Bus(KIND))
    }

    fn command_with_words<I: I2c>(&self, i2c: &mut I, cmd: [u8; 2], words: &[u16]) -> Result<(), SensorError> {
        let mut buf = [0u8; 8];
        buf[..2].copy_from_slice(&cmd);
        let mut len = 2;
        for &w in words.iter().take(2) {
            buf[len..len + 3].copy_from_slice(&word_with_crc(w));
            len += 3;
        }
        i2c.write(self.address, &buf[..len])
            .map_err(|_| SensorError::Bus(KIND))
    }

    fn read_words<I: I2c, D: DelayNs, const N: usize>(
        &self,
        i2c: &mut I,
        delay: &mut D,
        cmd: [u8; 2],
        delay_ms: u32,
    ) -> Result<[u16; N], SensorError> {
        self.command(i2c, cmd)?;
        delay.delay_ms(delay_ms);

        let mut buf = [0u8; 9];
        let raw = buf.get_mut(..N * 3).ok_or(SensorError::InvalidArgument(KIND))?;
        i2c.read(self.address, raw)
            .map_err(|_| SensorError::Bus(KIND))?;

        let mut out = [0u16; N];
        for (slot, chunk) in out.iter_mut().zip(raw.chunks(3)) {
            *slot = checked_word(chunk).ok_or(SensorError::Crc(KIND))?;
        }
        Ok(out)
    }

    /// 48-bit serial number; used to detect the part at boot.
    pub fn serial<I: I2c, D: DelayNs>(&self, i2c: &mut I, delay: &mut D) -> Result<u64, SensorError> {
        let words: [u16; 3] = self
            .read_words(i2c, delay, CMD_GET_SERIAL_ID, 10)
            .map_err(|e| match e {
                SensorError::Bus(k) => SensorError::NotPresent(k),
                other => other,
            })?;
        Ok(words.iter().fold(0u64, |acc, &w| (acc << 16) | u64::from(w)))
    }

    /// General-call soft reset.  Every device on the bus that honours the
    /// general call resets too.
    pub fn soft_reset<I: I2c, D: DelayNs>(&self, i2c: &mut I, delay: &mut D) -> Result<(), SensorError> {
        i2c.write(GENERAL_CALL_ADDR, &[GENERAL_CALL_RESET])
            .map_err(|_| SensorError::Bus(KIND))?;
        delay.delay_ms(10);
        Ok(())
    }

    /// Start the IAQ algorithm.  Readings are fixed at 400 ppm / 0 ppb for
    /// the first ~15 s afterwards.
    pub fn iaq_init<I: I2c, D: DelayNs>(&self, i2c: &mut I, delay: &mut D) -> Result<(), SensorError> {
        self.command(i2c, CMD_IAQ_INIT)?;
        delay.delay_ms(10);
        Ok(())
    }

    pub fn measure_iaq<I: I2c, D: DelayNs>(&self, i2c: &mut I, delay: &mut D) -> Result<IaqReading, SensorError> {
        let words: [u16; 2] = self.read_words(i2c, delay, CMD_MEASURE_IAQ, 12)?;
        Ok(IaqReading {
            eco2: words[0],
            tvoc: words[1],
        })
    }

    /// Restore a previously saved baseline.  The wire order is TVOC first.
    pub fn set_iaq_baseline<I: I2c, D: DelayNs>(
        &self,
        i2c: &mut I,
        delay: &mut D,
        eco2: u16,
        tvoc: u16,
    ) -> Result<(), SensorError> {
        self.command_with_words(i2c, CMD_SET_IAQ_BASELINE, &[tvoc, eco2])?;
        delay.delay_ms(10);
        Ok(())
    }

    /// Absolute humidity hint for the next measurements.  Zero disables
    /// compensation.
    pub fn set_absolute_humidity<I: I2c, D: DelayNs>(
        &self,
        i2c: &mut I,
        delay: &mut D,
        absolute_humidity_mg_m3: u32,
    ) -> Result<(), SensorError> {
        let word = humidity_word(absolute_humidity_mg_m3).ok_or(SensorError::InvalidArgument(KIND))?;
        self.command_with_words(i2c, CMD_SET_ABSOLUTE_HUMIDITY, &[word])?;
        delay.delay_ms(10);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::fake::{FakeBus, NoDelay};

    const ADDR: u8 = 0x58;

    fn words(ws: &[u16]) -> Vec<u8> {
        ws.iter().flat_map(|&w| word_with_crc(w)).collect()
    }

    #[test]
    fn humidity_word_scaling() {
        assert_eq!(humidity_word(0), Some(0));
        // 11.5 g/m³ -> 0x0B80 (8.8 fixed point), within rounding
        let w = humidity_word(11_500).unwrap();
        assert!((0x0B7F..=0x0B80).contains(&w), "got {w:#06x}");
        assert!(humidity_word(MAX_ABSOLUTE_HUMIDITY_MG_M3).is_some());
        assert_eq!(humidity_word(MAX_ABSOLUTE_HUMIDITY_MG_M3 + 1), None);
    }

    #[test]
    fn measure_reads_eco2_then_tvoc() {
        let mut bus = FakeBus::default();
        bus.reads.push_back(words(&[412, 7]));
        let r = Sgp30::new(ADDR).measure_iaq(&mut bus, &mut NoDelay).unwrap();
        assert_eq!(r, IaqReading { eco2: 412, tvoc: 7 });
        assert_eq!(bus.writes, vec![(ADDR, vec![0x20, 0x08])]);
    }

    #[test]
    fn baseline_is_sent_tvoc_first() {
        let mut bus = FakeBus::default();
        Sgp30::new(ADDR)
            .set_iaq_baseline(&mut bus, &mut NoDelay, 37_335, 40_910)
            .unwrap();
        let mut expected = vec![0x20, 0x1E];
        expected.extend(words(&[40_910, 37_335]));
        assert_eq!(bus.writes, vec![(ADDR, expected)]);
    }

    #[test]
    fn oversized_humidity_is_rejected_without_bus_traffic() {
        let mut bus = FakeBus::default();
        let err = Sgp30::new(ADDR)
            .set_absolute_humidity(&mut bus, &mut NoDelay, 300_000)
            .unwrap_err();
        assert_eq!(err, SensorError::InvalidArgument(SensorKind::Gas));
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn soft_reset_uses_general_call() {
        let mut bus = FakeBus::default();
        Sgp30::new(ADDR).soft_reset(&mut bus, &mut NoDelay).unwrap();
        assert_eq!(bus.writes, vec![(0x00, vec![0x06])]);
    }

    #[test]
    fn serial_assembles_three_words() {
        let mut bus = FakeBus::default();
        bus.reads.push_back(words(&[0x0000, 0x0123, 0x4567]));
        let s = Sgp30::new(ADDR).serial(&mut bus, &mut NoDelay).unwrap();
        assert_eq!(s, 0x0123_4567);
    }

    #[test]
    fn absent_sensor_is_not_present() {
        let mut bus = FakeBus::default();
        bus.absent.push(ADDR);
        assert_eq!(
            Sgp30::new(ADDR).serial(&mut bus, &mut NoDelay),
            Err(SensorError::NotPresent(SensorKind::Gas))
        );
    }

    #[test]
    fn bad_crc_in_reply() {
        let mut bus = FakeBus::default();
        let mut reply = words(&[412, 7]);
        reply[2] ^= 0x55;
        bus.reads.push_back(reply);
        assert_eq!(
            Sgp30::new(ADDR).measure_iaq(&mut bus, &mut NoDelay),
            Err(SensorError::Crc(SensorKind::Gas))
        );
    }
}
