//! QMP6988 barometric pressure sensor (I2C, address 0x70).
//!
//! The part reports 24-bit raw pressure and temperature which are
//! compensated in fixed point using 25 bytes of factory OTP coefficients.
//! The sensor runs in normal (free-running) mode, so a read is just a
//! burst of the six data registers.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::error::{SensorError, SensorKind};

const KIND: SensorKind = SensorKind::Pressure;

const REG_CHIP_ID: u8 = 0xD1;
const REG_RESET: u8 = 0xE0;
const REG_IIR_FILTER: u8 = 0xF1;
const REG_CTRL_MEAS: u8 = 0xF4;
const REG_PRESS_MSB: u8 = 0xF7;
const REG_COE_START: u8 = 0xA0;

const CHIP_ID: u8 = 0x5C;
const RESET_CMD: u8 = 0xE6;
const COE_LEN: usize = 25;

/// Temperature oversampling x1, pressure oversampling x8, normal mode.
const CTRL_MEAS_NORMAL: u8 = (0b001 << 5) | (0b100 << 2) | 0b11;
/// IIR filter coefficient 4.
const IIR_FILTER_4: u8 = 0x02;

/// Offset applied to both 24-bit raw values.
const RAW_SUBTRACTOR: i32 = 8_388_608;

/// Sign-extend a 20-bit value.
const fn sign_extend_20(v: u32) -> i32 {
    ((v << 12) as i32) >> 12
}

fn be_i16(hi: u8, lo: u8) -> i16 {
    i16::from_be_bytes([hi, lo])
}

/// Raw OTP coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OtpCoefficients {
    pub a0: i32,
    pub b00: i32,
    pub a1: i16,
    pub a2: i16,
    pub bt1: i16,
    pub bt2: i16,
    pub bp1: i16,
    pub b11: i16,
    pub bp2: i16,
    pub b12: i16,
    pub b21: i16,
    pub bp3: i16,
}

impl OtpCoefficients {
    /// Unpack the OTP block read from 0xA0.
    pub fn parse(d: &[u8; COE_LEN]) -> Self {
        let b00 = (u32::from(d[0]) << 12) | (u32::from(d[1]) << 4) | (u32::from(d[24] & 0xF0) >> 4);
        let a0 = (u32::from(d[18]) << 12) | (u32::from(d[19]) << 4) | u32::from(d[24] & 0x0F);
        Self {
            a0: sign_extend_20(a0),
            b00: sign_extend_20(b00),
            bt1: be_i16(d[2], d[3]),
            bt2: be_i16(d[4], d[5]),
            bp1: be_i16(d[6], d[7]),
            b11: be_i16(d[8], d[9]),
            bp2: be_i16(d[10], d[11]),
            b12: be_i16(d[12], d[13]),
            b21: be_i16(d[14], d[15]),
            bp3: be_i16(d[16], d[17]),
            a1: be_i16(d[20], d[21]),
            a2: be_i16(d[22], d[23]),
        }
    }
}

/// Coefficients scaled into the fixed-point formats the compensation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    a0: i64,
    b00: i64,
    a1: i64,
    a2: i64,
    bt1: i64,
    bt2: i64,
    bp1: i64,
    b11: i64,
    bp2: i64,
    b12: i64,
    b21: i64,
    bp3: i64,
}

impl From<OtpCoefficients> for Calibration {
    fn from(c: OtpCoefficients) -> Self {
        Self {
            a0: i64::from(c.a0),
            b00: i64::from(c.b00),
            a1: 3608 * i64::from(c.a1) - 1_731_677_965,
            a2: 16889 * i64::from(c.a2) - 87_619_360,
            bt1: 2982 * i64::from(c.bt1) + 107_370_906,
            bt2: 329_854 * i64::from(c.bt2) + 108_083_093,
            bp1: 19923 * i64::from(c.bp1) + 1_133_836_764,
            b11: 2406 * i64::from(c.b11) + 118_215_883,
            bp2: 3079 * i64::from(c.bp2) - 181_579_595,
            b12: 6846 * i64::from(c.b12) + 85_590_281,
            b21: 13836 * i64::from(c.b21) + 79_333_336,
            bp3: 2915 * i64::from(c.bp3) + 157_155_561,
        }
    }
}

impl Calibration {
    const ZERO: Self = Self {
        a0: 0,
        b00: 0,
        a1: 0,
        a2: 0,
        bt1: 0,
        bt2: 0,
        bp1: 0,
        b11: 0,
        bp2: 0,
        b12: 0,
        b21: 0,
        bp3: 0,
    };

    /// Compensated temperature in 1/256 °C.
    pub fn temperature(&self, dt: i32) -> i16 {
        let dt = i64::from(dt);
        let wk1 = self.a1 * dt;
        let mut wk2 = (self.a2 * dt) >> 14;
        wk2 = (wk2 * dt) >> 10;
        wk2 = ((wk1 + wk2) / 32767) >> 19;
        ((self.a0 + wk2) >> 4) as i16
    }

    /// Compensated pressure in 1/16 Pa.
    pub fn pressure(&self, dp: i32, tx: i16) -> i32 {
        let dp = i64::from(dp);
        let tx = i64::from(tx);

        let mut wk1 = self.bt1 * tx;
        let mut wk2 = (self.bp1 * dp) >> 5;
        wk1 += wk2;
        wk2 = (self.bt2 * tx) >> 1;
        wk2 = (wk2 * tx) >> 8;
        let mut wk3 = wk2;
        wk2 = (self.b11 * tx) >> 4;
        wk2 = (wk2 * dp) >> 1;
        wk3 += wk2;
        wk2 = (self.bp2 * dp) >> 13;
        wk2 = (wk2 * dp) >> 1;
        wk3 += wk2;
        wk1 += wk3 >> 14;

        wk2 = self.b12 * tx;
        wk2 = (wk2 * tx) >> 22;
        wk2 = (wk2 * dp) >> 1;
        wk3 = wk2;
        wk2 = (self.b21 * tx) >> 6;
        wk2 = (wk2 * dp) >> 23;
        wk2 = (wk2 * dp) >> 1;
        wk3 += wk2;
        wk2 = (self.bp3 * dp) >> 12;
        wk2 = (wk2 * dp) >> 23;
        wk2 *= dp;
        wk3 += wk2;
        wk1 += wk3 >> 15;

        wk1 /= 32767;
        wk1 >>= 11;
        wk1 += self.b00;
        wk1 as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Qmp6988Reading {
    /// °C
    pub temperature: f32,
    /// Pa
    pub pressure_pa: f32,
}

pub struct Qmp6988 {
    address: u8,
    calibration: Calibration,
}

impl Qmp6988 {
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            calibration: Calibration::ZERO,
        }
    }

    fn write_reg<I: I2c>(&self, i2c: &mut I, reg: u8, value: u8) -> Result<(), SensorError> {
        i2c.write(self.address, &[reg, value])
            .map_err(|_| SensorError::Bus(KIND))
    }

    fn read_regs<I: I2c>(&self, i2c: &mut I, reg: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        i2c.write_read(self.address, &[reg], buf)
            .map_err(|_| SensorError::Bus(KIND))
    }

    /// Check the chip id, soft-reset, load the OTP coefficients and start
    /// free-running measurements.
    pub fn init<I: I2c, D: DelayNs>(&mut self, i2c: &mut I, delay: &mut D) -> Result<(), SensorError> {
        let mut id = [0u8; 1];
        i2c.write_read(self.address, &[REG_CHIP_ID], &mut id)
            .map_err(|_| SensorError::NotPresent(KIND))?;
        if id[0] != CHIP_ID {
            return Err(SensorError::WrongChipId(KIND));
        }

        self.write_reg(i2c, REG_RESET, RESET_CMD)?;
        delay.delay_ms(20);
        self.write_reg(i2c, REG_RESET, 0x00)?;

        let mut otp = [0u8; COE_LEN];
        self.read_regs(i2c, REG_COE_START, &mut otp)?;
        self.calibration = OtpCoefficients::parse(&otp).into();

        self.write_reg(i2c, REG_CTRL_MEAS, CTRL_MEAS_NORMAL)?;
        self.write_reg(i2c, REG_IIR_FILTER, IIR_FILTER_4)?;
        delay.delay_ms(20);
        Ok(())
    }

    /// Read and compensate the latest conversion.
    pub fn measure<I: I2c>(&self, i2c: &mut I) -> Result<Qmp6988Reading, SensorError> {
        let mut d = [0u8; 6];
        self.read_regs(i2c, REG_PRESS_MSB, &mut d)?;

        let raw = |hi: u8, mid: u8, lo: u8| {
            ((i32::from(hi) << 16) | (i32::from(mid) << 8) | i32::from(lo)) - RAW_SUBTRACTOR
        };
        let dp = raw(d[0], d[1], d[2]);
        let dt = raw(d[3], d[4], d[5]);

        let t_int = self.calibration.temperature(dt);
        let p_int = self.calibration.pressure(dp, t_int);
        let pressure_pa = p_int as f32 / 16.0;
        if !pressure_pa.is_finite() || pressure_pa <= 0.0 {
            return Err(SensorError::MeasurementFailed(KIND));
        }

        Ok(Qmp6988Reading {
            temperature: f32::from(t_int) / 256.0,
            pressure_pa,
        })
    }
}
