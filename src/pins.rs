//! GPIO / peripheral assignments for the M5StickC Plus + ENV III + SGP30 +
//! servo hat build.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers or bus addresses.

// ---------------------------------------------------------------------------
// I2C (Grove port)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 32;
pub const I2C_SCL_GPIO: i32 = 33;
pub const I2C_FREQ_HZ: u32 = 400_000;

/// SHT30 inside the ENV III unit.
pub const SHT3X_ADDR: u8 = 0x44;
/// QMP6988 inside the ENV III unit (SDO low).
pub const QMP6988_ADDR: u8 = 0x70;
/// SGP30 gas unit.
pub const SGP30_ADDR: u8 = 0x58;

// ---------------------------------------------------------------------------
// Servo hat
// ---------------------------------------------------------------------------

/// PWM output to the servo signal line.
pub const SERVO_GPIO: i32 = 26;
/// Standard hobby-servo frame rate.
pub const SERVO_PWM_HZ: u32 = 50;
/// LEDC timer resolution.  Duty values are in 0..65535.
pub const SERVO_TIMER_BITS: u32 = 16;

// ---------------------------------------------------------------------------
// User input
// ---------------------------------------------------------------------------

/// Front "M5" button (button A), active low.
pub const BUTTON_A_GPIO: i32 = 37;
