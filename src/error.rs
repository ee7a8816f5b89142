//! Unified error types for the ComfortMeter firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! main loop's halt-or-continue decision uniform.  All variants are `Copy`
//! so they pass through the orchestrator and event sink without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor read failed mid-operation.
    Sensor(SensorError),
    /// A required peripheral could not be brought up at boot.
    Init(InitError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Which physical sensor an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    /// SHT3x temperature / humidity.
    TemperatureHumidity,
    /// QMP6988 barometer.
    Pressure,
    /// SGP30 gas (eCO2 / TVOC).
    Gas,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemperatureHumidity => write!(f, "SHT3X"),
            Self::Pressure => write!(f, "QMP6988"),
            Self::Gas => write!(f, "SGP30"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The I2C transaction was NACKed or the bus reported an error.
    Bus(SensorKind),
    /// Received data failed its CRC check.
    Crc(SensorKind),
    /// The device answered but with an unexpected identity.
    WrongChipId(SensorKind),
    /// A measurement could not be completed.
    MeasurementFailed(SensorKind),
    /// An argument was outside what the device accepts.
    InvalidArgument(SensorKind),
    /// The capability is not fitted on this unit.
    NotPresent(SensorKind),
}

impl SensorError {
    /// The sensor this error came from.
    pub fn kind(&self) -> SensorKind {
        match *self {
            Self::Bus(k)
            | Self::Crc(k)
            | Self::WrongChipId(k)
            | Self::MeasurementFailed(k)
            | Self::InvalidArgument(k)
            | Self::NotPresent(k) => k,
        }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(k) => write!(f, "{k} I2C transfer failed"),
            Self::Crc(k) => write!(f, "{k} CRC mismatch"),
            Self::WrongChipId(k) => write!(f, "{k} wrong chip id"),
            Self::MeasurementFailed(k) => write!(f, "{k} measurement failed"),
            Self::InvalidArgument(k) => write!(f, "{k} argument out of range"),
            Self::NotPresent(k) => write!(f, "{k} not fitted"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Init errors
// ---------------------------------------------------------------------------

/// Boot-time failures.  Every one of these is fatal: the binary reports it
/// and halts until a physical reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// A required sensor did not answer during probing.
    SensorNotFound(SensorKind),
    /// The button GPIO could not be configured.
    GpioConfigFailed(i32),
    /// The LEDC timer or channel for the servo could not be configured.
    LedcInitFailed(i32),
    /// The periodic cycle timer could not be created or started.
    TimerStartFailed(i32),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorNotFound(k) => write!(f, "Couldn't find {k} :("),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={rc})"),
            Self::LedcInitFailed(rc) => write!(f, "LEDC config failed (rc={rc})"),
            Self::TimerStartFailed(rc) => write!(f, "cycle timer start failed (rc={rc})"),
        }
    }
}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
