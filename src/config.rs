//! System configuration parameters
//!
//! Timing and bring-up parameters for the ComfortMeter.  The comfort bands
//! and servo calibration are fixed constants in [`crate::comfort`], not
//! configuration.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How the main loop decides when to run the sensing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingMode {
    /// Run once per hardware timer period (canonical).
    Scheduled,
    /// No hardware timer; run once at the start of every speech rotation
    /// (bench / demo use).
    Continuous,
}

/// What to do when a sensor read fails after boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadFailurePolicy {
    /// Report and halt until reset.
    Halt,
    /// Log, skip the rest of this cycle and retry next period.
    SkipCycle,
}

/// SGP30 IAQ baseline restored at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Co2Baseline {
    pub eco2: u16,
    pub tvoc: u16,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Period of the sensing cycle timer (microseconds)
    pub cycle_period_us: u64,
    /// How long each speech message stays on screen (milliseconds)
    pub message_dwell_ms: u32,
    /// Sleep between main loop passes (milliseconds)
    pub loop_idle_ms: u32,
    /// Scheduled or continuous pipeline execution
    pub mode: OperatingMode,

    // --- Failure handling ---
    /// Behaviour on a pressure or gas read failure
    pub read_failure_policy: ReadFailurePolicy,

    // --- Servo ---
    /// Angle commanded at boot (degrees, 180 = lowest arm position)
    pub servo_initial_angle: i32,
    /// Time allowed for the servo to reach its boot position (milliseconds)
    pub servo_settle_ms: u32,

    // --- Gas sensor ---
    /// Baseline written after IAQ init; `None` lets the SGP30 self-calibrate
    pub co2_baseline: Option<Co2Baseline>,
    /// SGP30 warm-up after IAQ init (seconds)
    pub gas_warmup_secs: u16,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            cycle_period_us: 30_000_000, // ~30 s
            message_dwell_ms: 3_000,
            loop_idle_ms: 50,
            mode: OperatingMode::Scheduled,

            // Failure handling
            read_failure_policy: ReadFailurePolicy::Halt,

            // Servo
            servo_initial_angle: 180,
            servo_settle_ms: 2_000,

            // Gas sensor
            co2_baseline: Some(Co2Baseline {
                eco2: 37_335,
                tvoc: 40_910,
            }),
            gas_warmup_secs: 15,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<(), Error> {
        if self.cycle_period_us == 0 {
            return Err(Error::Config("cycle_period_us must be non-zero"));
        }
        if self.message_dwell_ms == 0 {
            return Err(Error::Config("message_dwell_ms must be non-zero"));
        }
        if !(0..=180).contains(&self.servo_initial_angle) {
            return Err(Error::Config("servo_initial_angle must be within 0..=180"));
        }
        if u64::from(self.loop_idle_ms) * 1000 >= self.cycle_period_us {
            return Err(Error::Config("loop_idle_ms must be shorter than the cycle period"));
        }
        Ok(())
    }
}
