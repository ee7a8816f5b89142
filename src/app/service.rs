//! Comfort service — the hexagonal core.
//!
//! [`ComfortService`] owns the current sample, index and speech rotation.
//! All I/O flows through port traits injected at call sites, making the
//! whole pipeline testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │        ComfortService         │
//!   ServoPort ◀── │ compensate · index · actuate  │
//!  AvatarPort ◀── │ speech rotation               │
//!                 └──────────────────────────────┘
//! ```

use log::{error, info, warn};

use crate::comfort::{ActuationState, DiscomfortIndex, Palette, absolute_humidity_mg_per_m3};
use crate::comfort::index::raw_discomfort_index;
use crate::config::{OperatingMode, ReadFailurePolicy, SystemConfig};
use crate::cycle::CycleFlag;
use crate::error::{Error, Result, SensorError};

use super::events::{AppEvent, CycleReport, SensorSample};
use super::ports::{AvatarPort, Capabilities, EventSink, InputPort, SensorPort, ServoPort};
use super::speech::{SpeechRotator, format_message};

// ───────────────────────────────────────────────────────────────
// ComfortService
// ───────────────────────────────────────────────────────────────

/// The pipeline orchestrator.
pub struct ComfortService {
    config: SystemConfig,
    capabilities: Capabilities,
    sample: SensorSample,
    index: DiscomfortIndex,
    last_report: Option<CycleReport>,
    speech: SpeechRotator,
    cycles: u32,
}

impl ComfortService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let capabilities = Capabilities::default();
        let speech = SpeechRotator::new(capabilities, config.message_dwell_ms);
        Self {
            config,
            capabilities,
            sample: SensorSample::default(),
            index: DiscomfortIndex::default(),
            last_report: None,
            speech,
            cycles: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Query capabilities and put the actuators in their boot position.
    ///
    /// Boot palette is white on gold; the servo goes to
    /// `servo_initial_angle` (the lowest arm position by default).
    pub fn start(
        &mut self,
        hw: &mut (impl SensorPort + ServoPort + AvatarPort),
        sink: &mut impl EventSink,
    ) {
        self.capabilities = hw.capabilities();
        self.speech = SpeechRotator::new(self.capabilities, self.config.message_dwell_ms);

        if self.capabilities.gas {
            if let Some(baseline) = self.config.co2_baseline {
                if let Err(e) = hw.set_co2_baseline(baseline.eco2, baseline.tvoc) {
                    warn!("CO2 baseline not applied: {}", e);
                }
            }
        }

        hw.set_palette(Palette::BOOT);
        hw.set_angle(self.config.servo_initial_angle);

        sink.emit(&AppEvent::Started(self.capabilities));
        info!(
            "ComfortService started (pressure={}, gas={}, mode={:?})",
            self.capabilities.pressure, self.capabilities.gas, self.config.mode
        );
    }

    // ── Per-pass orchestration ────────────────────────────────

    /// One main-loop pass: inputs, the pipeline if a cycle is due, then the
    /// speech rotation.
    ///
    /// Returns `Err` only for failures that must halt the device.
    pub fn poll(
        &mut self,
        flag: &CycleFlag,
        now_ms: u64,
        hw: &mut (impl SensorPort + ServoPort + AvatarPort + InputPort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        if hw.poll_refresh_request(now_ms) {
            info!("Refresh requested from input");
            flag.mark_due();
        }

        let due = flag.is_due()
            || (self.config.mode == OperatingMode::Continuous && self.speech.rotation_due(now_ms));
        if due {
            self.run_cycle(hw, sink)?;
            flag.complete();
        }

        if let Some(message) = self.speech.poll(now_ms) {
            let text = format_message(message, &self.sample, self.index);
            hw.set_speech_text(&text);
        }
        Ok(())
    }

    /// Run the read → compensate → index → actuate pipeline once.
    ///
    /// Returns `Ok(None)` when the cycle was skipped under
    /// [`ReadFailurePolicy::SkipCycle`].
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ServoPort + AvatarPort),
        sink: &mut impl EventSink,
    ) -> Result<Option<CycleReport>> {
        let mut next = self.sample;

        // 1. Pressure
        if self.capabilities.pressure {
            match hw.read_pressure() {
                Ok(hpa) => next.pressure = hpa,
                Err(e) => return self.read_failed(e, sink),
            }
        }

        // 2. Temperature / humidity.  A failed update keeps the last values.
        match hw.read_temperature_humidity() {
            Ok((t, rh)) => {
                next.temperature = t;
                next.humidity = rh;
            }
            Err(e) => {
                warn!("Temperature/humidity read failed ({}), keeping last values", e);
                sink.emit(&AppEvent::ReadingRetained(e));
            }
        }

        // 3. Gas
        if self.capabilities.gas {
            match hw.read_co2() {
                Ok(ppm) => next.co2 = ppm,
                Err(e) => return self.read_failed(e, sink),
            }
        }

        // 4. Humidity compensation for the next gas reading
        let absolute_humidity = absolute_humidity_mg_per_m3(next.temperature, next.humidity);
        if self.capabilities.gas {
            if let Err(e) = hw.set_humidity_compensation(absolute_humidity) {
                warn!("Humidity compensation not applied: {}", e);
            }
        }

        // 5. Index
        let raw_index = raw_discomfort_index(next.temperature, next.humidity);
        let index = DiscomfortIndex::clamped(raw_index);

        // 6. Actuators
        let actuation = ActuationState::from_index(index);
        hw.set_angle(actuation.servo_angle);
        if let Some(expression) = actuation.expression {
            hw.set_expression(expression);
        }
        hw.set_palette(actuation.palette);

        self.sample = next;
        self.index = index;
        self.cycles = self.cycles.wrapping_add(1);

        let report = CycleReport {
            cycle: self.cycles,
            sample: next,
            raw_index,
            index,
            absolute_humidity_mg_m3: absolute_humidity,
            actuation,
        };
        self.last_report = Some(report);
        sink.emit(&AppEvent::CycleCompleted(report));
        Ok(Some(report))
    }

    fn read_failed(
        &self,
        e: SensorError,
        sink: &mut impl EventSink,
    ) -> Result<Option<CycleReport>> {
        match self.config.read_failure_policy {
            ReadFailurePolicy::Halt => {
                error!("Measurement failed: {}", e);
                sink.emit(&AppEvent::FatalSensorFault(e));
                Err(Error::Sensor(e))
            }
            ReadFailurePolicy::SkipCycle => {
                warn!("Measurement failed: {}, skipping cycle", e);
                sink.emit(&AppEvent::CycleSkipped(e));
                Ok(None)
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Latest committed sample.
    pub fn sample(&self) -> SensorSample {
        self.sample
    }

    /// Latest clamped index.
    pub fn index(&self) -> DiscomfortIndex {
        self.index
    }

    pub fn last_report(&self) -> Option<&CycleReport> {
        self.last_report.as_ref()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Completed pipeline runs since startup.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }
}
