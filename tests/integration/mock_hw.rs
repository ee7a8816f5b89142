//! Mock hardware adapter for integration tests.
//!
//! Serves scripted sensor readings and records every actuator call so
//! tests can assert on the full command history without touching real
//! I2C/PWM registers.

use std::collections::VecDeque;

use comfortmeter::app::events::AppEvent;
use comfortmeter::app::ports::{AvatarPort, Capabilities, EventSink, InputPort, SensorPort, ServoPort};
use comfortmeter::comfort::{Expression, Palette};
use comfortmeter::error::{SensorError, SensorKind};

// ── Actuator / sensor call record ─────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    ReadPressure,
    ReadTemperatureHumidity,
    ReadCo2,
    SetHumidityCompensation(u32),
    SetCo2Baseline { eco2: u16, tvoc: u16 },
    SetAngle(i32),
    SetExpression(Expression),
    SetPalette(Palette),
    SetSpeechText(String),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub capabilities: Capabilities,
    pub calls: Vec<HwCall>,
    /// Next T/RH results; when empty, `default_th` is served.
    pub th: VecDeque<Result<(f32, f32), SensorError>>,
    pub default_th: (f32, f32),
    pub pressure: Result<f32, SensorError>,
    pub co2: Result<u16, SensorError>,
    pub refresh_requests: VecDeque<bool>,
    /// Timestamp handed to every input poll.
    pub input_polled_at: Vec<u64>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            calls: Vec::new(),
            th: VecDeque::new(),
            default_th: (25.5, 60.2),
            pressure: Ok(1013.2),
            co2: Ok(412),
            refresh_requests: VecDeque::new(),
            input_polled_at: Vec::new(),
        }
    }

    pub fn count(&self, pred: impl Fn(&HwCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn cycles_run(&self) -> usize {
        self.count(|c| matches!(c, HwCall::ReadTemperatureHumidity))
    }

    pub fn last_angle(&self) -> Option<i32> {
        self.calls.iter().rev().find_map(|c| match c {
            HwCall::SetAngle(a) => Some(*a),
            _ => None,
        })
    }

    pub fn last_expression(&self) -> Option<Expression> {
        self.calls.iter().rev().find_map(|c| match c {
            HwCall::SetExpression(e) => Some(*e),
            _ => None,
        })
    }

    pub fn last_palette(&self) -> Option<Palette> {
        self.calls.iter().rev().find_map(|c| match c {
            HwCall::SetPalette(p) => Some(*p),
            _ => None,
        })
    }

    pub fn speech(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::SetSpeechText(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl SensorPort for MockHardware {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn read_temperature_humidity(&mut self) -> Result<(f32, f32), SensorError> {
        self.calls.push(HwCall::ReadTemperatureHumidity);
        self.th.pop_front().unwrap_or(Ok(self.default_th))
    }

    fn read_pressure(&mut self) -> Result<f32, SensorError> {
        self.calls.push(HwCall::ReadPressure);
        self.pressure
    }

    fn read_co2(&mut self) -> Result<u16, SensorError> {
        self.calls.push(HwCall::ReadCo2);
        self.co2
    }

    fn set_humidity_compensation(&mut self, absolute_humidity_mg_m3: u32) -> Result<(), SensorError> {
        self.calls.push(HwCall::SetHumidityCompensation(absolute_humidity_mg_m3));
        if absolute_humidity_mg_m3 > 256_000 {
            return Err(SensorError::InvalidArgument(SensorKind::Gas));
        }
        Ok(())
    }

    fn set_co2_baseline(&mut self, eco2: u16, tvoc: u16) -> Result<(), SensorError> {
        self.calls.push(HwCall::SetCo2Baseline { eco2, tvoc });
        Ok(())
    }
}

impl ServoPort for MockHardware {
    fn set_angle(&mut self, degrees: i32) {
        self.calls.push(HwCall::SetAngle(degrees));
    }
}

impl AvatarPort for MockHardware {
    fn set_expression(&mut self, expression: Expression) {
        self.calls.push(HwCall::SetExpression(expression));
    }

    fn set_palette(&mut self, palette: Palette) {
        self.calls.push(HwCall::SetPalette(palette));
    }

    fn set_speech_text(&mut self, text: &str) {
        self.calls.push(HwCall::SetSpeechText(text.to_owned()));
    }
}

impl InputPort for MockHardware {
    fn poll_refresh_request(&mut self, now_ms: u64) -> bool {
        self.input_polled_at.push(now_ms);
        self.refresh_requests.pop_front().unwrap_or(false)
    }
}

// ── Event sink ────────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
