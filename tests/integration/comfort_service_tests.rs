//! Integration tests for the ComfortService → ports pipeline.
//!
//! These run on the host (x86_64) and drive the service through full
//! main-loop passes against recording mocks.

use comfortmeter::app::events::AppEvent;
use comfortmeter::app::ports::Capabilities;
use comfortmeter::app::service::ComfortService;
use comfortmeter::comfort::{Color565, ComfortBand, Expression, Palette};
use comfortmeter::config::{OperatingMode, ReadFailurePolicy, SystemConfig};
use comfortmeter::cycle::{CycleFlag, CycleState};
use comfortmeter::error::{Error, SensorError, SensorKind};

use crate::mock_hw::{HwCall, LogSink, MockHardware};

fn make_service(config: SystemConfig, caps: Capabilities) -> (ComfortService, MockHardware, LogSink) {
    let mut svc = ComfortService::new(config);
    let mut hw = MockHardware::new(caps);
    let mut sink = LogSink::new();
    svc.start(&mut hw, &mut sink);
    (svc, hw, sink)
}

fn default_service() -> (ComfortService, MockHardware, LogSink) {
    make_service(SystemConfig::default(), Capabilities::ALL)
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_applies_baseline_boot_palette_and_servo_rest() {
    let (svc, hw, sink) = default_service();

    assert_eq!(
        hw.calls,
        vec![
            HwCall::SetCo2Baseline {
                eco2: 37_335,
                tvoc: 40_910
            },
            HwCall::SetPalette(Palette::BOOT),
            HwCall::SetAngle(180),
        ]
    );
    assert_eq!(svc.capabilities(), Capabilities::ALL);
    assert!(matches!(sink.events.as_slice(), [AppEvent::Started(c)] if *c == Capabilities::ALL));
}

#[test]
fn no_baseline_without_gas_sensor() {
    let (_, hw, _) = make_service(SystemConfig::default(), Capabilities::default());
    assert_eq!(hw.count(|c| matches!(c, HwCall::SetCo2Baseline { .. })), 0);
}

// ── Cycle gating ──────────────────────────────────────────────

#[test]
fn first_pass_runs_immediately_then_waits_for_timer() {
    let (mut svc, mut hw, mut sink) = default_service();
    let flag = CycleFlag::new();

    svc.poll(&flag, 0, &mut hw, &mut sink).unwrap();
    assert_eq!(hw.cycles_run(), 1);
    assert_eq!(flag.state(), CycleState::Idle);

    for now in (50..10_000).step_by(50) {
        svc.poll(&flag, now, &mut hw, &mut sink).unwrap();
    }
    assert_eq!(hw.cycles_run(), 1, "no cycle without a timer tick");

    flag.mark_due();
    svc.poll(&flag, 10_000, &mut hw, &mut sink).unwrap();
    assert_eq!(hw.cycles_run(), 2);
    assert_eq!(flag.state(), CycleState::Idle);
    assert_eq!(svc.cycles(), 2);
}

#[test]
fn inputs_are_polled_on_the_loop_clock() {
    let (mut svc, mut hw, mut sink) = default_service();
    let flag = CycleFlag::new();
    for now in [0, 50, 3_000, 3_050] {
        svc.poll(&flag, now, &mut hw, &mut sink).unwrap();
    }
    assert_eq!(hw.input_polled_at, vec![0, 50, 3_000, 3_050]);
}

#[test]
fn refresh_button_forces_a_cycle() {
    let (mut svc, mut hw, mut sink) = default_service();
    let flag = CycleFlag::new();
    svc.poll(&flag, 0, &mut hw, &mut sink).unwrap();

    hw.refresh_requests.push_back(true);
    svc.poll(&flag, 100, &mut hw, &mut sink).unwrap();
    assert_eq!(hw.cycles_run(), 2);
    assert!(!flag.is_due());
}

#[test]
fn continuous_mode_runs_once_per_rotation() {
    let config = SystemConfig {
        mode: OperatingMode::Continuous,
        message_dwell_ms: 100,
        ..SystemConfig::default()
    };
    let (mut svc, mut hw, mut sink) = make_service(config, Capabilities::ALL);
    let flag = CycleFlag::new();
    flag.complete();

    // 5 messages × 100 ms per rotation; two full rotations.
    for now in (0..1_000).step_by(10) {
        svc.poll(&flag, now, &mut hw, &mut sink).unwrap();
    }
    assert_eq!(hw.cycles_run(), 2);
}

// ── Pipeline ──────────────────────────────────────────────────

#[test]
fn pipeline_order_and_outputs() {
    let (mut svc, mut hw, mut sink) = default_service();
    hw.clear();

    let report = svc.run_cycle(&mut hw, &mut sink).unwrap().unwrap();

    // 25.5 °C / 60.2 % -> 73.54 -> 73 -> angle 62
    assert_eq!(report.raw_index, 73);
    assert_eq!(report.index.value(), 73);
    assert_eq!(report.actuation.servo_angle, 62);
    assert_eq!(report.actuation.band, ComfortBand::Warm);
    assert_eq!(report.sample.co2, 412);
    assert!((report.sample.pressure - 1013.2).abs() < 1e-3);

    let ah = report.absolute_humidity_mg_m3;
    assert!((13_500..=14_500).contains(&ah), "absolute humidity {ah}");

    assert_eq!(
        hw.calls,
        vec![
            HwCall::ReadPressure,
            HwCall::ReadTemperatureHumidity,
            HwCall::ReadCo2,
            HwCall::SetHumidityCompensation(ah),
            HwCall::SetAngle(62),
            HwCall::SetExpression(Expression::Neutral),
            HwCall::SetPalette(Palette::new(Color565::WHITE, Color565::GOLD)),
        ]
    );
    assert!(matches!(sink.events.last(), Some(AppEvent::CycleCompleted(r)) if r.cycle == 1));
    assert_eq!(svc.last_report(), Some(&report));
}

#[test]
fn absent_sensors_are_never_read() {
    let (mut svc, mut hw, mut sink) = make_service(SystemConfig::default(), Capabilities::default());
    hw.clear();
    svc.run_cycle(&mut hw, &mut sink).unwrap();

    assert_eq!(hw.count(|c| matches!(c, HwCall::ReadPressure)), 0);
    assert_eq!(hw.count(|c| matches!(c, HwCall::ReadCo2)), 0);
    assert_eq!(hw.count(|c| matches!(c, HwCall::SetHumidityCompensation(_))), 0);
    assert!((svc.sample().pressure - 1000.0).abs() < f32::EPSILON);
    assert_eq!(svc.sample().co2, 400);
}

#[test]
fn failed_temperature_read_keeps_previous_values() {
    let (mut svc, mut hw, mut sink) = default_service();
    svc.run_cycle(&mut hw, &mut sink).unwrap();

    hw.th
        .push_back(Err(SensorError::Crc(SensorKind::TemperatureHumidity)));
    let report = svc.run_cycle(&mut hw, &mut sink).unwrap().unwrap();

    assert!((report.sample.temperature - 25.5).abs() < 1e-4);
    assert!((report.sample.humidity - 60.2).abs() < 1e-4);
    assert_eq!(report.index.value(), 73);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ReadingRetained(_))), 1);
}

#[test]
fn fallback_band_leaves_expression_untouched() {
    let (mut svc, mut hw, mut sink) = default_service();
    hw.default_th = (40.0, 90.0);
    hw.clear();

    let report = svc.run_cycle(&mut hw, &mut sink).unwrap().unwrap();
    assert!(report.raw_index > 85);
    assert_eq!(report.index.value(), 85);
    assert_eq!(report.actuation.band, ComfortBand::Fallback);
    assert_eq!(hw.count(|c| matches!(c, HwCall::SetExpression(_))), 0);
    assert_eq!(hw.last_palette(), Some(Palette::BOOT));
    assert_eq!(hw.last_angle(), Some(0));
}

#[test]
fn cold_air_clamps_to_fifty() {
    let (mut svc, mut hw, mut sink) = default_service();
    hw.default_th = (-10.0, 30.0);
    let report = svc.run_cycle(&mut hw, &mut sink).unwrap().unwrap();
    assert!(report.raw_index < 50);
    assert_eq!(report.index.value(), 50);
    assert_eq!(hw.last_angle(), Some(180));
    assert_eq!(hw.last_expression(), Some(Expression::Sad));
}

// ── Failure policy ────────────────────────────────────────────

#[test]
fn gas_failure_halts_by_default() {
    let (mut svc, mut hw, mut sink) = default_service();
    let flag = CycleFlag::new();
    hw.co2 = Err(SensorError::Bus(SensorKind::Gas));

    let err = svc.poll(&flag, 0, &mut hw, &mut sink).unwrap_err();
    assert_eq!(err, Error::Sensor(SensorError::Bus(SensorKind::Gas)));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FatalSensorFault(_))), 1);
    assert_eq!(hw.count(|c| matches!(c, HwCall::SetAngle(62))), 0, "no actuation after a fault");
    assert!(flag.is_due(), "an aborted cycle stays pending");
}

#[test]
fn skip_policy_retries_next_period_and_keeps_sample() {
    let config = SystemConfig {
        read_failure_policy: ReadFailurePolicy::SkipCycle,
        ..SystemConfig::default()
    };
    let (mut svc, mut hw, mut sink) = make_service(config, Capabilities::ALL);
    let flag = CycleFlag::new();
    svc.poll(&flag, 0, &mut hw, &mut sink).unwrap();
    let before = svc.sample();

    hw.pressure = Err(SensorError::MeasurementFailed(SensorKind::Pressure));
    hw.default_th = (30.0, 80.0);
    flag.mark_due();
    svc.poll(&flag, 100, &mut hw, &mut sink).unwrap();

    assert_eq!(svc.sample(), before);
    assert_eq!(svc.cycles(), 1);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::CycleSkipped(_))), 1);
    assert!(!flag.is_due());
}

#[test]
fn compensation_rejection_does_not_abort_the_cycle() {
    let (mut svc, mut hw, mut sink) = default_service();
    // Extreme heat and humidity push absolute humidity past what the gas
    // sensor accepts.
    hw.default_th = (100.0, 100.0);
    let report = svc.run_cycle(&mut hw, &mut sink).unwrap();
    assert!(report.is_some());
}
