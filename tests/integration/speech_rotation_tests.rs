//! Integration tests for the speech-bubble rotation driven through
//! `ComfortService::poll`.

use comfortmeter::app::ports::Capabilities;
use comfortmeter::app::service::ComfortService;
use comfortmeter::config::SystemConfig;
use comfortmeter::cycle::CycleFlag;

use crate::mock_hw::{LogSink, MockHardware};

fn run_until(svc: &mut ComfortService, hw: &mut MockHardware, sink: &mut LogSink, flag: &CycleFlag, end_ms: u64) {
    for now in (0..end_ms).step_by(50) {
        svc.poll(flag, now, hw, sink).unwrap();
    }
}

#[test]
fn full_rotation_with_every_sensor() {
    let mut svc = ComfortService::new(SystemConfig::default());
    let mut hw = MockHardware::new(Capabilities::ALL);
    let mut sink = LogSink::new();
    svc.start(&mut hw, &mut sink);

    run_until(&mut svc, &mut hw, &mut sink, &CycleFlag::new(), 15_000);

    assert_eq!(
        hw.speech(),
        vec![
            "気温 : 25.5 'C",
            "湿度 : 60.2 % ",
            "気圧 : 1013.2 hPa",
            "CO2 : 412 ppm",
            "不快指数 : 73",
        ]
    );
}

#[test]
fn absent_sensors_are_skipped_in_rotation() {
    let mut svc = ComfortService::new(SystemConfig::default());
    let mut hw = MockHardware::new(Capabilities::default());
    let mut sink = LogSink::new();
    svc.start(&mut hw, &mut sink);

    run_until(&mut svc, &mut hw, &mut sink, &CycleFlag::new(), 9_000);

    assert_eq!(hw.speech(), vec!["気温 : 25.5 'C", "湿度 : 60.2 % ", "不快指数 : 73"]);
}

#[test]
fn each_message_holds_for_the_dwell_time() {
    let mut svc = ComfortService::new(SystemConfig::default());
    let mut hw = MockHardware::new(Capabilities::ALL);
    let mut sink = LogSink::new();
    svc.start(&mut hw, &mut sink);
    let flag = CycleFlag::new();

    run_until(&mut svc, &mut hw, &mut sink, &flag, 2_999);
    assert_eq!(hw.speech().len(), 1);

    svc.poll(&flag, 3_000, &mut hw, &mut sink).unwrap();
    assert_eq!(hw.speech().len(), 2);
}

#[test]
fn rotation_wraps_without_triggering_a_scheduled_cycle() {
    let mut svc = ComfortService::new(SystemConfig::default());
    let mut hw = MockHardware::new(Capabilities::default());
    let mut sink = LogSink::new();
    svc.start(&mut hw, &mut sink);

    // Three messages × 3 s, run past two full rotations.
    run_until(&mut svc, &mut hw, &mut sink, &CycleFlag::new(), 20_000);

    let speech = hw.speech();
    assert_eq!(speech.len(), 7);
    assert_eq!(speech[3], speech[0]);
    assert_eq!(hw.cycles_run(), 1);
}
