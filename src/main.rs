//! ComfortMeter Firmware — Main Entry Point
//!
//! Hexagonal architecture with a timer-gated sensing cycle.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter                 LogEventSink   Esp32Time      │
//! │  (Sensor+Servo+Avatar+Input)     (EventSink)    (monotonic ms) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ComfortService (pure logic)                 │    │
//! │  │  compensation · discomfort index · actuation · speech  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  esp_timer (30 s) ──▶ CYCLE_FLAG ──▶ main loop                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::{Delay, FreeRtos};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;
use log::{error, info};

use comfortmeter::adapters::hardware::HardwareAdapter;
use comfortmeter::adapters::log_sink::LogEventSink;
use comfortmeter::adapters::time::Esp32TimeAdapter;
use comfortmeter::app::ports::{AvatarPort, Capabilities};
use comfortmeter::app::service::ComfortService;
use comfortmeter::config::{OperatingMode, SystemConfig};
use comfortmeter::cycle::{self, CYCLE_FLAG};
use comfortmeter::drivers::avatar::AvatarFace;
use comfortmeter::drivers::button::ButtonDriver;
use comfortmeter::drivers::servo::ServoDriver;
use comfortmeter::drivers::{hw_init, hw_timer};
use comfortmeter::pins;
use comfortmeter::sensors::SensorHub;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ComfortMeter v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    if let Err(e) = config.validate() {
        halt(&format!("{e}"));
    }

    if let Err(e) = hw_init::init_peripherals() {
        halt(&format!("HAL init failed: {e}"));
    }

    // ── 2. I2C bus + sensors ──────────────────────────────────
    let peripherals = Peripherals::take()?;
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio32,
        peripherals.pins.gpio33,
        &I2cConfig::new().baudrate(pins::I2C_FREQ_HZ.Hz()),
    )?;
    info!(
        "I2C up (SDA={} SCL={} @ {} Hz)",
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        pins::I2C_FREQ_HZ
    );

    let fitted = Capabilities {
        pressure: cfg!(feature = "pressure"),
        gas: cfg!(feature = "gas"),
    };
    let mut avatar = AvatarFace::new();
    let sensor_hub = match SensorHub::bring_up(i2c, Delay::new_default(), fitted) {
        Ok(hub) => hub,
        Err(e) => {
            avatar.set_speech_text(&format!("{e}"));
            halt(&format!("{e}"))
        }
    };

    // ── 3. Adapters + service ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        sensor_hub,
        ServoDriver::new(),
        avatar,
        ButtonDriver::new(pins::BUTTON_A_GPIO),
    );
    let mut log_sink = LogEventSink::new();
    let clock = Esp32TimeAdapter::new();

    let mut service = ComfortService::new(config.clone());
    service.start(&mut hw, &mut log_sink);

    // ── 4. Gas warm-up / servo settle ─────────────────────────
    let warmup_secs = if service.capabilities().gas {
        u32::from(config.gas_warmup_secs)
    } else {
        0
    };
    for sec in 0..warmup_secs {
        info!("SGP30 warm-up {}/{} s", sec + 1, warmup_secs);
        FreeRtos::delay_ms(1000);
    }
    let waited_ms = warmup_secs * 1000;
    if waited_ms < config.servo_settle_ms {
        FreeRtos::delay_ms(config.servo_settle_ms - waited_ms);
    }

    // ── 5. Cycle timer ────────────────────────────────────────
    if config.mode == OperatingMode::Scheduled {
        if let Err(e) = hw_timer::every(config.cycle_period_us, cycle::on_cycle_timer) {
            halt(&format!("{e}"));
        }
    }

    info!("Entering main loop");

    // ── 6. Main loop ──────────────────────────────────────────
    loop {
        if let Err(e) = service.poll(&CYCLE_FLAG, clock.uptime_ms(), &mut hw, &mut log_sink) {
            hw_timer::stop();
            hw.set_speech_text(&format!("{e}"));
            halt(&format!("{e}"));
        }
        FreeRtos::delay_ms(config.loop_idle_ms);
    }
}

/// Report a fatal condition and stop until a physical reset.
fn halt(reason: &str) -> ! {
    error!("{}, halting", reason);
    loop {
        FreeRtos::delay_ms(1000);
    }
}
