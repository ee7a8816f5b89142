//! One-shot hardware peripheral initialization.
//!
//! Configures the button GPIO and the servo's LEDC timer/channel using raw
//! ESP-IDF sys calls.  Called once from `main()` before the event loop
//! starts.  The I2C bus is brought up separately through `esp-idf-hal`
//! because the sensor drivers consume it as an `embedded-hal` bus.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::InitError;
#[cfg(target_os = "espidf")]
use crate::pins;

/// LEDC channel driving the servo signal line.
pub const LEDC_CH_SERVO: u32 = 1;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), InitError> {
    // SAFETY: Called once from main() before the event loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), InitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), InitError> {
    // Button A has an external pull-up on the StickC; GPIO37 is input-only.
    let btn_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::BUTTON_A_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&btn_cfg) };
    if ret != ESP_OK as i32 {
        return Err(InitError::GpioConfigFailed(ret));
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulated input level; idle-high like the real pull-up.
#[cfg(not(target_os = "espidf"))]
static SIM_GPIO_LEVEL: AtomicBool = AtomicBool::new(true);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gpio_level(high: bool) {
    SIM_GPIO_LEVEL.store(high, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    SIM_GPIO_LEVEL.load(Ordering::Relaxed)
}

// ── LEDC PWM ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), InitError> {
    // Timer 1: servo (50 Hz, 16-bit)
    let timer1 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_1,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_16_BIT,
        freq_hz: pins::SERVO_PWM_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer1) };
    if ret != ESP_OK as i32 {
        return Err(InitError::LedcInitFailed(ret));
    }

    // Channel 1: servo signal
    let ret = unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: LEDC_CH_SERVO,
            timer_sel: ledc_timer_t_LEDC_TIMER_1,
            gpio_num: pins::SERVO_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        })
    };
    if ret != ESP_OK as i32 {
        return Err(InitError::LedcInitFailed(ret));
    }

    info!(
        "hw_init: LEDC configured (servo=CH{} on GPIO{}, {} Hz / {}-bit)",
        LEDC_CH_SERVO,
        pins::SERVO_GPIO,
        pins::SERVO_PWM_HZ,
        pins::SERVO_TIMER_BITS
    );
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u32) {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only main loop calls this function.
    unsafe {
        esp_idf_svc::sys::ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty);
        esp_idf_svc::sys::ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

/// Last duty written to the simulated servo channel.
#[cfg(not(target_os = "espidf"))]
static SIM_SERVO_DUTY: AtomicU32 = AtomicU32::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(channel: u32, duty: u32) {
    if channel == LEDC_CH_SERVO {
        SIM_SERVO_DUTY.store(duty, Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_servo_duty() -> u32 {
    SIM_SERVO_DUTY.load(Ordering::Relaxed)
}
