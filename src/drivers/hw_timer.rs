//! Periodic cycle timer using ESP-IDF's esp_timer API.
//!
//! [`every`] arms one periodic timer that invokes a plain `fn()` callback.
//! Callbacks execute in the ESP timer task context (not ISR), but must
//! still stay short: the cycle callback only stores into an atomic flag.
//!
//! On simulation targets a background thread sleeps for the period and
//! calls the callback, so host tests see the same producer behaviour.

use crate::error::InitError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut CYCLE_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: CYCLE_TIMER is written once in `every()` before any timer
/// callbacks fire.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn cycle_timer() -> esp_timer_handle_t { unsafe { CYCLE_TIMER } }

/// Trampoline from the C callback signature to the registered `fn()`.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn timer_trampoline(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` was produced from a `fn()` pointer in `every()`.
    let callback: fn() = unsafe { core::mem::transmute::<*mut core::ffi::c_void, fn()>(arg) };
    callback();
}

/// Start the periodic timer calling `callback` every `period_us`.
#[cfg(target_os = "espidf")]
pub fn every(period_us: u64, callback: fn()) -> Result<(), InitError> {
    // SAFETY: CYCLE_TIMER is written here once at boot from the single
    // main-task context before any timer callbacks fire.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(timer_trampoline),
            arg: callback as *mut core::ffi::c_void,
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"cycle".as_ptr(),
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut CYCLE_TIMER);
        if ret != ESP_OK {
            return Err(InitError::TimerStartFailed(ret));
        }
        let ret = esp_timer_start_periodic(cycle_timer(), period_us);
        if ret != ESP_OK {
            return Err(InitError::TimerStartFailed(ret));
        }
    }
    info!("hw_timer: cycle timer started ({} µs period)", period_us);
    Ok(())
}

/// Stop the cycle timer.
#[cfg(target_os = "espidf")]
pub fn stop() {
    // SAFETY: CYCLE_TIMER is a valid handle if every() succeeded;
    // null-check covers the not-started case.
    unsafe {
        let t = cycle_timer();
        if !t.is_null() {
            esp_timer_stop(t);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
static SIM_RUNNING: core::sync::atomic::AtomicBool = core::sync::atomic::AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn every(period_us: u64, callback: fn()) -> Result<(), InitError> {
    use core::sync::atomic::Ordering;

    SIM_RUNNING.store(true, Ordering::Release);
    let period = std::time::Duration::from_micros(period_us);
    std::thread::spawn(move || {
        loop {
            std::thread::sleep(period);
            if !SIM_RUNNING.load(Ordering::Acquire) {
                break;
            }
            callback();
        }
    });
    log::info!("hw_timer(sim): cycle timer thread started ({} µs period)", period_us);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn stop() {
    SIM_RUNNING.store(false, core::sync::atomic::Ordering::Release);
}
