//! Hobby servo on the servo hat, driven by LEDC PWM.
//!
//! 50 Hz frame, 16-bit duty.  The angle-to-duty calibration lives in
//! [`crate::comfort::actuation::servo_duty`]; this driver only clamps the
//! angle and writes the register.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the LEDC duty via hw_init helpers.
//! On host/test: hw_init records the last duty in memory.

use crate::comfort::actuation::{SERVO_FULL_SCALE_DEG, servo_duty};
use crate::drivers::hw_init;

pub struct ServoDriver {
    angle: Option<i32>,
    duty: u32,
}

impl ServoDriver {
    pub fn new() -> Self {
        Self {
            angle: None,
            duty: 0,
        }
    }

    /// Command `degrees`, clamped to the servo's 0–180° travel.
    pub fn set_angle(&mut self, degrees: i32) {
        let degrees = degrees.clamp(0, SERVO_FULL_SCALE_DEG);
        let duty = servo_duty(degrees);
        hw_init::ledc_set(hw_init::LEDC_CH_SERVO, duty);
        self.angle = Some(degrees);
        self.duty = duty;
    }

    /// Last commanded angle, `None` before the first command.
    pub fn angle(&self) -> Option<i32> {
        self.angle
    }

    pub fn current_duty(&self) -> u32 {
        self.duty
    }
}

impl Default for ServoDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_is_clamped_before_mapping() {
        let mut s = ServoDriver::new();
        assert_eq!(s.angle(), None);
        s.set_angle(200);
        assert_eq!(s.angle(), Some(180));
        assert_eq!(s.current_duty(), servo_duty(180));
        s.set_angle(-5);
        assert_eq!(s.current_duty(), servo_duty(0));
    }
}
